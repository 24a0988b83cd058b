use std::fmt::{self, Display};

use crate::{Cell, Direction, Game, GoError, GridError, LoadError};

/// Same format as the level files, with the trail rendered as walls.
impl Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let blocked = self.state.blocked();
        for (pos, cell) in self.board.cells() {
            if pos.1 != 0 {
                f.write_str(" ")?;
            }
            if pos == self.state.player() {
                f.write_str("X")?;
            } else if blocked.contains(pos) {
                Cell::Blocked.fmt(f)?;
            } else {
                cell.fmt(f)?;
            }
            if pos.1 + 1 == self.board.width() {
                f.write_str("\n")?;
            }
        }
        Ok(())
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Free => f.write_str("0"),
            Cell::Blocked => f.write_str("1"),
            Cell::Goal => f.write_str("Y"),
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => f.write_str("up"),
            Direction::Down => f.write_str("down"),
            Direction::Left => f.write_str("left"),
            Direction::Right => f.write_str("right"),
        }
    }
}

impl Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::OutOfBounds(pos) => {
                write!(f, "Position ({}, {}) out of bound", pos.0, pos.1)
            }
            GridError::NotFound(cell) => write!(f, "No cell {cell} on the board"),
        }
    }
}

impl Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::InvalidBoard(reason) => write!(f, "Invalid board: {reason}"),
            LoadError::MissingStart => f.write_str("Missing start"),
            LoadError::MissingGoal => f.write_str("Missing goal"),
        }
    }
}

impl Display for GoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoError::Unmovable => f.write_str("Blocked in that direction"),
            GoError::Finished => f.write_str("Already on a goal"),
        }
    }
}
