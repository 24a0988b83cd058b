use std::ops::Index;

use arrayvec::ArrayVec;

mod blocked;
mod fmt;
mod parse;
pub mod replay;
pub mod solve;

pub use blocked::BlockedSet;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GridError {
    OutOfBounds(Vec2),
    NotFound(Cell),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LoadError {
    InvalidBoard(String),
    MissingStart,
    MissingGoal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GoError {
    /// The first cell in that direction is off-board or blocked.
    Unmovable,
    /// The player already stands on a goal.
    Finished,
}

impl std::error::Error for GridError {}
impl std::error::Error for LoadError {}
impl std::error::Error for GoError {}

/// `(row, column)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Vec2(pub u8, pub u8);

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Free,
    Blocked,
    Goal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up = 0,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Exploration order of the solver.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];
}

/// Level geometry. Never changes once loaded; walls left behind by the player live in
/// [`BlockedSet`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    height: u8,
    width: u8,
    grid: Box<[Cell]>,
}

impl Index<Vec2> for Board {
    type Output = Cell;
    fn index(&self, pos: Vec2) -> &Self::Output {
        let idx = pos.0 as usize * self.width as usize + pos.1 as usize;
        &self.grid[idx]
    }
}

impl Board {
    pub fn new(rows: Vec<Vec<Cell>>) -> Result<Self, LoadError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(LoadError::InvalidBoard("Empty board".into()));
        }
        if height > u8::MAX as usize || width > u8::MAX as usize {
            return Err(LoadError::InvalidBoard(format!(
                "Board of {height}x{width} exceeds {0}x{0}",
                u8::MAX,
            )));
        }
        if let Some(i) = rows.iter().position(|row| row.len() != width) {
            return Err(LoadError::InvalidBoard(format!(
                "Width mismatch on line {}, expecting width {width}, got {}",
                i + 1,
                rows[i].len(),
            )));
        }

        Ok(Self {
            height: height as _,
            width: width as _,
            grid: rows.into_iter().flatten().collect(),
        })
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn cells(&self) -> impl Iterator<Item = (Vec2, Cell)> + '_ {
        let width = self.width as usize;
        self.grid
            .iter()
            .enumerate()
            .map(move |(i, &cell)| (Vec2((i / width) as u8, (i % width) as u8), cell))
    }

    pub fn contains(&self, pos: Vec2) -> bool {
        pos.0 < self.height && pos.1 < self.width
    }

    pub fn cell_at(&self, pos: Vec2) -> Result<Cell, GridError> {
        if !self.contains(pos) {
            return Err(GridError::OutOfBounds(pos));
        }
        Ok(self[pos])
    }

    /// The first cell of kind `cell` in row-major order.
    pub fn locate(&self, cell: Cell) -> Result<Vec2, GridError> {
        self.cells()
            .find(|&(_, c)| c == cell)
            .map(|(pos, _)| pos)
            .ok_or(GridError::NotFound(cell))
    }

    pub fn is_goal(&self, pos: Vec2) -> bool {
        self.contains(pos) && self[pos] == Cell::Goal
    }

    fn sibling_pos(&self, pos: Vec2, dir: Direction) -> Option<Vec2> {
        const DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
        let x = pos.0.checked_add_signed(DIRECTIONS[dir as usize].0)?;
        let y = pos.1.checked_add_signed(DIRECTIONS[dir as usize].1)?;
        if self.height <= x || self.width <= y {
            return None;
        }
        Some(Vec2(x, y))
    }
}

/// A node of the search graph: where the player is, and which cells are impassable.
///
/// Two states at the same coordinate with different trails are different states.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct State {
    player: Vec2,
    blocked: BlockedSet,
}

/// What a single slide did to the state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    pub from: Vec2,
    pub to: Vec2,
    /// Vacated cells, in the order they were left. All of them are blocked now.
    pub trail: Vec<Vec2>,
    pub reached_goal: bool,
}

impl State {
    pub fn new(board: &Board, player: Vec2) -> Self {
        Self {
            player,
            blocked: BlockedSet::from_board(board),
        }
    }

    pub fn player(&self) -> Vec2 {
        self.player
    }

    pub fn blocked(&self) -> &BlockedSet {
        &self.blocked
    }

    pub fn go(&mut self, board: &Board, dir: Direction) -> Result<Slide, GoError> {
        let from = self.player;
        let mut trail = Vec::new();
        let reached_goal = self.slide(board, dir, |pos| trail.push(pos))?;
        Ok(Slide {
            from,
            to: self.player,
            trail,
            reached_goal,
        })
    }

    /// Slide until the next cell is off-board or blocked, or a goal is entered. Returns whether
    /// the slide ended on a goal.
    pub(crate) fn slide(
        &mut self,
        board: &Board,
        dir: Direction,
        mut on_vacate: impl FnMut(Vec2),
    ) -> Result<bool, GoError> {
        if board.is_goal(self.player) {
            return Err(GoError::Finished);
        }

        let start = self.player;
        let mut pos = start;
        while let Some(next) = board.sibling_pos(pos, dir) {
            if self.blocked.contains(next) {
                break;
            }
            // Trail.
            self.blocked.insert(pos);
            on_vacate(pos);
            pos = next;
            // The goal absorbs the player.
            if board[pos] == Cell::Goal {
                break;
            }
        }

        if pos == start {
            return Err(GoError::Unmovable);
        }
        self.player = pos;
        Ok(board[pos] == Cell::Goal)
    }

    /// Valid moves from this state, in [`Direction::ALL`] order.
    pub fn successors(&self, board: &Board) -> ArrayVec<(Direction, State), 4> {
        Direction::ALL
            .into_iter()
            .filter_map(|dir| {
                let mut next = self.clone();
                next.slide(board, dir, |_| {}).ok()?;
                Some((dir, next))
            })
            .collect()
    }
}

/// A loaded level: fixed geometry plus the live state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Game {
    pub board: Board,
    pub state: State,
}

impl Game {
    pub fn new(board: Board, start: Vec2) -> Result<Self, LoadError> {
        match board.cell_at(start) {
            Err(_) => {
                return Err(LoadError::InvalidBoard(format!(
                    "Start ({}, {}) out of bound",
                    start.0, start.1,
                )))
            }
            Ok(Cell::Blocked) => {
                return Err(LoadError::InvalidBoard(format!(
                    "Start ({}, {}) is blocked",
                    start.0, start.1,
                )))
            }
            Ok(Cell::Free | Cell::Goal) => {}
        }
        board
            .locate(Cell::Goal)
            .map_err(|_| LoadError::MissingGoal)?;

        let state = State::new(&board, start);
        Ok(Self { board, state })
    }

    pub fn is_success(&self) -> bool {
        self.board.is_goal(self.state.player)
    }

    pub fn go(&mut self, dir: Direction) -> Result<Slide, GoError> {
        self.state.go(&self.board, dir)
    }
}
