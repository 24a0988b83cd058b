use std::str::FromStr;

use crate::{Board, Cell, Direction, Game, LoadError, Vec2};

impl FromStr for Game {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rows = Vec::new();
        let mut start = None;

        // Cells may or may not be separated by whitespace.
        let lines = s
            .lines()
            .map(|line| line.split_whitespace().collect::<String>())
            .filter(|line| !line.is_empty());
        for (i, line) in lines.enumerate() {
            let mut row = Vec::new();
            for (j, ch) in line.chars().enumerate() {
                let cell = match ch {
                    '0' => Cell::Free,
                    '1' => Cell::Blocked,
                    'Y' => Cell::Goal,
                    'X' => {
                        if start.is_some() {
                            return Err(LoadError::InvalidBoard("Multiple starts".into()));
                        }
                        start = Some((i, j));
                        Cell::Free
                    }
                    _ => {
                        return Err(LoadError::InvalidBoard(format!(
                            "Invalid cell {ch:?} on line {}",
                            i + 1,
                        )))
                    }
                };
                row.push(cell);
            }
            rows.push(row);
        }

        let board = Board::new(rows)?;
        // In bound after `Board::new`.
        let (i, j) = start.ok_or(LoadError::MissingStart)?;
        Game::new(board, Vec2(i as _, j as _))
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "U" | "up" => Direction::Up,
            "D" | "down" => Direction::Down,
            "L" | "left" => Direction::Left,
            "R" | "right" => Direction::Right,
            _ => return Err(format!("Invalid direction: {s:?}")),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BlockedSet;

    #[test]
    fn parses_spaced_and_compact_rows() {
        let spaced = "X 0 1\n0 Y 0\n".parse::<Game>().unwrap();
        let compact = "\nX01\n0Y0\n\n".parse::<Game>().unwrap();
        assert_eq!(spaced, compact);

        assert_eq!((spaced.board.height(), spaced.board.width()), (2, 3));
        assert_eq!(spaced.state.player(), Vec2(0, 0));
        assert_eq!(spaced.board[Vec2(0, 0)], Cell::Free);
        assert_eq!(spaced.board[Vec2(0, 2)], Cell::Blocked);
        assert_eq!(spaced.board[Vec2(1, 1)], Cell::Goal);
        assert_eq!(
            spaced.state.blocked(),
            &BlockedSet::from_board(&spaced.board)
        );
    }

    #[test]
    fn rejects_malformed_levels() {
        assert!(matches!(
            "X 0 0\n0 Y\n".parse::<Game>(),
            Err(LoadError::InvalidBoard(_))
        ));
        assert!(matches!(
            "X 0 a\n0 Y 0\n".parse::<Game>(),
            Err(LoadError::InvalidBoard(_))
        ));
        assert!(matches!(
            "X 0 X\n0 Y 0\n".parse::<Game>(),
            Err(LoadError::InvalidBoard(_))
        ));
        assert!(matches!("".parse::<Game>(), Err(LoadError::InvalidBoard(_))));
        assert_eq!("0 0\n0 Y".parse::<Game>(), Err(LoadError::MissingStart));
        assert_eq!("X 0\n0 0".parse::<Game>(), Err(LoadError::MissingGoal));
    }

    #[test]
    fn parses_tall_single_column() {
        let level = format!("X\n{}Y\n", "0\n".repeat(253));
        let game = level.parse::<Game>().unwrap();
        assert_eq!((game.board.height(), game.board.width()), (255, 1));
        assert_eq!(game.board.locate(Cell::Goal), Ok(Vec2(254, 0)));
        assert_eq!(game.to_string(), level);
    }

    #[test]
    fn multiple_goals_are_allowed() {
        let game = "Y X Y".parse::<Game>().unwrap();
        assert_eq!(game.board.locate(Cell::Goal), Ok(Vec2(0, 0)));
        assert!(game.board.is_goal(Vec2(0, 2)));
    }

    #[test]
    fn parses_directions() {
        assert_eq!("U".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!("down".parse::<Direction>(), Ok(Direction::Down));
        assert_eq!("L".parse::<Direction>(), Ok(Direction::Left));
        assert_eq!("right".parse::<Direction>(), Ok(Direction::Right));
        assert!("north".parse::<Direction>().is_err());
    }
}
