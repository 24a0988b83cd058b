use anyhow::{bail, ensure, Context};
use path_blocker::solve::{self, Outcome};
use path_blocker::{Direction, Game};

use crate::common::*;

mod common;

fn fmt_direction(dir: Direction) -> &'static str {
    match dir {
        Direction::Up => "U",
        Direction::Down => "D",
        Direction::Left => "L",
        Direction::Right => "R",
    }
}

fn main() {
    run_tests("solve", |content| {
        let map = content
            .split_once(SEPARATOR)
            .map_or(content, |(input, _)| input)
            .trim();
        let mut game = map.parse::<Game>().context("Invalid map")?;

        let steps = match solve::bfs(&game, None, || {}) {
            Outcome::Solved(steps) => steps,
            Outcome::NoPathFound => return Ok(format!("{map}\n\n{SEPARATOR}-\n")),
            Outcome::SearchAborted { .. } => bail!("Aborted without a limit"),
        };

        // Validate.
        for &dir in &steps {
            game.go(dir).context("Invalid move")?;
        }
        ensure!(game.is_success(), "Invalid solution");

        let steps = steps.into_iter().map(fmt_direction).collect::<String>();

        Ok(format!("{map}\n\n{SEPARATOR}{steps}\n"))
    });
}
