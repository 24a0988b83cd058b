use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use console::{style, Key, Term};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use path_blocker::replay::Replay;
use path_blocker::solve::{self, Outcome};
use path_blocker::{Direction, Game};
use rayon::prelude::*;

const USAGE: &str = "\
Usage:
    path-blocker play [--max-states <n>] <level>
    path-blocker solve [--max-states <n>] <level>...";

const REPLAY_TICK: Duration = Duration::from_millis(150);
const DEFAULT_PLAY_MAX_STATES: usize = 2_000_000;

enum Action {
    Exit,
    Go(Direction),
    Undo,
    Reset,
    Auto,
}

impl TryFrom<Key> for Action {
    type Error = ();

    fn try_from(key: Key) -> Result<Self, Self::Error> {
        Ok(match key {
            Key::ArrowLeft | Key::Char('a') => Self::Go(Direction::Left),
            Key::ArrowRight | Key::Char('d') => Self::Go(Direction::Right),
            Key::ArrowUp | Key::Char('w') => Self::Go(Direction::Up),
            Key::ArrowDown | Key::Char('s') => Self::Go(Direction::Down),
            Key::Escape | Key::Char('q') => Self::Exit,
            Key::Char('z') => Self::Undo,
            Key::Char('r') => Self::Reset,
            Key::Char('i') => Self::Auto,
            _ => return Err(()),
        })
    }
}

fn load(path: &Path) -> Result<Game> {
    let map_data = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let game = map_data
        .parse::<Game>()
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(game)
}

fn fmt_steps(steps: &[Direction]) -> String {
    if steps.is_empty() {
        return "(already on a goal)".into();
    }
    steps
        .iter()
        .map(|dir| dir.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

fn spinner_style() -> Result<ProgressStyle> {
    ProgressStyle::with_template("{spinner} {prefix}: {pos} states ({per_sec})")
        .context("Invalid progress template")
}

fn max_states_arg(args: &mut impl Iterator<Item = String>) -> Result<usize> {
    let n = args.next().context("Missing value of --max-states")?;
    n.parse::<usize>().context("Invalid --max-states")
}

fn play(path: &Path, max_states: usize) -> Result<()> {
    let init_game = load(path)?;
    let mut game = init_game.clone();
    let mut history = Vec::new();

    let term = Term::stderr();
    loop {
        term.clear_screen()?;
        eprintln!("{game}");
        eprintln!("Moves: {}", history.len());
        if game.is_success() {
            eprintln!("{}", style("Level complete!").green().bold());
            break;
        }

        let action = loop {
            if let Ok(action) = Action::try_from(term.read_key()?) {
                break action;
            }
        };

        match action {
            Action::Exit => break,
            Action::Go(dir) => {
                let prev = game.state.clone();
                if game.go(dir).is_ok() {
                    history.push(prev);
                }
            }
            Action::Undo => {
                if let Some(state) = history.pop() {
                    game.state = state;
                }
            }
            Action::Reset => {
                history.clear();
                game = init_game.clone();
            }
            Action::Auto => {
                let pb = ProgressBar::new_spinner()
                    .with_style(spinner_style()?)
                    .with_prefix("Solving");
                let outcome = solve::bfs(&game, Some(max_states), || pb.inc(1));
                pb.finish_and_clear();
                let steps = match outcome {
                    Outcome::Solved(steps) => steps,
                    Outcome::NoPathFound => {
                        eprintln!("{}", style("No solution from here.").yellow());
                        term.read_key()?;
                        continue;
                    }
                    Outcome::SearchAborted { expanded } => {
                        let msg = format!("Gave up after {expanded} states.");
                        eprintln!("{}", style(msg).yellow());
                        term.read_key()?;
                        continue;
                    }
                };
                let mut replay = Replay::new(&mut game, steps);
                let mut states = Vec::new();
                while let Some(dir) = replay.next() {
                    let prev = replay.game().state.clone();
                    replay
                        .apply(dir)
                        .with_context(|| format!("Solver produced invalid move {dir}"))?;
                    states.push(prev);
                    term.clear_screen()?;
                    eprintln!("{}", replay.game());
                    eprintln!("Replaying: {dir}");
                    std::thread::sleep(REPLAY_TICK);
                }
                history.extend(states);
            }
        }
    }

    Ok(())
}

fn solve_all(paths: &[PathBuf], max_states: Option<usize>) -> Result<()> {
    let games = paths
        .iter()
        .map(|path| load(path))
        .collect::<Result<Vec<_>>>()?;

    let progress = MultiProgress::new();
    let bar_style = spinner_style()?;
    let bars = paths
        .iter()
        .map(|path| {
            progress.add(
                ProgressBar::new_spinner()
                    .with_style(bar_style.clone())
                    .with_prefix(path.display().to_string()),
            )
        })
        .collect::<Vec<_>>();
    let outcomes = games
        .par_iter()
        .zip(&bars)
        .map(|(game, pb)| {
            let outcome = solve::bfs(game, max_states, || pb.inc(1));
            pb.finish_and_clear();
            outcome
        })
        .collect::<Vec<_>>();

    let mut unsolved = 0;
    for (path, outcome) in paths.iter().zip(outcomes) {
        let name = style(path.display()).bold();
        match outcome {
            Outcome::Solved(steps) => {
                eprintln!("{name}: {} moves: {}", steps.len(), fmt_steps(&steps));
            }
            Outcome::NoPathFound => {
                unsolved += 1;
                eprintln!("{name}: {}", style("no solution").red());
            }
            Outcome::SearchAborted { expanded } => {
                unsolved += 1;
                eprintln!(
                    "{name}: {}",
                    style(format!("aborted after {expanded} states")).yellow()
                );
            }
        }
    }

    if unsolved != 0 {
        bail!("{unsolved}/{} levels unsolved", paths.len());
    }
    Ok(())
}

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let cmd = args.next().context(USAGE)?;
    match cmd.as_str() {
        "play" => {
            let mut max_states = DEFAULT_PLAY_MAX_STATES;
            let mut path = None;
            while let Some(arg) = args.next() {
                if arg == "--max-states" {
                    max_states = max_states_arg(&mut args)?;
                } else {
                    path = Some(PathBuf::from(arg));
                }
            }
            let path = path.context("Missing level file argument")?;
            play(&path, max_states)
        }
        "solve" => {
            let mut max_states = None;
            let mut paths = Vec::new();
            while let Some(arg) = args.next() {
                if arg == "--max-states" {
                    max_states = Some(max_states_arg(&mut args)?);
                } else {
                    paths.push(PathBuf::from(arg));
                }
            }
            if paths.is_empty() {
                bail!("Missing level file argument\n{USAGE}");
            }
            solve_all(&paths, max_states)
        }
        _ => bail!("Unknown command {cmd:?}\n{USAGE}"),
    }
}
