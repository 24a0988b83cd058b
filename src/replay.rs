use std::collections::VecDeque;

use crate::{BlockedSet, Direction, Game, GoError, Slide, Vec2};

/// Plays a path on a live game, one move per pull.
///
/// Holds the game exclusively until dropped. Pacing is up to the caller: pull with
/// [`Iterator::next`] and [`Replay::apply`], or [`Replay::step`] for both at once.
#[derive(Debug)]
pub struct Replay<'a> {
    game: &'a mut Game,
    moves: VecDeque<Direction>,
}

impl<'a> Replay<'a> {
    pub fn new(game: &'a mut Game, moves: Vec<Direction>) -> Self {
        Self {
            game,
            moves: moves.into(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.moves.len()
    }

    pub fn position(&self) -> Vec2 {
        self.game.state.player()
    }

    pub fn blocked(&self) -> &BlockedSet {
        self.game.state.blocked()
    }

    pub fn game(&self) -> &Game {
        self.game
    }

    /// Whether the player has been absorbed by a goal. Updated as part of [`Replay::apply`].
    pub fn is_complete(&self) -> bool {
        self.game.is_success()
    }

    /// Apply one move to the live game with the same slide rule the solver uses.
    pub fn apply(&mut self, dir: Direction) -> Result<Slide, GoError> {
        self.game.go(dir)
    }

    pub fn step(&mut self) -> Option<Result<Slide, GoError>> {
        let dir = self.next()?;
        Some(self.apply(dir))
    }
}

impl Iterator for Replay<'_> {
    type Item = Direction;

    fn next(&mut self) -> Option<Self::Item> {
        self.moves.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.moves.len(), Some(self.moves.len()))
    }
}
