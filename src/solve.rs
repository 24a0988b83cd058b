use crate::{Direction, Game, State};

type IndexMap<K, V> = indexmap::IndexMap<K, V, fxhash::FxBuildHasher>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A shortest path. Empty if the start is already a goal.
    Solved(Vec<Direction>),
    NoPathFound,
    /// The state limit was hit before a goal was dequeued.
    SearchAborted { expanded: usize },
}

/// Breadth-first search over `(player, blocked cells)` states.
///
/// `max_states` bounds the number of expanded states. `on_step` is called once per expansion.
pub fn bfs(game: &Game, max_states: Option<usize>, mut on_step: impl FnMut()) -> Outcome {
    // Insertion order is the FIFO frontier, membership is the visited set, and the value links
    // each state to its parent.
    let mut state_parent: IndexMap<State, Option<(usize, Direction)>> = IndexMap::default();
    state_parent.insert(game.state.clone(), None);

    let mut cursor = 0;
    let found = loop {
        #[cfg(feature = "coz")]
        coz::scope!("Expand");

        let Some((state, _)) = state_parent.get_index(cursor) else {
            return Outcome::NoPathFound;
        };
        if game.board.is_goal(state.player()) {
            break cursor;
        }
        if max_states.map_or(false, |max| cursor >= max) {
            return Outcome::SearchAborted { expanded: cursor };
        }

        on_step();

        #[cfg(feature = "coz")]
        coz::progress!("State");

        for (dir, next) in state.successors(&game.board) {
            state_parent.entry(next).or_insert(Some((cursor, dir)));
        }
        cursor += 1;
    };

    let mut steps = std::iter::successors(state_parent[found], |&(parent, _)| {
        state_parent[parent]
    })
    .map(|(_, dir)| dir)
    .collect::<Vec<_>>();
    steps.reverse();
    Outcome::Solved(steps)
}
