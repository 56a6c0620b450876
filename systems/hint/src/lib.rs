#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Hint engine that recommends the next move from precomputed solutions.

use kitten_rescue_core::{GameSetup, TurnMove};

/// Recommends the next move for a game that has played `moves` so far.
///
/// Only solutions that start with exactly `moves` and still have a step left
/// take part. Their next steps are tallied and the most common one wins; ties
/// go to the move seen first. Returns `None` once the player has left every
/// known solution or the game is already won.
#[must_use]
pub fn get_best_next_move(setup: &GameSetup, moves: &[TurnMove]) -> Option<TurnMove> {
    let mut tally: Vec<(TurnMove, usize)> = Vec::with_capacity(TurnMove::ALL.len());

    let next_steps = setup
        .possible_solutions()
        .iter()
        .filter(|solution| solution.len() > moves.len() && solution.starts_with(moves))
        .map(|solution| solution[moves.len()]);

    for step in next_steps {
        match tally.iter_mut().find(|(seen, _)| *seen == step) {
            Some((_, count)) => *count += 1,
            None => tally.push((step, 1)),
        }
    }

    // `max_by_key` keeps the last maximum, so scan in reverse to favour the first.
    tally
        .into_iter()
        .rev()
        .max_by_key(|(_, count)| *count)
        .map(|(step, _)| step)
}
