#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Bounded depth-first search for the shortest winning move sequences.
//!
//! The search runs the same validation and resolution primitives as live
//! play, so a recorded solution always replays to a win. Candidate moves are
//! shuffled with the caller's RNG: the reported solutions depend on the RNG,
//! the par value never does.

use kitten_rescue_core::{
    Difficulty, GameElementPositions, GameSetup, GameView, TurnMove, FALLBACK_PAR, MAX_PAR,
};
use kitten_rescue_system_turn::{calculate_new_positions, has_moon_set, is_won, validate_move};
use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};

/// Number of equally short solutions at which a puzzle is rated one step easier.
const CROWDED_SOLUTIONS: usize = 4;

/// Knobs that shape a solver run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParOptions {
    /// Keep every shortest solution instead of stopping at the first one.
    pub return_all_solutions: bool,
    /// Longest sequence the search will consider.
    pub max_depth: usize,
}

impl Default for ParOptions {
    fn default() -> Self {
        Self {
            return_all_solutions: false,
            max_depth: MAX_PAR,
        }
    }
}

/// Outcome of a solver run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParInfo {
    /// Length of the shortest solution, or [`FALLBACK_PAR`] when none exists.
    pub par: usize,
    /// Rating derived from the par and the number of shortest solutions.
    pub difficulty: Difficulty,
    /// Shortest solutions found, all of length `par`.
    pub possible_solutions: Vec<Vec<TurnMove>>,
}

impl ParInfo {
    /// Reports whether the search found at least one solution.
    #[must_use]
    pub fn is_solvable(&self) -> bool {
        !self.possible_solutions.is_empty()
    }
}

/// Searches the setup's initial positions for the shortest winning sequences.
///
/// Boards without a solution within `options.max_depth` are not an error:
/// they report [`FALLBACK_PAR`] with no solutions.
pub fn calculate_par<R>(setup: &GameSetup, options: &ParOptions, rng: &mut R) -> ParInfo
where
    R: Rng + ?Sized,
{
    let mut search = Search {
        setup,
        return_all: options.return_all_solutions,
        bound: options.max_depth,
        path: Vec::with_capacity(options.max_depth),
        solutions: Vec::new(),
        visited: 0,
    };
    search.explore(*setup.element_positions(), rng);

    let possible_solutions = search.solutions;
    let par = possible_solutions
        .first()
        .map_or(FALLBACK_PAR, Vec::len);
    let difficulty = rate_difficulty(par, possible_solutions.len());

    tracing::debug!(
        par,
        %difficulty,
        solutions = possible_solutions.len(),
        visited = search.visited,
        "par calculated"
    );

    ParInfo {
        par,
        difficulty,
        possible_solutions,
    }
}

/// Returns a copy of the setup with freshly computed solutions attached.
pub fn solve_setup<R>(setup: &GameSetup, options: &ParOptions, rng: &mut R) -> GameSetup
where
    R: Rng + ?Sized,
{
    let info = calculate_par(setup, options, rng);
    setup.clone().with_solutions(info.possible_solutions)
}

/// Maps a par value and the number of shortest solutions to a difficulty.
#[must_use]
pub fn rate_difficulty(par: usize, solution_count: usize) -> Difficulty {
    let base = match par {
        0..=2 => Difficulty::Easy,
        3 => Difficulty::Medium,
        4 => Difficulty::Hard,
        _ => Difficulty::Extreme,
    };

    if solution_count >= CROWDED_SOLUTIONS {
        base.easier()
    } else {
        base
    }
}

struct Search<'a> {
    setup: &'a GameSetup,
    return_all: bool,
    bound: usize,
    path: Vec<TurnMove>,
    solutions: Vec<Vec<TurnMove>>,
    visited: usize,
}

impl Search<'_> {
    fn explore<R>(&mut self, positions: GameElementPositions, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        self.visited += 1;

        let view = self.view(&positions);
        if is_won(&view) {
            self.record();
            return;
        }
        if has_moon_set(&view) || self.path.len() >= self.bound {
            return;
        }

        let mut candidates = TurnMove::ALL;
        candidates.shuffle(rng);

        for turn_move in candidates {
            // A solution found in a sibling branch may have tightened the bound.
            if self.path.len() >= self.bound {
                break;
            }

            let view = self.view(&positions);
            let Ok(validated) = validate_move(&view, turn_move) else {
                continue;
            };
            let next = calculate_new_positions(&view, validated);

            self.path.push(turn_move);
            self.explore(next, rng);
            let _ = self.path.pop();
        }
    }

    fn view<'v>(&'v self, positions: &'v GameElementPositions) -> GameView<'v> {
        GameView::new(
            self.setup.field_size(),
            *self.setup.config(),
            positions,
            &self.path,
        )
    }

    fn record(&mut self) {
        let length = self.path.len();
        if self
            .solutions
            .first()
            .is_some_and(|best| best.len() > length)
        {
            self.solutions.clear();
        }
        self.solutions.push(self.path.clone());

        self.bound = if self.return_all {
            length
        } else {
            length.saturating_sub(1)
        };
    }
}
