#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Random setup generation backed by the par solver.
//!
//! Candidates are rejected until one lands inside the par window and matches
//! the requested difficulty. Generation never fails: it settles for the first
//! in-window candidate, and failing that for [`default_setup`].

use kitten_rescue_core::{
    CatId, CellPosition, Config, Difficulty, FieldSize, GameElementId, GameElementPositions,
    GameSetup, KittenId, ObjectId, SetupError, GENERATION_ATTEMPTS, MAX_PAR, MIN_PAR,
};
use kitten_rescue_system_par::{calculate_par, ParInfo, ParOptions};
use rand::{seq::SliceRandom, Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Parameters accepted by the generator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    /// Board to generate for.
    pub field_size: FieldSize,
    /// Toggles applied to the generated setup.
    pub config: Config,
    /// Required difficulty; any in-window difficulty is accepted when unset.
    pub difficulty: Option<Difficulty>,
    /// Attach every shortest solution rather than a single one.
    pub return_all_solutions: bool,
}

/// A generated setup together with the solver's verdict on it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedSetup {
    /// Setup with its solutions attached.
    pub setup: GameSetup,
    /// Solver output for the setup.
    pub par_info: ParInfo,
    /// Number of candidates that were evaluated.
    pub attempts: usize,
    /// Whether the generator gave up on the requested constraints.
    pub fell_back: bool,
}

/// Generates a solvable setup from the provided RNG.
pub fn generate_setup<R>(options: &GenerationOptions, rng: &mut R) -> GeneratedSetup
where
    R: Rng + ?Sized,
{
    let par_options = ParOptions {
        return_all_solutions: options.return_all_solutions,
        ..ParOptions::default()
    };
    let mut fallback: Option<(GameSetup, ParInfo)> = None;

    for attempt in 1..=GENERATION_ATTEMPTS {
        let candidate = match random_setup(options.field_size, options.config, rng) {
            Ok(candidate) => candidate,
            Err(error) => {
                tracing::warn!(attempt, %error, "discarding invalid candidate");
                continue;
            }
        };
        let par_info = calculate_par(&candidate, &par_options, rng);

        if !(MIN_PAR..=MAX_PAR).contains(&par_info.par) {
            tracing::debug!(attempt, par = par_info.par, "candidate outside the par window");
            continue;
        }
        if options
            .difficulty
            .is_some_and(|wanted| wanted != par_info.difficulty)
        {
            tracing::debug!(
                attempt,
                difficulty = %par_info.difficulty,
                "candidate has the wrong difficulty"
            );
            if fallback.is_none() {
                fallback = Some((candidate, par_info));
            }
            continue;
        }

        tracing::info!(
            attempt,
            par = par_info.par,
            difficulty = %par_info.difficulty,
            "setup generated"
        );
        return finish(candidate, par_info, attempt, false);
    }

    if let Some((candidate, par_info)) = fallback {
        tracing::info!(
            par = par_info.par,
            "no candidate matched the difficulty; using the first in-window setup"
        );
        return finish(candidate, par_info, GENERATION_ATTEMPTS, true);
    }

    tracing::warn!(
        attempts = GENERATION_ATTEMPTS,
        "no candidate landed inside the par window; using the default setup"
    );
    let setup = default_setup();
    let par_info = calculate_par(&setup, &par_options, rng);
    finish(setup, par_info, GENERATION_ATTEMPTS, true)
}

/// Generates a setup from a reproducible seed.
#[must_use]
pub fn generate_seeded(options: &GenerationOptions, seed: u64) -> GeneratedSetup {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    generate_setup(options, &mut rng)
}

/// Built-in 5x5 puzzle used when generation gives up.
#[must_use]
pub fn default_setup() -> GameSetup {
    let positions = GameElementPositions::empty()
        .with(ObjectId::Tree, CellPosition::new(0, 2))
        .with(ObjectId::Puddle, CellPosition::new(2, 1))
        .with(ObjectId::Moon, CellPosition::new(2, 3))
        .with(CatId::Mother, CellPosition::new(2, 2))
        .with(KittenId::Moony, CellPosition::new(2, 3))
        .with(KittenId::Splashy, CellPosition::new(2, 1))
        .with(KittenId::Ivy, CellPosition::new(1, 2));

    GameSetup::new(FieldSize::Five, positions, Config::default())
        .expect("built-in setup is valid")
}

fn finish(setup: GameSetup, par_info: ParInfo, attempts: usize, fell_back: bool) -> GeneratedSetup {
    GeneratedSetup {
        setup: setup.with_solutions(par_info.possible_solutions.clone()),
        par_info,
        attempts,
        fell_back,
    }
}

/// Places every enabled element on its own random cell.
fn random_setup<R>(
    field_size: FieldSize,
    config: Config,
    rng: &mut R,
) -> Result<GameSetup, SetupError>
where
    R: Rng + ?Sized,
{
    let mut cells: Vec<CellPosition> = field_size.cells().collect();
    cells.shuffle(rng);

    let placed = GameElementId::ALL.into_iter().filter(|id| match id {
        GameElementId::Object(object) => config.object_enabled(*object),
        GameElementId::Cat(CatId::Mother) => true,
        GameElementId::Cat(CatId::Kitten(kitten)) => config.kitten_enabled(*kitten),
    });

    let positions = placed
        .zip(cells)
        .fold(GameElementPositions::empty(), |positions, (id, cell)| {
            positions.with(id, cell)
        });

    GameSetup::new(field_size, positions, config)
}
