//! Terminal condition checks evaluated after every committed turn.

use kitten_rescue_core::{
    CatId, ConstraintId, GameSetup, GameView, KittenId, ObjectId, FALLBACK_PAR,
};

/// Reports whether the mother and every enabled kitten share one cell.
///
/// Disabled kittens are ignored wherever they stand.
#[must_use]
pub fn is_won(view: &GameView<'_>) -> bool {
    let Some(mother) = view.position(CatId::Mother) else {
        return false;
    };

    KittenId::ALL
        .into_iter()
        .filter(|kitten| view.config().kitten_enabled(*kitten))
        .filter_map(|kitten| view.position(kitten))
        .all(|position| position == mother)
}

/// Reports whether the moon drifted past the last visible column.
#[must_use]
pub fn has_moon_set(view: &GameView<'_>) -> bool {
    view.position(ObjectId::Moon)
        .is_some_and(|moon| moon.column() >= view.field_size().get())
}

/// Reports whether the move limit ran out before the kittens were reunited.
#[must_use]
pub fn is_lost(view: &GameView<'_>, par: usize) -> bool {
    if !view.config().constraint_enabled(ConstraintId::MoveLimit) || is_won(view) {
        return false;
    }

    view.moves().len() > par || has_moon_set(view)
}

/// Par shown to the player: the shortest known solution, or [`FALLBACK_PAR`].
#[must_use]
pub fn par_for(setup: &GameSetup) -> usize {
    setup
        .possible_solutions()
        .first()
        .map_or(FALLBACK_PAR, Vec::len)
}
