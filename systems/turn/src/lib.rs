#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure turn resolution: move validation, next-position computation and
//! terminal condition checks.
//!
//! The resolver never re-validates. Callers obtain a [`ValidatedMove`] from
//! [`validate_move`] and hand it to [`calculate_new_positions`]; there is no
//! other way to build one.

mod checks;

pub use checks::{has_moon_set, is_lost, is_won, par_for};

use kitten_rescue_core::{
    CatId, CellPosition, ConstraintId, GameElementPositions, GameView, KittenId, MoveRejection,
    ObjectId, Tool, TurnMove,
};
use kitten_rescue_system_movement::{
    is_valid_cell_position, kitten_step, move_cat_in_direction, move_cat_towards_cell,
};

/// A move that passed [`validate_move`] for the view it was checked against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValidatedMove(TurnMove);

impl ValidatedMove {
    /// Move that was validated.
    #[must_use]
    pub const fn get(&self) -> TurnMove {
        self.0
    }
}

/// Checks the move against the view, producing a [`ValidatedMove`] on success.
///
/// Tools must be enabled and recovered. Directions must keep the mother on the
/// board and off the tree; kittens never block her.
pub fn validate_move(
    view: &GameView<'_>,
    turn_move: TurnMove,
) -> Result<ValidatedMove, MoveRejection> {
    let mother = view
        .position(CatId::Mother)
        .ok_or(MoveRejection::MotherMissing)?;

    match turn_move {
        TurnMove::Tool(tool) => {
            if !view.config().tool_enabled(tool) {
                return Err(MoveRejection::ToolDisabled);
            }
            let remaining_turns = tool_recovery_remaining(view.moves(), tool);
            if remaining_turns > 0 {
                return Err(MoveRejection::ToolRecovering { remaining_turns });
            }
        }
        TurnMove::Direction(direction) => {
            let (row_delta, column_delta) = direction.offset();
            let candidate = mother
                .offset_by(row_delta, column_delta)
                .filter(|cell| view.field_size().contains(*cell))
                .ok_or(MoveRejection::OutOfBounds)?;
            if !is_valid_cell_position(view, candidate, CatId::Mother.into()) {
                return Err(MoveRejection::Blocked);
            }
        }
    }

    Ok(ValidatedMove(turn_move))
}

/// Convenience wrapper around [`validate_move`] for enabling input controls.
#[must_use]
pub fn is_valid_move(view: &GameView<'_>, turn_move: TurnMove) -> bool {
    validate_move(view, turn_move).is_ok()
}

/// Number of turns that still have to pass before the tool can be used again.
#[must_use]
pub fn tool_recovery_remaining(moves: &[TurnMove], tool: Tool) -> usize {
    let Some(last_use) = moves
        .iter()
        .rposition(|turn_move| *turn_move == TurnMove::Tool(tool))
    else {
        return 0;
    };
    let turns_since = moves.len() - last_use - 1;
    tool.recovery_turns().saturating_sub(turns_since)
}

/// Computes every element's position after the move.
///
/// Kittens sharing the mother's cell are carried along with her. A meow pulls
/// every other kitten one step toward the mother, who stays put. A direction
/// walks the mother and lets every free kitten follow its own behaviour. The
/// moon drifts right when the move limit is active.
#[must_use]
pub fn calculate_new_positions(
    view: &GameView<'_>,
    validated: ValidatedMove,
) -> GameElementPositions {
    let previous = *view.positions();
    let Some(mother_from) = previous.get(CatId::Mother) else {
        tracing::warn!(turn_move = %validated.get(), "mother missing; positions left unchanged");
        return previous;
    };

    let config = view.config();
    let (carried, free): (Vec<KittenId>, Vec<KittenId>) = KittenId::ALL
        .into_iter()
        .filter(|kitten| config.kitten_enabled(*kitten) && previous.get(*kitten).is_some())
        .partition(|kitten| previous.get(*kitten) == Some(mother_from));

    let mut next = previous;
    match validated.get() {
        TurnMove::Tool(Tool::Meow) => {
            for kitten in free {
                next.set(
                    kitten,
                    move_cat_towards_cell(view, CatId::Kitten(kitten), mother_from),
                );
            }
        }
        TurnMove::Direction(direction) => {
            let mother_to =
                move_cat_in_direction(view, CatId::Mother, direction).unwrap_or(mother_from);
            next.set(CatId::Mother, Some(mother_to));
            for kitten in carried {
                next.set(kitten, Some(mother_to));
            }
            for kitten in free {
                next.set(kitten, kitten_step(view, kitten, mother_from, mother_to));
            }
        }
    }

    if config.constraint_enabled(ConstraintId::MoveLimit) {
        if let Some(moon) = previous.get(ObjectId::Moon) {
            let column = moon
                .column()
                .saturating_add(1)
                .min(view.field_size().get());
            next.set(ObjectId::Moon, Some(CellPosition::new(moon.row(), column)));
        }
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use kitten_rescue_core::Direction;

    #[test]
    fn unused_tools_are_ready() {
        assert_eq!(tool_recovery_remaining(&[], Tool::Meow), 0);
        let moves = [TurnMove::Direction(Direction::Up)];
        assert_eq!(tool_recovery_remaining(&moves, Tool::Meow), 0);
    }

    #[test]
    fn meow_recovers_after_two_turns() {
        let meow = TurnMove::Tool(Tool::Meow);
        let up = TurnMove::Direction(Direction::Up);

        assert_eq!(tool_recovery_remaining(&[meow], Tool::Meow), 2);
        assert_eq!(tool_recovery_remaining(&[meow, up], Tool::Meow), 1);
        assert_eq!(tool_recovery_remaining(&[meow, up, up], Tool::Meow), 0);
        assert_eq!(tool_recovery_remaining(&[meow, up, up, meow], Tool::Meow), 2);
    }
}
