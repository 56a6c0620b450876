#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic movement rules that compute single-step cat moves.
//!
//! Every function here is pure: it reads a [`GameView`] and returns the cell a
//! cat would occupy, leaving committing the result to the caller. Neighbor
//! ordering is fixed so that the turn resolver and the par solver always agree
//! on where a kitten goes.

mod behavior;

pub use behavior::{autonomous_candidate, kitten_step};

use kitten_rescue_core::{CatId, CellPosition, Direction, GameElementId, GameView, ObjectId};

/// Offsets of the eight surrounding cells in row-major order.
const NEIGHBOR_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Reports whether the element may stand on the provided cell.
///
/// Cells off the board are invalid, and so is the tree's cell for every
/// element other than the tree itself. Other pieces never block a cell:
/// sharing a cell is how the mother picks kittens up.
#[must_use]
pub fn is_valid_cell_position(
    view: &GameView<'_>,
    position: CellPosition,
    moving_element: GameElementId,
) -> bool {
    if !view.field_size().contains(position) {
        return false;
    }

    let tree = GameElementId::Object(ObjectId::Tree);
    moving_element == tree || view.position(tree) != Some(position)
}

/// Cell the cat reaches by taking one step in the direction.
///
/// Returns the current cell when the step would be invalid, and `None` only
/// when the cat is not on the board.
#[must_use]
pub fn move_cat_in_direction(
    view: &GameView<'_>,
    cat: CatId,
    direction: Direction,
) -> Option<CellPosition> {
    let current = view.position(cat)?;
    let (row_delta, column_delta) = direction.offset();
    let next = current
        .offset_by(row_delta, column_delta)
        .filter(|cell| is_valid_cell_position(view, *cell, cat.into()))
        .unwrap_or(current);
    Some(next)
}

/// Cell the cat reaches by taking one greedy step toward the target.
///
/// Neighbors (diagonals included) are ranked by Manhattan distance to the
/// target, then by the larger axis distance so balanced approaches win, then
/// by row and column. The cat always takes the best valid neighbor, even one
/// no closer than its current cell, and stays put only when none is valid.
#[must_use]
pub fn move_cat_towards_cell(
    view: &GameView<'_>,
    cat: CatId,
    target: CellPosition,
) -> Option<CellPosition> {
    let current = view.position(cat)?;
    if current == target {
        return Some(current);
    }

    let best = neighbors(current)
        .filter(|cell| is_valid_cell_position(view, *cell, cat.into()))
        .min_by_key(|cell| {
            (
                cell.manhattan_distance(target),
                cell.max_axis_distance(target),
                cell.row(),
                cell.column(),
            )
        });

    Some(best.unwrap_or(current))
}

fn neighbors(cell: CellPosition) -> impl Iterator<Item = CellPosition> {
    NEIGHBOR_OFFSETS
        .into_iter()
        .filter_map(move |(row_delta, column_delta)| cell.offset_by(row_delta, column_delta))
}
