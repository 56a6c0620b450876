//! Per-kitten autonomous behaviour.

use kitten_rescue_core::{CatId, CellPosition, GameView, KittenId, ObjectId};

use crate::{is_valid_cell_position, move_cat_towards_cell};

/// Cells around the tree in clockwise order, starting top-left.
const TREE_RING: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
];

/// Cell the kitten wants to move to this turn, ignoring the mother.
///
/// Disabled kittens and kittens whose landmark is missing stay where they are.
/// Returns `None` only when the kitten is not on the board.
#[must_use]
pub fn autonomous_candidate(view: &GameView<'_>, kitten: KittenId) -> Option<CellPosition> {
    let current = view.position(kitten)?;
    if !view.config().kitten_enabled(kitten) {
        return Some(current);
    }

    let cat = CatId::Kitten(kitten);
    match kitten {
        KittenId::Moony => match view.position(ObjectId::Moon) {
            Some(moon) => move_cat_towards_cell(view, cat, moon),
            None => Some(current),
        },
        KittenId::Splashy => match view.position(ObjectId::Puddle) {
            Some(puddle) => move_cat_towards_cell(view, cat, puddle),
            None => Some(current),
        },
        KittenId::Ivy => {
            let Some(tree) = view.position(ObjectId::Tree) else {
                return Some(current);
            };
            match ring_index(tree, current) {
                Some(index) => Some(circle_tree(view, tree, current, index)),
                None => move_cat_towards_cell(view, cat, tree),
            }
        }
    }
}

/// Resolves a free kitten's move for a turn in which the mother walked from
/// `mother_from` to `mother_to`.
///
/// A kitten that would trade cells with the mother stays put instead, so the
/// two pieces never pass through each other.
#[must_use]
pub fn kitten_step(
    view: &GameView<'_>,
    kitten: KittenId,
    mother_from: CellPosition,
    mother_to: CellPosition,
) -> Option<CellPosition> {
    let current = view.position(kitten)?;
    let candidate = autonomous_candidate(view, kitten)?;

    if candidate == mother_from && current == mother_to {
        return Some(current);
    }

    Some(candidate)
}

fn ring_index(tree: CellPosition, cell: CellPosition) -> Option<usize> {
    TREE_RING.iter().position(|(row_delta, column_delta)| {
        tree.offset_by(*row_delta, *column_delta) == Some(cell)
    })
}

/// Next clockwise cell around the tree. Off-board ring cells are skipped as
/// long as the next usable cell is still adjacent; otherwise Ivy waits.
fn circle_tree(
    view: &GameView<'_>,
    tree: CellPosition,
    current: CellPosition,
    index: usize,
) -> CellPosition {
    let ivy = KittenId::Ivy.into();
    for step in 1..TREE_RING.len() {
        let (row_delta, column_delta) = TREE_RING[(index + step) % TREE_RING.len()];
        let Some(cell) = tree.offset_by(row_delta, column_delta) else {
            continue;
        };
        if !is_valid_cell_position(view, cell, ivy) {
            continue;
        }
        if cell.max_axis_distance(current) == 1 {
            return cell;
        }
        break;
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_index_follows_clockwise_order() {
        let tree = CellPosition::new(2, 2);
        assert_eq!(ring_index(tree, CellPosition::new(1, 1)), Some(0));
        assert_eq!(ring_index(tree, CellPosition::new(2, 3)), Some(3));
        assert_eq!(ring_index(tree, CellPosition::new(2, 1)), Some(7));
        assert_eq!(ring_index(tree, CellPosition::new(0, 0)), None);
        assert_eq!(ring_index(tree, tree), None);
    }
}
