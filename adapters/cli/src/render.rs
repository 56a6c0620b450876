use std::fmt::Write as _;

use kitten_rescue_core::{CellPosition, GameElementId, GameView, Representations};
use kitten_rescue_system_turn::has_moon_set;

const CELL_WIDTH: usize = 4;
const EMPTY_CELL: &str = ".";

/// Draws the board as text, one line per row.
///
/// Cells list the glyph of every piece standing on them, objects first.
#[must_use]
pub(crate) fn render_board(view: &GameView<'_>, representations: &Representations) -> String {
    let size = view.field_size().get();
    let mut board = String::new();

    for row in 0..size {
        let line: String = (0..size)
            .map(|column| {
                let glyphs = occupant_glyphs(view, representations, CellPosition::new(row, column));
                let cell = if glyphs.is_empty() {
                    EMPTY_CELL.to_owned()
                } else {
                    glyphs
                };
                format!("{cell:<width$}", width = CELL_WIDTH)
            })
            .collect();
        board.push_str(line.trim_end());
        board.push('\n');
    }

    if has_moon_set(view) {
        board.push_str("the moon has set\n");
    }
    board
}

/// One-line key mapping glyphs to piece names.
#[must_use]
pub(crate) fn legend(representations: &Representations) -> String {
    let mut legend = String::new();
    for element in GameElementId::ALL {
        if !legend.is_empty() {
            legend.push_str("  ");
        }
        let _ = write!(legend, "{} {element}", representations.glyph(element));
    }
    legend
}

fn occupant_glyphs(
    view: &GameView<'_>,
    representations: &Representations,
    cell: CellPosition,
) -> String {
    GameElementId::ALL
        .into_iter()
        .filter(|element| view.position(*element) == Some(cell))
        .map(|element| representations.glyph(element))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kitten_rescue_core::{
        CatId, Config, FieldSize, GameElementPositions, KittenId, ObjectId,
    };

    #[test]
    fn draws_stacked_pieces_in_one_cell() {
        let positions = GameElementPositions::empty()
            .with(ObjectId::Tree, CellPosition::new(0, 1))
            .with(ObjectId::Puddle, CellPosition::new(2, 2))
            .with(CatId::Mother, CellPosition::new(1, 0))
            .with(KittenId::Moony, CellPosition::new(1, 0))
            .with(KittenId::Splashy, CellPosition::new(2, 2));
        let view = GameView::new(FieldSize::Three, Config::default(), &positions, &[]);

        let board = render_board(&view, &Representations::default());

        assert_eq!(board, ".   T   .\nMy  .   .\n.   .   ps\n");
    }

    #[test]
    fn reports_a_set_moon() {
        let positions = GameElementPositions::empty()
            .with(CatId::Mother, CellPosition::new(0, 0))
            .with(ObjectId::Moon, CellPosition::new(1, 3));
        let view = GameView::new(FieldSize::Three, Config::default(), &positions, &[]);

        let board = render_board(&view, &Representations::default());

        assert!(board.ends_with("the moon has set\n"));
        assert!(!board.lines().take(3).any(|line| line.contains('o')));
    }

    #[test]
    fn legend_names_every_piece() {
        let legend = legend(&Representations::default());

        assert_eq!(
            legend,
            "o moon  T tree  p puddle  M mother  y Moony  i Ivy  s Splashy"
        );
    }
}
