use kitten_rescue_core::{
    CatId, CellPosition, Config, Direction, FieldSize, GameElementId, GameElementPositions,
    GameView, KittenId, ObjectId,
};
use kitten_rescue_system_movement::{
    is_valid_cell_position, move_cat_in_direction, move_cat_towards_cell,
};

fn view<'a>(field_size: FieldSize, positions: &'a GameElementPositions) -> GameView<'a> {
    GameView::new(field_size, Config::default(), positions, &[])
}

#[test]
fn tree_and_off_board_cells_are_the_only_invalid_cells() {
    let tree = CellPosition::new(1, 1);
    let positions = GameElementPositions::empty()
        .with(CatId::Mother, CellPosition::new(2, 2))
        .with(ObjectId::Tree, tree);
    let view = view(FieldSize::Four, &positions);
    let mother = GameElementId::Cat(CatId::Mother);

    for row in 0..6u8 {
        for column in 0..6u8 {
            let cell = CellPosition::new(row, column);
            let expected = row < 4 && column < 4 && cell != tree;
            assert_eq!(
                is_valid_cell_position(&view, cell, mother),
                expected,
                "unexpected validity for {cell}"
            );
        }
    }
}

#[test]
fn occupied_cells_remain_valid() {
    let positions = GameElementPositions::empty()
        .with(CatId::Mother, CellPosition::new(2, 2))
        .with(KittenId::Ivy, CellPosition::new(2, 3));
    let view = view(FieldSize::Five, &positions);

    assert!(is_valid_cell_position(
        &view,
        CellPosition::new(2, 3),
        CatId::Mother.into()
    ));
}

#[test]
fn direction_moves_never_leave_the_board() {
    for field_size in FieldSize::ALL {
        for cell in field_size.cells() {
            let positions = GameElementPositions::empty().with(CatId::Mother, cell);
            let view = view(field_size, &positions);
            for direction in Direction::ALL {
                let next = move_cat_in_direction(&view, CatId::Mother, direction)
                    .expect("mother is present");
                assert!(field_size.contains(next), "{cell} {direction:?} left the board");
                assert!(next.manhattan_distance(cell) <= 1);
            }
        }
    }
}

#[test]
fn direction_moves_into_the_tree_stay_put() {
    let mother = CellPosition::new(2, 2);
    let positions = GameElementPositions::empty()
        .with(CatId::Mother, mother)
        .with(ObjectId::Tree, CellPosition::new(2, 3));
    let view = view(FieldSize::Five, &positions);

    assert_eq!(
        move_cat_in_direction(&view, CatId::Mother, Direction::Right),
        Some(mother)
    );
    assert_eq!(
        move_cat_in_direction(&view, CatId::Mother, Direction::Up),
        Some(CellPosition::new(1, 2))
    );
}

#[test]
fn absent_cats_do_not_move() {
    let positions = GameElementPositions::empty().with(CatId::Mother, CellPosition::new(0, 0));
    let view = view(FieldSize::Three, &positions);

    assert_eq!(
        move_cat_in_direction(&view, KittenId::Moony.into(), Direction::Down),
        None
    );
    assert_eq!(
        move_cat_towards_cell(&view, KittenId::Moony.into(), CellPosition::new(1, 1)),
        None
    );
}

#[test]
fn towards_cell_takes_exactly_one_step_on_a_straight_line() {
    let positions = GameElementPositions::empty()
        .with(CatId::Mother, CellPosition::new(2, 3))
        .with(KittenId::Splashy, CellPosition::new(2, 0));
    let view = view(FieldSize::Five, &positions);

    assert_eq!(
        move_cat_towards_cell(&view, KittenId::Splashy.into(), CellPosition::new(2, 3)),
        Some(CellPosition::new(2, 1))
    );
}

#[test]
fn towards_cell_prefers_diagonal_approach() {
    let positions = GameElementPositions::empty()
        .with(CatId::Mother, CellPosition::new(4, 4))
        .with(KittenId::Moony, CellPosition::new(0, 0));
    let view = view(FieldSize::Five, &positions);

    assert_eq!(
        move_cat_towards_cell(&view, KittenId::Moony.into(), CellPosition::new(2, 2)),
        Some(CellPosition::new(1, 1))
    );
}

#[test]
fn towards_cell_breaks_ties_by_row_then_column() {
    let positions = GameElementPositions::empty()
        .with(CatId::Mother, CellPosition::new(4, 4))
        .with(KittenId::Moony, CellPosition::new(2, 0))
        .with(ObjectId::Tree, CellPosition::new(2, 1));
    let view = view(FieldSize::Five, &positions);

    assert_eq!(
        move_cat_towards_cell(&view, KittenId::Moony.into(), CellPosition::new(2, 2)),
        Some(CellPosition::new(1, 1))
    );
}

#[test]
fn towards_cell_steps_around_a_target_on_the_tree() {
    // The moon drifted onto the tree's cell.
    let target = CellPosition::new(2, 2);
    let positions = GameElementPositions::empty()
        .with(CatId::Mother, CellPosition::new(4, 4))
        .with(KittenId::Moony, CellPosition::new(2, 1))
        .with(ObjectId::Tree, target);
    let view = view(FieldSize::Five, &positions);

    assert_eq!(
        move_cat_towards_cell(&view, KittenId::Moony.into(), target),
        Some(CellPosition::new(1, 2))
    );
}

#[test]
fn towards_cell_moves_even_when_no_neighbor_is_closer() {
    // The moon has drifted past the right edge.
    let positions = GameElementPositions::empty()
        .with(CatId::Mother, CellPosition::new(2, 0))
        .with(KittenId::Moony, CellPosition::new(1, 2));
    let view = view(FieldSize::Three, &positions);

    assert_eq!(
        move_cat_towards_cell(&view, KittenId::Moony.into(), CellPosition::new(1, 3)),
        Some(CellPosition::new(0, 2))
    );
}

#[test]
fn towards_cell_at_target_is_a_no_op() {
    let kitten = CellPosition::new(3, 3);
    let positions = GameElementPositions::empty()
        .with(CatId::Mother, CellPosition::new(0, 0))
        .with(KittenId::Splashy, kitten);
    let view = view(FieldSize::Five, &positions);

    assert_eq!(
        move_cat_towards_cell(&view, KittenId::Splashy.into(), kitten),
        Some(kitten)
    );
}
