use kitten_rescue_core::{
    CatId, CellPosition, Config, Direction, FieldSize, GameElementPositions, GameSetup, GameView,
    KittenId, ObjectId, TurnMove, FALLBACK_PAR,
};
use kitten_rescue_system_turn::{has_moon_set, is_lost, is_won, par_for};

fn move_limited() -> Config {
    let mut config = Config::default();
    config.constraints.move_limit = true;
    config
}

#[test]
fn reunited_cats_win_even_with_a_disabled_kitten_elsewhere() {
    let home = CellPosition::new(1, 1);
    let positions = GameElementPositions::empty()
        .with(CatId::Mother, home)
        .with(KittenId::Moony, home)
        .with(KittenId::Ivy, home)
        .with(KittenId::Splashy, CellPosition::new(4, 4));
    let mut config = Config::default();

    let view = GameView::new(FieldSize::Five, config, &positions, &[]);
    assert!(!is_won(&view));

    config.kittens.splashy = false;
    let view = GameView::new(FieldSize::Five, config, &positions, &[]);
    assert!(is_won(&view));
}

#[test]
fn a_lone_mother_has_already_won() {
    let positions = GameElementPositions::empty().with(CatId::Mother, CellPosition::new(0, 0));
    let view = GameView::new(FieldSize::Three, Config::default(), &positions, &[]);

    assert!(is_won(&view));
}

#[test]
fn moon_sets_once_it_leaves_the_last_column() {
    let visible = GameElementPositions::empty()
        .with(CatId::Mother, CellPosition::new(0, 0))
        .with(ObjectId::Moon, CellPosition::new(0, 2));
    let gone = visible.with(ObjectId::Moon, CellPosition::new(0, 3));

    let view = GameView::new(FieldSize::Three, move_limited(), &visible, &[]);
    assert!(!has_moon_set(&view));
    let view = GameView::new(FieldSize::Three, move_limited(), &gone, &[]);
    assert!(has_moon_set(&view));
}

#[test]
fn exceeding_par_loses_only_under_the_move_limit() {
    let positions = GameElementPositions::empty()
        .with(CatId::Mother, CellPosition::new(0, 0))
        .with(KittenId::Ivy, CellPosition::new(2, 2));
    let moves = [TurnMove::Direction(Direction::Down); 3];

    let view = GameView::new(FieldSize::Three, move_limited(), &positions, &moves[..2]);
    assert!(!is_lost(&view, 2));
    let view = GameView::new(FieldSize::Three, move_limited(), &positions, &moves);
    assert!(is_lost(&view, 2));
    let view = GameView::new(FieldSize::Three, Config::default(), &positions, &moves);
    assert!(!is_lost(&view, 2));
}

#[test]
fn moon_setting_loses_before_par_runs_out() {
    let positions = GameElementPositions::empty()
        .with(CatId::Mother, CellPosition::new(0, 0))
        .with(KittenId::Ivy, CellPosition::new(2, 2))
        .with(ObjectId::Moon, CellPosition::new(1, 3));
    let view = GameView::new(FieldSize::Three, move_limited(), &positions, &[]);

    assert!(is_lost(&view, 5));
}

#[test]
fn a_won_game_is_never_lost() {
    let home = CellPosition::new(1, 1);
    let positions = GameElementPositions::empty()
        .with(CatId::Mother, home)
        .with(KittenId::Ivy, home)
        .with(ObjectId::Moon, CellPosition::new(1, 3));
    let moves = [TurnMove::Direction(Direction::Down); 4];
    let view = GameView::new(FieldSize::Three, move_limited(), &positions, &moves);

    assert!(!is_lost(&view, 1));
}

#[test]
fn par_falls_back_without_solutions() {
    let positions = GameElementPositions::empty().with(CatId::Mother, CellPosition::new(0, 0));
    let setup =
        GameSetup::new(FieldSize::Three, positions, Config::default()).expect("valid setup");
    assert_eq!(par_for(&setup), FALLBACK_PAR);

    let solved = setup.with_solutions(vec![
        vec![TurnMove::Direction(Direction::Down); 3],
        vec![TurnMove::Direction(Direction::Right); 2],
    ]);
    assert_eq!(par_for(&solved), 2);
}
