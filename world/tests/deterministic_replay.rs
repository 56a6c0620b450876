use kitten_rescue_core::{
    CatId, CellPosition, Command, Config, Direction, Event, FieldSize, GameElementPositions,
    GameSetup, KittenId, ObjectId, Tool, TurnMove,
};
use kitten_rescue_world::{self as world, query, GameState};

#[test]
fn deterministic_replay_produces_identical_logs() {
    let first = replay(scripted_commands());
    let second = replay(scripted_commands());

    assert_eq!(first, second, "replay diverged between runs");
    assert!(!first.events.is_empty());
}

#[test]
fn committed_positions_match_the_resolved_turn() {
    let mut state = GameState::new(busy_setup());
    let mut events = Vec::new();
    world::apply(&mut state, Command::Retry, &mut events);

    for turn_move in scripted_moves() {
        events.clear();
        world::apply(&mut state, Command::SubmitMove { turn_move }, &mut events);
        let pending = events.iter().find_map(|event| match event {
            Event::TurnResolved { to, .. } => Some(*to),
            _ => None,
        });
        world::apply(&mut state, Command::CommitTurn, &mut events);

        if let Some(pending) = pending {
            assert_eq!(query::positions(&state), &pending);
        }
    }
}

#[test]
fn replaying_the_move_log_reaches_the_same_positions() {
    let outcome = replay(scripted_commands());

    let mut fresh = GameState::new(busy_setup());
    for turn_move in outcome.moves.iter().copied() {
        let mut events = Vec::new();
        world::apply(&mut fresh, Command::SubmitMove { turn_move }, &mut events);
        world::apply(&mut fresh, Command::CommitTurn, &mut events);
    }

    assert_eq!(query::positions(&fresh), &outcome.positions);
    assert_eq!(query::moves(&fresh), outcome.moves.as_slice());
}

#[test]
fn flooding_submissions_resolves_a_single_turn() {
    let mut state = GameState::new(busy_setup());
    let mut events = Vec::new();

    for turn_move in scripted_moves() {
        world::apply(&mut state, Command::SubmitMove { turn_move }, &mut events);
    }
    world::apply(&mut state, Command::CommitTurn, &mut events);

    let resolved = events
        .iter()
        .filter(|event| matches!(event, Event::TurnResolved { .. }))
        .count();
    assert_eq!(resolved, 1);
    assert_eq!(query::moves(&state).len(), 1);
}

#[derive(Debug, PartialEq)]
struct ReplayOutcome {
    positions: GameElementPositions,
    moves: Vec<TurnMove>,
    events: Vec<Event>,
}

fn replay(commands: Vec<Command>) -> ReplayOutcome {
    let mut state = GameState::new(busy_setup());
    let mut log = Vec::new();

    for command in commands {
        let mut events = Vec::new();
        world::apply(&mut state, command, &mut events);
        log.extend(events);
    }

    ReplayOutcome {
        positions: *query::positions(&state),
        moves: query::moves(&state).to_vec(),
        events: log,
    }
}

fn busy_setup() -> GameSetup {
    let positions = GameElementPositions::empty()
        .with(CatId::Mother, CellPosition::new(4, 0))
        .with(KittenId::Moony, CellPosition::new(0, 4))
        .with(KittenId::Ivy, CellPosition::new(1, 2))
        .with(KittenId::Splashy, CellPosition::new(4, 4))
        .with(ObjectId::Moon, CellPosition::new(0, 1))
        .with(ObjectId::Tree, CellPosition::new(2, 2))
        .with(ObjectId::Puddle, CellPosition::new(3, 3));
    let mut config = Config::default();
    config.constraints.move_limit = true;
    GameSetup::new(FieldSize::Five, positions, config).expect("valid setup")
}

fn scripted_moves() -> Vec<TurnMove> {
    vec![
        Direction::Up.into(),
        Direction::Right.into(),
        Tool::Meow.into(),
        Direction::Right.into(),
        Tool::Meow.into(),
        Direction::Left.into(),
        Direction::Up.into(),
        Tool::Meow.into(),
    ]
}

fn scripted_commands() -> Vec<Command> {
    let mut commands = vec![Command::Retry];
    for turn_move in scripted_moves() {
        commands.push(Command::SubmitMove { turn_move });
        commands.push(Command::SubmitMove { turn_move });
        commands.push(Command::CommitTurn);
    }
    commands.push(Command::Retry);
    commands.extend(
        scripted_moves()
            .into_iter()
            .take(3)
            .flat_map(|turn_move| [Command::SubmitMove { turn_move }, Command::CommitTurn]),
    );
    commands
}
