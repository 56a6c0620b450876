#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative game state management for Kitten Rescue.

use kitten_rescue_core::{
    Command, Event, GameElementPositions, GameSetup, GameView, MoveRejection, Representations,
    TurnMove,
};
use kitten_rescue_system_turn::{calculate_new_positions, is_lost, is_won, par_for, validate_move};

/// Progress of the turn currently being played.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnPhase {
    /// Waiting for the next move.
    Idle,
    /// A move was resolved and awaits [`Command::CommitTurn`].
    ResolvingTurn {
        /// Move being resolved.
        turn_move: TurnMove,
        /// Positions that become current once the turn is committed.
        pending: GameElementPositions,
    },
}

/// Terminal result of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Every enabled kitten is back with the mother.
    Won,
    /// The move limit ran out first.
    Lost,
}

/// Represents the authoritative state of one game.
#[derive(Clone, Debug)]
pub struct GameState {
    setup: GameSetup,
    current_positions: GameElementPositions,
    representations: Representations,
    moves: Vec<TurnMove>,
    phase: TurnPhase,
    par: usize,
    outcome: Option<Outcome>,
}

impl GameState {
    /// Creates a game positioned at the setup's starting cells.
    #[must_use]
    pub fn new(setup: GameSetup) -> Self {
        let mut state = Self {
            current_positions: *setup.element_positions(),
            par: par_for(&setup),
            setup,
            representations: Representations::default(),
            moves: Vec::new(),
            phase: TurnPhase::Idle,
            outcome: None,
        };
        let _ = state.settle();
        state
    }

    /// Replaces the glyphs adapters draw the pieces with.
    #[must_use]
    pub fn with_representations(mut self, representations: Representations) -> Self {
        self.representations = representations;
        self
    }

    fn restart(&mut self, setup: GameSetup, out_events: &mut Vec<Event>) {
        let representations = self.representations;
        *self = Self::new(setup);
        self.representations = representations;
        out_events.push(Event::GameStarted {
            field_size: self.setup.field_size(),
            par: self.par,
        });
    }

    fn view(&self) -> GameView<'_> {
        GameView::new(
            self.setup.field_size(),
            *self.setup.config(),
            &self.current_positions,
            &self.moves,
        )
    }

    /// Records the outcome once the current positions end the game.
    fn settle(&mut self) -> Option<Outcome> {
        let view = self.view();
        let outcome = if is_won(&view) {
            Some(Outcome::Won)
        } else if is_lost(&view, self.par) {
            Some(Outcome::Lost)
        } else {
            None
        };
        self.outcome = outcome;
        outcome
    }

    fn submit(&mut self, turn_move: TurnMove, out_events: &mut Vec<Event>) {
        if let TurnPhase::ResolvingTurn { .. } = self.phase {
            tracing::debug!(%turn_move, "dropping move submitted while a turn is resolving");
            return;
        }
        if self.outcome.is_some() {
            out_events.push(Event::MoveRejected {
                turn_move,
                reason: MoveRejection::GameFinished,
            });
            return;
        }

        let view = self.view();
        match validate_move(&view, turn_move) {
            Ok(validated) => {
                let pending = calculate_new_positions(&view, validated);
                out_events.push(Event::TurnResolved {
                    turn_move,
                    from: self.current_positions,
                    to: pending,
                });
                self.phase = TurnPhase::ResolvingTurn { turn_move, pending };
            }
            Err(reason) => {
                tracing::debug!(%turn_move, %reason, "move rejected");
                out_events.push(Event::MoveRejected { turn_move, reason });
            }
        }
    }

    fn commit(&mut self, out_events: &mut Vec<Event>) {
        let TurnPhase::ResolvingTurn { turn_move, pending } = self.phase else {
            return;
        };

        self.current_positions = pending;
        self.moves.push(turn_move);
        self.phase = TurnPhase::Idle;

        let move_count = self.moves.len();
        out_events.push(Event::TurnCommitted { move_count });

        match self.settle() {
            Some(Outcome::Won) => {
                tracing::info!(move_count, par = self.par, "kittens reunited");
                out_events.push(Event::GameWon { move_count });
            }
            Some(Outcome::Lost) => {
                tracing::info!(move_count, par = self.par, "move limit exceeded");
                out_events.push(Event::GameLost { move_count });
            }
            None => {}
        }
    }
}

/// Applies the provided command to the game, mutating state deterministically.
pub fn apply(state: &mut GameState, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::NewGame { setup } => state.restart(setup, out_events),
        Command::Retry => {
            let setup = state.setup.clone();
            state.restart(setup, out_events);
        }
        Command::SubmitMove { turn_move } => state.submit(turn_move, out_events),
        Command::CommitTurn => state.commit(out_events),
    }
}

/// Query functions that provide read-only access to the game state.
pub mod query {
    use kitten_rescue_core::{
        GameElementPositions, GameSetup, GameView, Representations, TurnMove,
    };
    use kitten_rescue_system_turn::is_valid_move;

    use super::{GameState, Outcome, TurnPhase};

    /// Setup the game was started from.
    #[must_use]
    pub fn setup(state: &GameState) -> &GameSetup {
        &state.setup
    }

    /// Committed positions of every element.
    #[must_use]
    pub fn positions(state: &GameState) -> &GameElementPositions {
        &state.current_positions
    }

    /// Moves committed so far, oldest first.
    #[must_use]
    pub fn moves(state: &GameState) -> &[TurnMove] {
        &state.moves
    }

    /// Glyphs adapters use to draw the pieces.
    #[must_use]
    pub fn representations(state: &GameState) -> &Representations {
        &state.representations
    }

    /// Current turn phase.
    #[must_use]
    pub fn phase(state: &GameState) -> TurnPhase {
        state.phase
    }

    /// Reports whether a resolved turn is waiting to be committed.
    #[must_use]
    pub fn is_turn_in_progress(state: &GameState) -> bool {
        matches!(state.phase, TurnPhase::ResolvingTurn { .. })
    }

    /// Terminal result, if the game has ended.
    #[must_use]
    pub fn outcome(state: &GameState) -> Option<Outcome> {
        state.outcome
    }

    /// Par the player is measured against.
    #[must_use]
    pub fn par(state: &GameState) -> usize {
        state.par
    }

    /// Read-only view over the committed positions for pure systems.
    #[must_use]
    pub fn view(state: &GameState) -> GameView<'_> {
        state.view()
    }

    /// Moves that would currently be accepted.
    #[must_use]
    pub fn valid_moves(state: &GameState) -> Vec<TurnMove> {
        if state.outcome.is_some() || is_turn_in_progress(state) {
            return Vec::new();
        }
        let view = state.view();
        TurnMove::ALL
            .into_iter()
            .filter(|turn_move| is_valid_move(&view, *turn_move))
            .collect()
    }
}
