#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Kitten Rescue engine.
//!
//! This crate defines the value types and message surface that connect
//! adapters, the authoritative game state, and pure systems. Adapters submit
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values.
//! Systems never mutate anything: they read a [`GameView`] snapshot and return
//! freshly computed values.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Deepest move sequence the par solver explores.
pub const MAX_PAR: usize = 5;

/// Shortest par accepted for randomly generated setups.
pub const MIN_PAR: usize = 2;

/// Par reported for setups that cannot be solved within [`MAX_PAR`] moves.
pub const FALLBACK_PAR: usize = 42;

/// Number of turns that must pass after a meow before it can be used again.
pub const MEOW_RECOVERY_TURNS: usize = 2;

/// Number of random placements attempted before falling back to the default setup.
pub const GENERATION_ATTEMPTS: usize = 13;

/// Commands that express all permissible game state mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Discards the running game and starts a fresh one from the provided setup.
    NewGame {
        /// Setup that seeds the new game.
        setup: GameSetup,
    },
    /// Restarts the current setup from its initial positions.
    Retry,
    /// Requests that the provided move be resolved.
    SubmitMove {
        /// Move requested by the player.
        turn_move: TurnMove,
    },
    /// Acknowledges that the pending turn finished presenting and may be committed.
    CommitTurn,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Announces that a game started from its initial positions.
    GameStarted {
        /// Size of the square board.
        field_size: FieldSize,
        /// Par the player is measured against.
        par: usize,
    },
    /// Reports that a submitted move failed validation.
    MoveRejected {
        /// Move that was submitted.
        turn_move: TurnMove,
        /// Specific reason the move was refused.
        reason: MoveRejection,
    },
    /// Publishes the positions computed for a submitted move, pending commit.
    TurnResolved {
        /// Move that was resolved.
        turn_move: TurnMove,
        /// Positions before the move.
        from: GameElementPositions,
        /// Positions after the move.
        to: GameElementPositions,
    },
    /// Confirms that the pending turn was committed to the game state.
    TurnCommitted {
        /// Number of moves made so far, including the committed one.
        move_count: usize,
    },
    /// Announces that every enabled cat was reunited with the mother.
    GameWon {
        /// Number of moves it took to win.
        move_count: usize,
    },
    /// Announces that the move limit ran out before the kittens were reunited.
    GameLost {
        /// Number of moves made before the game was lost.
        move_count: usize,
    },
}

/// Reasons a submitted move may be refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum MoveRejection {
    /// The setup has no mother, so nothing can move.
    #[error("the mother is not on the board")]
    MotherMissing,
    /// The mother would leave the board.
    #[error("the mother cannot leave the board")]
    OutOfBounds,
    /// The mother would walk into the tree.
    #[error("the tree blocks the way")]
    Blocked,
    /// The tool is disabled for this game.
    #[error("the tool is disabled in this game")]
    ToolDisabled,
    /// The tool was used too recently.
    #[error("the tool recovers in {remaining_turns} more turn(s)")]
    ToolRecovering {
        /// Turns that still have to pass before the tool is usable again.
        remaining_turns: usize,
    },
    /// The game already ended.
    #[error("the game is already over")]
    GameFinished,
}

/// Supported board sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum FieldSize {
    /// Three by three board.
    Three,
    /// Four by four board.
    Four,
    /// Five by five board.
    Five,
}

impl FieldSize {
    /// Every supported size, smallest first.
    pub const ALL: [FieldSize; 3] = [FieldSize::Three, FieldSize::Four, FieldSize::Five];

    /// Number of rows (and columns) on the board.
    #[must_use]
    pub const fn get(self) -> u8 {
        match self {
            Self::Three => 3,
            Self::Four => 4,
            Self::Five => 5,
        }
    }

    /// Reports whether the position lies on the board.
    #[must_use]
    pub const fn contains(self, position: CellPosition) -> bool {
        position.row < self.get() && position.column < self.get()
    }

    /// Iterates every cell on the board in row-major order.
    pub fn cells(self) -> impl Iterator<Item = CellPosition> {
        let size = self.get();
        (0..size).flat_map(move |row| (0..size).map(move |column| CellPosition::new(row, column)))
    }
}

impl Default for FieldSize {
    fn default() -> Self {
        Self::Five
    }
}

impl TryFrom<u8> for FieldSize {
    type Error = FieldSizeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            3 => Ok(Self::Three),
            4 => Ok(Self::Four),
            5 => Ok(Self::Five),
            other => Err(FieldSizeError(other)),
        }
    }
}

impl From<FieldSize> for u8 {
    fn from(value: FieldSize) -> Self {
        value.get()
    }
}

impl fmt::Display for FieldSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{0}x{0}", self.get())
    }
}

/// Error returned when an unsupported board size is requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("field size {0} is not supported; expected 3, 4 or 5")]
pub struct FieldSizeError(pub u8);

/// Location of a single board cell expressed as row and column coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellPosition {
    row: u8,
    column: u8,
}

impl CellPosition {
    /// Creates a new cell position.
    #[must_use]
    pub const fn new(row: u8, column: u8) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u8 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u8 {
        self.column
    }

    /// Computes the Manhattan distance between two cells.
    #[must_use]
    pub fn manhattan_distance(self, other: CellPosition) -> u32 {
        u32::from(self.row.abs_diff(other.row)) + u32::from(self.column.abs_diff(other.column))
    }

    /// Largest of the row and column distances between two cells.
    #[must_use]
    pub fn max_axis_distance(self, other: CellPosition) -> u32 {
        u32::from(self.row.abs_diff(other.row).max(self.column.abs_diff(other.column)))
    }

    /// Offsets the cell, returning `None` when a coordinate would become negative
    /// or overflow.
    #[must_use]
    pub fn offset_by(self, row_delta: i8, column_delta: i8) -> Option<Self> {
        Some(Self {
            row: self.row.checked_add_signed(row_delta)?,
            column: self.column.checked_add_signed(column_delta)?,
        })
    }
}

impl fmt::Display for CellPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// Cardinal directions the mother can walk in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Toward decreasing row indices.
    Up,
    /// Toward increasing row indices.
    Down,
    /// Toward decreasing column indices.
    Left,
    /// Toward increasing column indices.
    Right,
}

impl Direction {
    /// Every direction in declaration order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Row and column delta of a single step.
    #[must_use]
    pub const fn offset(self) -> (i8, i8) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }
}

/// Abilities the player can trigger instead of walking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tool {
    /// Lures every free kitten one step closer to the mother.
    Meow,
}

impl Tool {
    /// Number of turns that must pass before the tool is usable again.
    #[must_use]
    pub const fn recovery_turns(self) -> usize {
        match self {
            Self::Meow => MEOW_RECOVERY_TURNS,
        }
    }
}

/// A single player action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnMove {
    /// Walk the mother one cell.
    Direction(Direction),
    /// Trigger a tool.
    Tool(Tool),
}

impl TurnMove {
    /// Every move the player can attempt.
    pub const ALL: [TurnMove; 5] = [
        TurnMove::Direction(Direction::Up),
        TurnMove::Direction(Direction::Down),
        TurnMove::Direction(Direction::Left),
        TurnMove::Direction(Direction::Right),
        TurnMove::Tool(Tool::Meow),
    ];
}

impl From<Direction> for TurnMove {
    fn from(value: Direction) -> Self {
        Self::Direction(value)
    }
}

impl From<Tool> for TurnMove {
    fn from(value: Tool) -> Self {
        Self::Tool(value)
    }
}

impl fmt::Display for TurnMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Direction(Direction::Up) => "up",
            Self::Direction(Direction::Down) => "down",
            Self::Direction(Direction::Left) => "left",
            Self::Direction(Direction::Right) => "right",
            Self::Tool(Tool::Meow) => "meow",
        };
        f.write_str(label)
    }
}

impl FromStr for TurnMove {
    type Err = ParseTurnMoveError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "up" | "u" | "w" => Ok(Direction::Up.into()),
            "down" | "d" | "s" => Ok(Direction::Down.into()),
            "left" | "l" | "a" => Ok(Direction::Left.into()),
            "right" | "r" => Ok(Direction::Right.into()),
            "meow" | "m" => Ok(Tool::Meow.into()),
            _ => Err(ParseTurnMoveError(value.to_owned())),
        }
    }
}

/// Error returned when text does not name a move.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("'{0}' is not a move; expected up, down, left, right or meow")]
pub struct ParseTurnMoveError(pub String);

/// Kittens that wander on their own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum KittenId {
    /// Drawn to the moon.
    Moony,
    /// Circles the tree.
    Ivy,
    /// Drawn to the puddle.
    Splashy,
}

impl KittenId {
    /// Every kitten in declaration order.
    pub const ALL: [KittenId; 3] = [KittenId::Moony, KittenId::Ivy, KittenId::Splashy];
}

/// Identity of a cat piece.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CatId {
    /// The piece the player controls.
    Mother,
    /// An autonomous kitten.
    Kitten(KittenId),
}

impl CatId {
    /// Every cat, mother first.
    pub const ALL: [CatId; 4] = [
        CatId::Mother,
        CatId::Kitten(KittenId::Moony),
        CatId::Kitten(KittenId::Ivy),
        CatId::Kitten(KittenId::Splashy),
    ];
}

impl From<KittenId> for CatId {
    fn from(value: KittenId) -> Self {
        Self::Kitten(value)
    }
}

/// Identity of a static or scripted board object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ObjectId {
    /// Drifts one column to the right per turn while the move limit is active.
    Moon,
    /// Impassable obstacle.
    Tree,
    /// Splashy's favourite spot.
    Puddle,
}

impl ObjectId {
    /// Every object in declaration order.
    pub const ALL: [ObjectId; 3] = [ObjectId::Moon, ObjectId::Tree, ObjectId::Puddle];
}

/// Identity of any piece on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GameElementId {
    /// A cat piece.
    Cat(CatId),
    /// A board object.
    Object(ObjectId),
}

impl GameElementId {
    /// Every element; objects first so cats are drawn on top.
    pub const ALL: [GameElementId; 7] = [
        GameElementId::Object(ObjectId::Moon),
        GameElementId::Object(ObjectId::Tree),
        GameElementId::Object(ObjectId::Puddle),
        GameElementId::Cat(CatId::Mother),
        GameElementId::Cat(CatId::Kitten(KittenId::Moony)),
        GameElementId::Cat(CatId::Kitten(KittenId::Ivy)),
        GameElementId::Cat(CatId::Kitten(KittenId::Splashy)),
    ];

    const fn slot(self) -> usize {
        match self {
            Self::Object(ObjectId::Moon) => 0,
            Self::Object(ObjectId::Tree) => 1,
            Self::Object(ObjectId::Puddle) => 2,
            Self::Cat(CatId::Mother) => 3,
            Self::Cat(CatId::Kitten(KittenId::Moony)) => 4,
            Self::Cat(CatId::Kitten(KittenId::Ivy)) => 5,
            Self::Cat(CatId::Kitten(KittenId::Splashy)) => 6,
        }
    }
}

impl From<CatId> for GameElementId {
    fn from(value: CatId) -> Self {
        Self::Cat(value)
    }
}

impl From<KittenId> for GameElementId {
    fn from(value: KittenId) -> Self {
        Self::Cat(CatId::Kitten(value))
    }
}

impl From<ObjectId> for GameElementId {
    fn from(value: ObjectId) -> Self {
        Self::Object(value)
    }
}

impl fmt::Display for GameElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Object(ObjectId::Moon) => "moon",
            Self::Object(ObjectId::Tree) => "tree",
            Self::Object(ObjectId::Puddle) => "puddle",
            Self::Cat(CatId::Mother) => "mother",
            Self::Cat(CatId::Kitten(KittenId::Moony)) => "Moony",
            Self::Cat(CatId::Kitten(KittenId::Ivy)) => "Ivy",
            Self::Cat(CatId::Kitten(KittenId::Splashy)) => "Splashy",
        };
        f.write_str(name)
    }
}

/// Total map from every [`GameElementId`] to its cell, if the element is present.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameElementPositions {
    slots: [Option<CellPosition>; 7],
}

impl GameElementPositions {
    /// Creates a map with every element absent.
    #[must_use]
    pub const fn empty() -> Self {
        Self { slots: [None; 7] }
    }

    /// Cell occupied by the element, if it is present.
    #[must_use]
    pub fn get(&self, id: impl Into<GameElementId>) -> Option<CellPosition> {
        self.slots[id.into().slot()]
    }

    /// Places or removes the element.
    pub fn set(&mut self, id: impl Into<GameElementId>, position: Option<CellPosition>) {
        self.slots[id.into().slot()] = position;
    }

    /// Builder-style variant of [`GameElementPositions::set`] that places the element.
    #[must_use]
    pub fn with(mut self, id: impl Into<GameElementId>, position: CellPosition) -> Self {
        self.set(id, Some(position));
        self
    }

    /// Iterates every element with its position in [`GameElementId::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (GameElementId, Option<CellPosition>)> + '_ {
        GameElementId::ALL.into_iter().map(|id| (id, self.get(id)))
    }
}

/// Per-kitten autonomous behaviour toggles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct KittenToggles {
    /// Enables Moony.
    pub moony: bool,
    /// Enables Ivy.
    pub ivy: bool,
    /// Enables Splashy.
    pub splashy: bool,
}

impl Default for KittenToggles {
    fn default() -> Self {
        Self {
            moony: true,
            ivy: true,
            splashy: true,
        }
    }
}

/// Per-object presence toggles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectToggles {
    /// Places the moon.
    pub moon: bool,
    /// Places the tree.
    pub tree: bool,
    /// Places the puddle.
    pub puddle: bool,
}

impl Default for ObjectToggles {
    fn default() -> Self {
        Self {
            moon: true,
            tree: true,
            puddle: true,
        }
    }
}

/// Per-tool toggles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolToggles {
    /// Enables the meow lure.
    pub meow: bool,
}

impl Default for ToolToggles {
    fn default() -> Self {
        Self { meow: true }
    }
}

/// Constraint variants that can end a game in a loss.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConstraintId {
    /// Limits the game to par moves and lets the moon drift toward setting.
    MoveLimit,
}

/// Per-constraint toggles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstraintToggles {
    /// Enables the move limit.
    pub move_limit: bool,
}

/// Categorised toggles that shape a single game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Kitten behaviour toggles.
    pub kittens: KittenToggles,
    /// Object presence toggles.
    pub objects: ObjectToggles,
    /// Tool toggles.
    pub tools: ToolToggles,
    /// Constraint toggles.
    pub constraints: ConstraintToggles,
}

impl Config {
    /// Reports whether the kitten takes part in the game.
    #[must_use]
    pub const fn kitten_enabled(&self, kitten: KittenId) -> bool {
        match kitten {
            KittenId::Moony => self.kittens.moony,
            KittenId::Ivy => self.kittens.ivy,
            KittenId::Splashy => self.kittens.splashy,
        }
    }

    /// Reports whether the object is placed on the board.
    #[must_use]
    pub const fn object_enabled(&self, object: ObjectId) -> bool {
        match object {
            ObjectId::Moon => self.objects.moon,
            ObjectId::Tree => self.objects.tree,
            ObjectId::Puddle => self.objects.puddle,
        }
    }

    /// Reports whether the tool may be used.
    #[must_use]
    pub const fn tool_enabled(&self, tool: Tool) -> bool {
        match tool {
            Tool::Meow => self.tools.meow,
        }
    }

    /// Reports whether the constraint is enforced.
    #[must_use]
    pub const fn constraint_enabled(&self, constraint: ConstraintId) -> bool {
        match constraint {
            ConstraintId::MoveLimit => self.constraints.move_limit,
        }
    }

    /// Packs every toggle into one byte.
    ///
    /// Bits from least significant: Moony, Ivy, Splashy, moon, tree, puddle,
    /// meow, move limit.
    #[must_use]
    pub fn to_flags(&self) -> u8 {
        let toggles = [
            self.kittens.moony,
            self.kittens.ivy,
            self.kittens.splashy,
            self.objects.moon,
            self.objects.tree,
            self.objects.puddle,
            self.tools.meow,
            self.constraints.move_limit,
        ];
        toggles
            .iter()
            .enumerate()
            .filter(|(_, enabled)| **enabled)
            .fold(0u8, |flags, (bit, _)| flags | (1 << bit))
    }

    /// Unpacks toggles produced by [`Config::to_flags`].
    #[must_use]
    pub fn from_flags(flags: u8) -> Self {
        let bit = |index: u8| flags & (1 << index) != 0;
        Self {
            kittens: KittenToggles {
                moony: bit(0),
                ivy: bit(1),
                splashy: bit(2),
            },
            objects: ObjectToggles {
                moon: bit(3),
                tree: bit(4),
                puddle: bit(5),
            },
            tools: ToolToggles { meow: bit(6) },
            constraints: ConstraintToggles {
                move_limit: bit(7),
            },
        }
    }
}

/// Difficulty classification derived from par information.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Solved in a couple of moves.
    Easy,
    /// Needs a little planning.
    Medium,
    /// Needs careful planning.
    Hard,
    /// Uses the whole move budget or cannot be solved within it.
    Extreme,
}

impl Difficulty {
    /// Classification one step easier, saturating at [`Difficulty::Easy`].
    #[must_use]
    pub const fn easier(self) -> Self {
        match self {
            Self::Easy | Self::Medium => Self::Easy,
            Self::Hard => Self::Medium,
            Self::Extreme => Self::Hard,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Extreme => "extreme",
        };
        f.write_str(label)
    }
}

/// Reasons a setup may be refused at construction time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SetupError {
    /// Every setup needs a mother.
    #[error("the setup has no mother")]
    MissingMother,
    /// An element was placed off the board.
    #[error("{element} at {position} lies outside the {field_size} board")]
    OutOfBounds {
        /// Offending element.
        element: GameElementId,
        /// Cell it was placed on.
        position: CellPosition,
        /// Board it had to fit on.
        field_size: FieldSize,
    },
    /// A cat was placed on the tree.
    #[error("{cat} cannot start on the tree")]
    CatOnTree {
        /// Offending cat.
        cat: GameElementId,
    },
    /// An object disabled in the config was placed anyway.
    #[error("the {object} is disabled but was placed")]
    DisabledObjectPlaced {
        /// Offending object.
        object: GameElementId,
    },
}

/// Immutable description of a puzzle: board, starting positions and toggles.
///
/// Deserialization runs the same checks as [`GameSetup::new`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedGameSetup")]
pub struct GameSetup {
    field_size: FieldSize,
    element_positions: GameElementPositions,
    config: Config,
    possible_solutions: Vec<Vec<TurnMove>>,
}

#[derive(Deserialize)]
struct UncheckedGameSetup {
    field_size: FieldSize,
    element_positions: GameElementPositions,
    config: Config,
    possible_solutions: Vec<Vec<TurnMove>>,
}

impl TryFrom<UncheckedGameSetup> for GameSetup {
    type Error = SetupError;

    fn try_from(unchecked: UncheckedGameSetup) -> Result<Self, Self::Error> {
        let setup = Self::new(
            unchecked.field_size,
            unchecked.element_positions,
            unchecked.config,
        )?;
        Ok(setup.with_solutions(unchecked.possible_solutions))
    }
}

impl GameSetup {
    /// Validates and creates a setup without any solutions attached.
    pub fn new(
        field_size: FieldSize,
        element_positions: GameElementPositions,
        config: Config,
    ) -> Result<Self, SetupError> {
        if element_positions.get(CatId::Mother).is_none() {
            return Err(SetupError::MissingMother);
        }

        let tree = element_positions.get(ObjectId::Tree);
        for (element, position) in element_positions.iter() {
            let Some(position) = position else {
                continue;
            };
            if !field_size.contains(position) {
                return Err(SetupError::OutOfBounds {
                    element,
                    position,
                    field_size,
                });
            }
            match element {
                GameElementId::Cat(_) if tree == Some(position) => {
                    return Err(SetupError::CatOnTree { cat: element });
                }
                GameElementId::Object(object) if !config.object_enabled(object) => {
                    return Err(SetupError::DisabledObjectPlaced { object: element });
                }
                _ => {}
            }
        }

        Ok(Self {
            field_size,
            element_positions,
            config,
            possible_solutions: Vec::new(),
        })
    }

    /// Attaches solver output, ordered shortest first.
    #[must_use]
    pub fn with_solutions(mut self, mut solutions: Vec<Vec<TurnMove>>) -> Self {
        solutions.sort_by_key(Vec::len);
        self.possible_solutions = solutions;
        self
    }

    /// Size of the square board.
    #[must_use]
    pub const fn field_size(&self) -> FieldSize {
        self.field_size
    }

    /// Starting positions of every element.
    #[must_use]
    pub const fn element_positions(&self) -> &GameElementPositions {
        &self.element_positions
    }

    /// Toggles that shape the game.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Winning move sequences found by the solver, shortest first.
    #[must_use]
    pub fn possible_solutions(&self) -> &[Vec<TurnMove>] {
        &self.possible_solutions
    }

    /// View of the setup before any move was made.
    #[must_use]
    pub fn initial_view(&self) -> GameView<'_> {
        GameView::new(self.field_size, self.config, &self.element_positions, &[])
    }
}

/// Read-only snapshot consumed by every pure system.
#[derive(Clone, Copy, Debug)]
pub struct GameView<'a> {
    field_size: FieldSize,
    config: Config,
    positions: &'a GameElementPositions,
    moves: &'a [TurnMove],
}

impl<'a> GameView<'a> {
    /// Captures a new view over the provided positions and move log.
    #[must_use]
    pub const fn new(
        field_size: FieldSize,
        config: Config,
        positions: &'a GameElementPositions,
        moves: &'a [TurnMove],
    ) -> Self {
        Self {
            field_size,
            config,
            positions,
            moves,
        }
    }

    /// Size of the square board.
    #[must_use]
    pub const fn field_size(&self) -> FieldSize {
        self.field_size
    }

    /// Toggles that shape the game.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Current positions of every element.
    #[must_use]
    pub const fn positions(&self) -> &'a GameElementPositions {
        self.positions
    }

    /// Moves accepted so far, oldest first.
    #[must_use]
    pub const fn moves(&self) -> &'a [TurnMove] {
        self.moves
    }

    /// Current cell of the element, if present.
    #[must_use]
    pub fn position(&self, id: impl Into<GameElementId>) -> Option<CellPosition> {
        self.positions.get(id)
    }
}

/// Display glyphs used by adapters to draw each element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Representations {
    glyphs: [char; 7],
}

impl Representations {
    /// Glyph drawn for the element.
    #[must_use]
    pub fn glyph(&self, id: impl Into<GameElementId>) -> char {
        self.glyphs[id.into().slot()]
    }

    /// Overrides the glyph drawn for the element.
    #[must_use]
    pub fn with_glyph(mut self, id: impl Into<GameElementId>, glyph: char) -> Self {
        self.glyphs[id.into().slot()] = glyph;
        self
    }
}

impl Default for Representations {
    fn default() -> Self {
        Self {
            glyphs: ['o', 'T', 'p', 'M', 'y', 'i', 's'],
        }
    }
}
