//! Core types module - shared data structures and constants
//!
//! This module defines the closed vocabulary used throughout the application:
//! what a grid cell can hold, which shapes exist, which event phase the game is
//! in, and which discrete actions the player can issue.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the top)
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frame interval of the real-time runner (~60 FPS) |
//! | `DROP_INTERVAL_MS` | 500 | Accumulated time before one gravity step |
//!
//! # Event Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `GOLD_STANDARD_DRAWS` | 10 | Gold-labelled standard pieces per Gold event |
//! | `DOGE_EVENT_BLOCKS` | 15 | Single-cell DOGE blocks per Doge event |
//! | `DOGE_SPAWN_X` | 4 | Column where DOGE blocks spawn |
//! | `MONO_PIECE_PERCENT` | 20 | Chance that a normal piece is a single coin kind |
//!
//! # Examples
//!
//! ```
//! use tui_coinfall_types::{Cell, CoinKind, GameAction, SpecialTag, BOARD_WIDTH, BOARD_HEIGHT};
//!
//! let cell = Cell::Coin(CoinKind::Btc);
//! assert!(cell.is_filled());
//! assert_eq!(cell.coin(), Some(CoinKind::Btc));
//! assert_eq!(Cell::Special(SpecialTag::Gold).coin(), None);
//!
//! assert_eq!(CoinKind::from_str("doge"), Some(CoinKind::Doge));
//! assert_eq!(GameAction::from_str("rotate"), Some(GameAction::Rotate));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Frame interval of the real-time runner in milliseconds
pub const TICK_MS: u32 = 16;

/// Accumulated time that triggers one gravity step
pub const DROP_INTERVAL_MS: u32 = 500;

/// Standard pieces handed out (gold-labelled) at the start of a Gold event
pub const GOLD_STANDARD_DRAWS: u32 = 10;

/// Single-cell DOGE blocks per Doge event
pub const DOGE_EVENT_BLOCKS: u32 = 15;

/// Spawn column of a DOGE block
pub const DOGE_SPAWN_X: i8 = 4;

/// Chance (percent) that every cell of a normal piece shares one coin kind
pub const MONO_PIECE_PERCENT: u32 = 20;

/// Cosmetic particles emitted per cleared cell
pub const PARTICLES_PER_CELL: u32 = 10;

/// Gold trigger thresholds for the trigger coin's score, ascending
pub const DEFAULT_GOLD_THRESHOLDS: [u32; 7] = [10, 50, 100, 200, 300, 400, 500];

/// The five scoring coins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CoinKind {
    Btc,
    Eth,
    Doge,
    Sol,
    Xrp,
}

impl CoinKind {
    /// All coin kinds in scoreboard order
    pub const ALL: [CoinKind; 5] = [
        CoinKind::Btc,
        CoinKind::Eth,
        CoinKind::Doge,
        CoinKind::Sol,
        CoinKind::Xrp,
    ];

    /// Stable index into per-coin arrays (scoreboard order)
    pub fn index(self) -> usize {
        match self {
            CoinKind::Btc => 0,
            CoinKind::Eth => 1,
            CoinKind::Doge => 2,
            CoinKind::Sol => 3,
            CoinKind::Xrp => 4,
        }
    }

    /// Parse coin ticker (case-insensitive)
    ///
    /// ```
    /// use tui_coinfall_types::CoinKind;
    ///
    /// assert_eq!(CoinKind::from_str("BTC"), Some(CoinKind::Btc));
    /// assert_eq!(CoinKind::from_str("xrp"), Some(CoinKind::Xrp));
    /// assert_eq!(CoinKind::from_str("ltc"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "btc" => Some(CoinKind::Btc),
            "eth" => Some(CoinKind::Eth),
            "doge" => Some(CoinKind::Doge),
            "sol" => Some(CoinKind::Sol),
            "xrp" => Some(CoinKind::Xrp),
            _ => None,
        }
    }

    /// Upper-case ticker
    pub fn ticker(&self) -> &'static str {
        match self {
            CoinKind::Btc => "BTC",
            CoinKind::Eth => "ETH",
            CoinKind::Doge => "DOGE",
            CoinKind::Sol => "SOL",
            CoinKind::Xrp => "XRP",
        }
    }
}

/// Non-coin labels: the Gold event filler and the letter shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecialTag {
    Gold,
    F,
    U,
    N,
}

impl SpecialTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpecialTag::Gold => "GOLD",
            SpecialTag::F => "F",
            SpecialTag::U => "U",
            SpecialTag::N => "N",
        }
    }
}

/// A single grid (or piece) cell
///
/// Exactly one of these per grid cell. Piece label matrices use `Empty` for
/// unoccupied positions, so occupancy and label can never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Coin(CoinKind),
    Special(SpecialTag),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(&self) -> bool {
        !self.is_empty()
    }

    /// The coin this cell scores for, if any
    pub fn coin(&self) -> Option<CoinKind> {
        match self {
            Cell::Coin(kind) => Some(*kind),
            Cell::Empty | Cell::Special(_) => None,
        }
    }
}

/// The seven standard tetromino shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
        ShapeKind::S,
        ShapeKind::Z,
        ShapeKind::J,
        ShapeKind::L,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::I => "I",
            ShapeKind::O => "O",
            ShapeKind::T => "T",
            ShapeKind::S => "S",
            ShapeKind::Z => "Z",
            ShapeKind::J => "J",
            ShapeKind::L => "L",
        }
    }
}

/// Multi-cell letter shapes handed out at the end of a Gold event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LetterShape {
    F,
    U,
    N,
}

impl LetterShape {
    /// The label carried by every cell of this letter
    pub fn tag(self) -> SpecialTag {
        match self {
            LetterShape::F => SpecialTag::F,
            LetterShape::U => SpecialTag::U,
            LetterShape::N => SpecialTag::N,
        }
    }
}

/// Piece generation phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EventMode {
    #[default]
    Normal,
    Gold,
    DogeEvent,
}

impl EventMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventMode::Normal => "normal",
            EventMode::Gold => "gold",
            EventMode::DogeEvent => "doge",
        }
    }
}

/// What follows an exhausted Gold event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventPipeline {
    /// Gold returns straight to Normal
    GoldOnly,
    /// Gold hands over to the Doge event, which returns to Normal
    #[default]
    GoldThenDoge,
}

impl EventPipeline {
    /// ```
    /// use tui_coinfall_types::EventPipeline;
    ///
    /// assert_eq!(EventPipeline::from_str("gold-only"), Some(EventPipeline::GoldOnly));
    /// assert_eq!(EventPipeline::from_str("Gold-Then-Doge"), Some(EventPipeline::GoldThenDoge));
    /// assert_eq!(EventPipeline::from_str("doge"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "gold-only" => Some(EventPipeline::GoldOnly),
            "gold-then-doge" => Some(EventPipeline::GoldThenDoge),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventPipeline::GoldOnly => "gold-only",
            EventPipeline::GoldThenDoge => "gold-then-doge",
        }
    }
}

/// Game loop controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LoopState {
    /// Waiting on the start screen
    #[default]
    Inactive,
    Running,
    Paused,
    /// Terminal until a restart
    GameOver,
}

/// Discrete, edge-triggered player commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Start a run from the start screen
    Start,
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// One gravity step now
    SoftDrop,
    /// Rotate piece 90° clockwise with wall kicks
    Rotate,
    /// Toggle pause state
    Pause,
    /// Tear down and start a new run
    Restart,
}

impl GameAction {
    /// Parse action from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "start" => Some(GameAction::Start),
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "rotate" => Some(GameAction::Rotate),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Start => "start",
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::Rotate => "rotate",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }
}
