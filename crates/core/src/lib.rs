//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the game rules, state management, and simulation logic.
//! It has **no dependencies** on UI, audio, or I/O; frontends talk to it through
//! [`GameState`], [`GameSnapshot`] and the sink traits in [`sink`].
//!
//! # Module Structure
//!
//! - [`shapes`]: the seven standard shapes and the F/U/N letter shapes
//! - [`board`]: 10x20 grid store with merge and gravity-compacting line clears
//! - [`piece`]: label matrix + position, clockwise rotation
//! - [`movement`]: the collision predicate and wall-kick rotation search
//! - [`event_state`]: Normal / Gold / Doge event state machine
//! - [`generator`]: what spawns next in each event mode
//! - [`scoring`]: per-coin counters fed by cleared rows
//! - [`particles`]: cosmetic bursts from cleared cells
//! - [`game_state`]: the loop controller tying it all together
//! - [`sink`]: events and the collaborator contracts they are routed to
//!
//! # Game Rules
//!
//! - Every piece cell carries a coin (BTC, ETH, DOGE, SOL, XRP); clearing a row
//!   scores one point per coin cell for that coin.
//! - When the trigger coin's score reaches a configured threshold, a Gold event
//!   hands out unscored gold pieces and letter shapes. Each threshold fires once.
//! - The default pipeline follows Gold with a Doge event: 15 single DOGE cells.
//! - A piece that collides where it spawns ends the game.
//!
//! # Example
//!
//! ```
//! use tui_coinfall_core::GameState;
//! use tui_coinfall_types::{GameAction, LoopState};
//!
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::SoftDrop);
//!
//! // 516ms of accumulated time runs one gravity step
//! game.tick(500);
//! assert!(game.tick(16));
//! assert_eq!(game.loop_state(), LoopState::Running);
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`](game_state::GameState::tick) every frame with the
//! elapsed milliseconds. Gravity runs once the accumulated time exceeds the
//! drop interval (500ms by default), then the accumulator resets.

pub mod board;
pub mod config;
pub mod event_state;
pub mod game_state;
pub mod generator;
pub mod movement;
pub mod particles;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod shapes;
pub mod sink;
pub mod snapshot;

pub use tui_coinfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, ClearedRow, ClearedRows};
pub use config::{ConfigError, GameConfig};
pub use event_state::EventState;
pub use game_state::GameState;
pub use generator::{next_piece, Generated};
pub use movement::{collides, drop_distance, try_rotate, KICK_OFFSETS};
pub use particles::{Particle, ParticleField};
pub use piece::Piece;
pub use rng::SimpleRng;
pub use scoring::{apply_delta, score_cleared_rows, CoinScore};
pub use sink::{
    dispatch_events, AudioCue, AudioSink, EventVisualSink, GameEvent, RenderSink,
    ScoreboardSink, Sinks,
};
pub use snapshot::{GameSnapshot, Grid};
