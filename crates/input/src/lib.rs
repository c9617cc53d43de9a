//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events to discrete [`crate::types::GameAction`]s. Every
//! key press is one action; there is no held-key state or auto-shift, so the
//! engine only ever sees edge-triggered commands.

pub mod map;

pub use tui_coinfall_types as types;

pub use map::{handle_key_event, is_actionable, should_quit};
