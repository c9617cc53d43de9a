//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal play. It avoids widget
//! toolkits and renders into a framebuffer that is diff-flushed to the terminal.
//!
//! - [`GameView`] turns a snapshot and the [`Hud`] into glyphs (pure, testable)
//! - [`TerminalRenderer`] implements the core's render sink over `crossterm`
//! - [`Hud`] implements the scoreboard and event-visual sinks

pub mod fb;
pub mod game_view;
pub mod hud;
pub mod renderer;

pub use tui_coinfall_core as core;
pub use tui_coinfall_types as types;

pub use fb::{CellStyle, FrameBuffer, Glyph, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use hud::{EventBanners, Hud, ScoreboardPanel};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
