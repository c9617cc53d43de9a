//! TUI Coinfall (workspace facade crate).
//!
//! Re-exports the member crates as `tui_coinfall::{core,input,term,types}` and
//! hosts the pieces only the binary needs: argument/config loading, logging
//! setup and the audio sink.

pub mod audio;
pub mod cli;
pub mod logging;

pub use tui_coinfall_core as core;
pub use tui_coinfall_input as input;
pub use tui_coinfall_term as term;
pub use tui_coinfall_types as types;
