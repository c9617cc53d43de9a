//! Logger setup for the binary.
//!
//! The game owns the terminal (raw mode, alternate screen), so log lines on
//! stderr would tear the frame. Without `--log-file` only warnings and errors
//! are enabled by default; with it everything `RUST_LOG` allows goes to the file.

use std::fs::OpenOptions;
use std::path::Path;

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};

pub fn init(log_file: Option<&Path>) -> Result<()> {
    let mut builder = match log_file {
        Some(_) => Builder::from_env(Env::default().default_filter_or("info")),
        None => Builder::from_env(Env::default().default_filter_or("warn")),
    };

    if let Some(path) = log_file {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("open log file {}", path.display()))?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    builder
        .try_init()
        .context("logger already initialised")?;
    Ok(())
}
