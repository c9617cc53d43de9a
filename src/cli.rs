//! Command-line arguments and config file loading.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Context, Result};

use crate::core::GameConfig;
use crate::types::EventPipeline;

pub const USAGE: &str = "\
tui-coinfall - coin-themed falling blocks

USAGE:
  tui-coinfall [--seed N] [--config PATH] [--pipeline gold-only|gold-then-doge] [--log-file PATH]

OPTIONS:
  --seed N          Fixed RNG seed (default: derived from the clock)
  --config PATH     JSON game config; missing fields keep their defaults
  --pipeline NAME   gold-only: Gold returns to normal play
                    gold-then-doge: Gold is followed by the Doge event (default)
  --log-file PATH   Append logs to PATH (filter with RUST_LOG)
  --help, -h        Show this help

KEYS:
  Enter start   ←/→ move   ↓ drop   ↑/space/a rotate   p pause   r restart   q quit
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub seed: u32,
    pub game: GameConfig,
    pub log_file: Option<PathBuf>,
}

/// Parse process arguments (without the program name).
///
/// Returns `Ok(None)` when help was requested.
pub fn parse_args(args: &[String]) -> Result<Option<RunConfig>> {
    let mut seed: Option<u32> = None;
    let mut config_path: Option<PathBuf> = None;
    let mut pipeline: Option<EventPipeline> = None;
    let mut log_file: Option<PathBuf> = None;

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => return Ok(None),
            "--seed" => {
                i += 1;
                let v = value(args, i, "--seed")?;
                seed = Some(
                    v.parse::<u32>()
                        .map_err(|_| anyhow!("invalid --seed value: {}", v))?,
                );
            }
            "--config" => {
                i += 1;
                config_path = Some(PathBuf::from(value(args, i, "--config")?));
            }
            "--pipeline" => {
                i += 1;
                let v = value(args, i, "--pipeline")?;
                pipeline = Some(
                    EventPipeline::from_str(v)
                        .ok_or_else(|| anyhow!("invalid --pipeline value: {}", v))?,
                );
            }
            "--log-file" => {
                i += 1;
                log_file = Some(PathBuf::from(value(args, i, "--log-file")?));
            }
            other => return Err(anyhow!("unknown argument: {}", other)),
        }
        i += 1;
    }

    let game = match (config_path, pipeline) {
        (Some(path), pipeline) => {
            let config = load_config(&path)?;
            match pipeline {
                Some(p) => config.with_pipeline(p),
                None => config,
            }
        }
        (None, Some(EventPipeline::GoldOnly)) => GameConfig::gold_only(),
        (None, _) => GameConfig::default(),
    };
    game.validate().context("invalid game config")?;

    Ok(Some(RunConfig {
        seed: seed.unwrap_or_else(clock_seed),
        game,
        log_file,
    }))
}

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str> {
    args.get(i)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("missing value for {}", flag))
}

/// Read and parse a JSON config file
pub fn load_config(path: &Path) -> Result<GameConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    parse_config(&text).with_context(|| format!("parse config {}", path.display()))
}

pub fn parse_config(json: &str) -> Result<GameConfig> {
    let config: GameConfig = serde_json::from_str(json)?;
    config.validate()?;
    Ok(config)
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}
