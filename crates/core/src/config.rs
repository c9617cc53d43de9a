//! Engine configuration
//!
//! The two observed event pipelines differ in a handful of parameters
//! (what follows Gold, how many letter shapes, which thresholds). They are all
//! explicit fields here instead of being baked into the engine.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{
    CoinKind, EventPipeline, LetterShape, BOARD_WIDTH, DEFAULT_GOLD_THRESHOLDS, DOGE_EVENT_BLOCKS,
    DOGE_SPAWN_X, DROP_INTERVAL_MS, GOLD_STANDARD_DRAWS, MONO_PIECE_PERCENT, PARTICLES_PER_CELL,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// What follows an exhausted Gold event
    pub pipeline: EventPipeline,
    /// Strictly ascending score thresholds; each fires Gold at most once per game
    pub thresholds: Vec<u32>,
    /// Coin whose score is compared against `thresholds`
    pub trigger_coin: CoinKind,
    /// Gold-labelled standard pieces at the start of a Gold event
    pub gold_standard_draws: u32,
    /// Letter shapes handed out after the gold draws, in order
    pub letter_shapes: Vec<LetterShape>,
    /// Single-cell DOGE blocks per Doge event
    pub doge_blocks: u32,
    pub doge_spawn_x: i8,
    /// Chance that a normal piece is labelled with one coin kind throughout
    pub mono_piece_percent: u32,
    /// Accumulated milliseconds per gravity step
    pub drop_interval_ms: u32,
    pub particles_per_cell: u32,
    /// Emit Gold-tagged particles for letter cells instead of the letter itself
    pub special_particles_as_gold: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            pipeline: EventPipeline::GoldThenDoge,
            thresholds: DEFAULT_GOLD_THRESHOLDS.to_vec(),
            trigger_coin: CoinKind::Btc,
            gold_standard_draws: GOLD_STANDARD_DRAWS,
            letter_shapes: vec![LetterShape::F, LetterShape::U, LetterShape::N],
            doge_blocks: DOGE_EVENT_BLOCKS,
            doge_spawn_x: DOGE_SPAWN_X,
            mono_piece_percent: MONO_PIECE_PERCENT,
            drop_interval_ms: DROP_INTERVAL_MS,
            particles_per_cell: PARTICLES_PER_CELL,
            special_particles_as_gold: false,
        }
    }
}

impl GameConfig {
    /// The lighter variant: single threshold, two letters, no Doge event
    pub fn gold_only() -> Self {
        Self {
            pipeline: EventPipeline::GoldOnly,
            thresholds: vec![DEFAULT_GOLD_THRESHOLDS[0]],
            letter_shapes: vec![LetterShape::F, LetterShape::U],
            special_particles_as_gold: true,
            ..Self::default()
        }
    }

    pub fn with_pipeline(mut self, pipeline: EventPipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.thresholds.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ConfigError::UnsortedThresholds);
        }
        if self.drop_interval_ms == 0 {
            return Err(ConfigError::ZeroDropInterval);
        }
        if self.mono_piece_percent > 100 {
            return Err(ConfigError::PercentOutOfRange(self.mono_piece_percent));
        }
        if self.doge_spawn_x < 0 || self.doge_spawn_x >= BOARD_WIDTH as i8 {
            return Err(ConfigError::SpawnColumnOutOfRange(self.doge_spawn_x));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    UnsortedThresholds,
    ZeroDropInterval,
    PercentOutOfRange(u32),
    SpawnColumnOutOfRange(i8),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnsortedThresholds => {
                write!(f, "gold thresholds must be strictly ascending")
            }
            ConfigError::ZeroDropInterval => write!(f, "drop interval must be positive"),
            ConfigError::PercentOutOfRange(p) => {
                write!(f, "mono piece percent {} is above 100", p)
            }
            ConfigError::SpawnColumnOutOfRange(x) => {
                write!(f, "doge spawn column {} is outside the board", x)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
