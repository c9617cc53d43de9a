//! Heads-up display state fed by engine events.
//!
//! The scoreboard and the event banners are updated only when events say so,
//! then drawn by [`crate::GameView`] next to the board.

use crate::core::{CoinScore, EventVisualSink, ScoreboardSink};

/// Per-coin counters as last reported
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreboardPanel {
    scores: CoinScore,
    updates: u32,
}

impl ScoreboardPanel {
    pub fn scores(&self) -> &CoinScore {
        &self.scores
    }

    /// How many times the engine pushed new scores
    pub fn updates(&self) -> u32 {
        self.updates
    }
}

impl ScoreboardSink for ScoreboardPanel {
    fn show_scores(&mut self, scores: &CoinScore) {
        self.scores = *scores;
        self.updates = self.updates.wrapping_add(1);
    }
}

/// "GOLD EVENT" / "DOGE EVENT" banners
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventBanners {
    gold: bool,
    doge: bool,
}

impl EventBanners {
    pub fn gold(&self) -> bool {
        self.gold
    }

    pub fn doge(&self) -> bool {
        self.doge
    }
}

impl EventVisualSink for EventBanners {
    fn set_gold_indicator(&mut self, visible: bool) {
        self.gold = visible;
    }

    fn set_doge_indicator(&mut self, visible: bool) {
        self.doge = visible;
    }
}

/// Both panels; fields are public so they can be lent out as separate sinks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hud {
    pub scoreboard: ScoreboardPanel,
    pub banners: EventBanners,
}

impl Hud {
    pub fn new() -> Self {
        Self::default()
    }
}
