//! Event state machine - Normal, Gold and Doge phases
//!
//! Transitions:
//! - `Normal -> Gold` when the trigger coin's score reaches a threshold that has
//!   not fired yet this game ([`EventState::check_gold_trigger`]).
//! - `Gold -> Normal | DogeEvent` when the staged gold sequence is exhausted
//!   (driven by the generator, see [`crate::generator`]).
//! - `DogeEvent -> Normal` after the last Doge block merges
//!   ([`EventState::finish_doge_block`]).

use log::info;

use crate::types::EventMode;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventState {
    mode: EventMode,
    gold_blocks_dropped: u32,
    special_blocks_dropped: u32,
    doge_blocks_remaining: u32,
    /// Thresholds that already fired; never shrinks within a game
    consumed: Vec<u32>,
}

impl EventState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> EventMode {
        self.mode
    }

    pub fn gold_blocks_dropped(&self) -> u32 {
        self.gold_blocks_dropped
    }

    pub fn special_blocks_dropped(&self) -> u32 {
        self.special_blocks_dropped
    }

    pub fn doge_blocks_remaining(&self) -> u32 {
        self.doge_blocks_remaining
    }

    pub fn consumed_thresholds(&self) -> &[u32] {
        &self.consumed
    }

    pub fn is_consumed(&self, threshold: u32) -> bool {
        self.consumed.contains(&threshold)
    }

    /// Fire Gold for the first unconsumed threshold `score` has reached.
    ///
    /// Only evaluated in `Normal`; at most one threshold fires per call.
    /// Returns the threshold that fired.
    pub fn check_gold_trigger(&mut self, score: u32, thresholds: &[u32]) -> Option<u32> {
        if self.mode != EventMode::Normal {
            return None;
        }
        let threshold = thresholds
            .iter()
            .copied()
            .find(|&t| score >= t && !self.is_consumed(t))?;

        self.consumed.push(threshold);
        self.enter_gold();
        info!("gold event triggered at threshold {} (score {})", threshold, score);
        Some(threshold)
    }

    /// Count one gold-labelled standard piece
    pub(crate) fn record_gold_block(&mut self) {
        self.gold_blocks_dropped += 1;
    }

    /// Count one letter shape
    pub(crate) fn record_special_block(&mut self) {
        self.special_blocks_dropped += 1;
    }

    fn enter_gold(&mut self) {
        self.mode = EventMode::Gold;
        self.gold_blocks_dropped = 0;
        self.special_blocks_dropped = 0;
    }

    /// Leave Gold for Normal
    pub(crate) fn end_gold(&mut self) {
        self.mode = EventMode::Normal;
        info!("gold event finished");
    }

    /// Leave Gold for the Doge event with `blocks` single-cell blocks to place
    pub(crate) fn start_doge(&mut self, blocks: u32) {
        self.mode = EventMode::DogeEvent;
        self.doge_blocks_remaining = blocks;
        info!("doge event started with {} blocks", blocks);
    }

    /// A Doge block merged. Returns true when that was the last one and the
    /// machine is back in `Normal`.
    pub fn finish_doge_block(&mut self) -> bool {
        if self.mode != EventMode::DogeEvent {
            return false;
        }
        self.doge_blocks_remaining = self.doge_blocks_remaining.saturating_sub(1);
        if self.doge_blocks_remaining > 0 {
            return false;
        }
        self.mode = EventMode::Normal;
        info!("doge event finished");
        true
    }

    /// Force a mode (scenario setup)
    pub fn force_mode(&mut self, mode: EventMode) {
        self.mode = mode;
    }
}
