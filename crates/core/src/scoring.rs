//! Scoring module - per-coin counters fed by line clears
//!
//! Every coin cell in a cleared row is worth one point for its own coin.
//! Special cells never score, and nothing scores while the Gold event runs.

use crate::board::ClearedRow;
use crate::types::{CoinKind, EventMode};

/// Per-coin score counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CoinScore {
    counts: [u32; 5],
}

impl CoinScore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, kind: CoinKind) -> u32 {
        self.counts[kind.index()]
    }

    pub fn add(&mut self, kind: CoinKind, points: u32) {
        let slot = &mut self.counts[kind.index()];
        *slot = slot.saturating_add(points);
    }

    /// Overwrite one counter (scenario setup)
    pub fn set(&mut self, kind: CoinKind, value: u32) {
        self.counts[kind.index()] = value;
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }

    /// Counters in scoreboard order
    pub fn iter(&self) -> impl Iterator<Item = (CoinKind, u32)> + '_ {
        CoinKind::ALL.iter().map(move |&k| (k, self.get(k)))
    }

    pub fn is_zero(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }
}

/// Count coin cells per kind across cleared rows, honouring the Gold suppression
pub fn score_cleared_rows(rows: &[ClearedRow], mode: EventMode) -> CoinScore {
    let mut delta = CoinScore::new();
    if mode == EventMode::Gold {
        return delta;
    }
    for row in rows {
        for coin in row.cells.iter().filter_map(|cell| cell.coin()) {
            delta.add(coin, 1);
        }
    }
    delta
}

/// Apply a delta, returning true if any counter changed
pub fn apply_delta(score: &mut CoinScore, delta: &CoinScore) -> bool {
    let mut changed = false;
    for (kind, points) in delta.iter() {
        if points > 0 {
            score.add(kind, points);
            changed = true;
        }
    }
    changed
}
