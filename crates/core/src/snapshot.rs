//! Snapshot module - a render-ready copy of the game state
//!
//! Frontends keep one snapshot around and refill it every frame with
//! [`GameState::snapshot_into`](crate::GameState::snapshot_into), which reuses
//! the particle buffer.

use crate::particles::Particle;
use crate::piece::Piece;
use crate::scoring::CoinScore;
use crate::types::{Cell, EventMode, LoopState, BOARD_HEIGHT, BOARD_WIDTH};

pub type Grid = [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GameSnapshot {
    /// Merged cells only; the active piece is separate
    pub grid: Grid,
    pub active: Option<Piece>,
    pub mode: EventMode,
    pub gold_blocks_dropped: u32,
    pub special_blocks_dropped: u32,
    pub doge_blocks_remaining: u32,
    pub scores: CoinScore,
    pub loop_state: LoopState,
    pub episode_id: u32,
    pub seed: u32,
    pub piece_id: u32,
    pub lines: u32,
    pub particles: Vec<Particle>,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.grid = [[Cell::Empty; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.active = None;
        self.mode = EventMode::Normal;
        self.gold_blocks_dropped = 0;
        self.special_blocks_dropped = 0;
        self.doge_blocks_remaining = 0;
        self.scores = CoinScore::new();
        self.loop_state = LoopState::Inactive;
        self.episode_id = 0;
        self.seed = 0;
        self.piece_id = 0;
        self.lines = 0;
        self.particles.clear();
    }

    pub fn playable(&self) -> bool {
        self.loop_state == LoopState::Running
    }

    pub fn paused(&self) -> bool {
        self.loop_state == LoopState::Paused
    }

    pub fn game_over(&self) -> bool {
        self.loop_state == LoopState::GameOver
    }

    /// What a renderer should show at (x, y): the active piece wins over the grid
    pub fn cell_at(&self, x: usize, y: usize) -> Cell {
        if let Some(piece) = &self.active {
            let hit = piece
                .cells()
                .find(|&(px, py, _)| px as isize == x as isize && py as isize == y as isize);
            if let Some((_, _, cell)) = hit {
                return cell;
            }
        }
        self.grid
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(Cell::Empty)
    }
}
