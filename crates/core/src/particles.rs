//! Cosmetic particles emitted by cleared cells
//!
//! Particles live in the pixel space of a 24px block; renderers scale them
//! down to whatever a cell is for them. They never touch gameplay state.

use crate::rng::SimpleRng;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH};

/// Pixel size of one board cell in particle space
pub const BLOCK_PX: f32 = 24.0;

const GRAVITY_PX: f32 = 0.05;
const ALPHA_DECAY: f32 = 0.03;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub alpha: f32,
    pub size: f32,
    /// The cleared value this particle represents
    pub tag: Cell,
}

impl Particle {
    /// Board cell the particle currently sits over, if it is on the board
    pub fn board_cell(&self) -> Option<(u8, u8)> {
        if self.x < 0.0 || self.y < 0.0 {
            return None;
        }
        let cx = (self.x / BLOCK_PX) as u32;
        let cy = (self.y / BLOCK_PX) as u32;
        if cx >= BOARD_WIDTH as u32 || cy >= BOARD_HEIGHT as u32 {
            return None;
        }
        Some((cx as u8, cy as u8))
    }

    fn visible(&self) -> bool {
        let w = BOARD_WIDTH as f32 * BLOCK_PX;
        let h = BOARD_HEIGHT as f32 * BLOCK_PX;
        self.alpha > 0.0
            && self.x >= -self.size
            && self.x <= w + self.size
            && self.y >= -self.size
            && self.y <= h + self.size
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParticleField {
    particles: Vec<Particle>,
}

impl ParticleField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Burst `count` particles from the centre of board cell (col, row)
    pub fn emit(&mut self, col: usize, row: usize, tag: Cell, count: u32, rng: &mut SimpleRng) {
        let cx = col as f32 * BLOCK_PX + BLOCK_PX / 2.0;
        let cy = row as f32 * BLOCK_PX + BLOCK_PX / 2.0;
        for _ in 0..count {
            self.particles.push(Particle {
                x: cx,
                y: cy,
                vx: (rng.next_unit() - 0.5) * 2.0,
                vy: rng.next_unit() * -3.0,
                alpha: 1.0,
                size: rng.next_unit() * BLOCK_PX / 2.0 + 4.0,
                tag,
            });
        }
    }

    /// Advance one frame and drop faded or escaped particles
    pub fn step(&mut self) {
        for p in &mut self.particles {
            p.x += p.vx;
            p.y += p.vy;
            p.vy += GRAVITY_PX;
            p.alpha -= ALPHA_DECAY;
        }
        self.particles.retain(Particle::visible);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }
}
