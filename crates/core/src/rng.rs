//! RNG module - deterministic uniform randomness
//!
//! Every random decision in the engine (shape, coin labels, mono pieces,
//! particle velocities) goes through a seeded [`SimpleRng`], so a seed replays
//! a whole game.

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
    seed: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state, seed }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        // High bits of an LCG are far better distributed than the low ones.
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Uniform float in [0, 1)
    pub fn next_unit(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }

    /// True with the given probability in percent
    pub fn chance_percent(&mut self, percent: u32) -> bool {
        self.next_range(100) < percent
    }

    /// Uniformly pick one element; `None` for an empty slice
    pub fn pick<T: Copy>(&mut self, items: &[T]) -> Option<T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.next_range(items.len() as u32) as usize;
        items.get(idx).copied()
    }

    /// Seed this generator was created with (for restarting with the same sequence)
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
