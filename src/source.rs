use tracing::debug;

use crate::state::FluidState;

/// Small deterministic generator so emitter runs are reproducible.
pub struct Xor128 {
    x: u32,
    y: u32,
    z: u32,
    w: u32,
}

impl Xor128 {
    /// Spreads one seed over the four state words with a multiplicative hash
    /// so nearby seeds start far apart and the state is never all zero.
    pub fn new(seed: u32) -> Self {
        Self {
            x: seed,
            y: seed.wrapping_mul(1812433253).wrapping_add(1),
            z: seed.wrapping_mul(1812433253).wrapping_mul(2).wrapping_add(2),
            w: seed.wrapping_mul(1812433253).wrapping_mul(3).wrapping_add(3),
        }
    }

    pub fn next(&mut self) -> u32 {
        let t = self.x ^ (self.x << 11);
        self.x = self.y;
        self.y = self.z;
        self.z = self.w;
        self.w = self.w ^ (self.w >> 19) ^ (t ^ (t >> 8));
        self.w
    }

    /// Returns a float in [0.0, 1.0)
    pub fn next_unit(&mut self) -> f64 {
        self.next() as f64 / (u32::MAX as f64 + 1.0)
    }

    /// Returns a float in [lo, hi)
    pub fn next_range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_unit()
    }
}

/// A fixed emitter that feeds dye and a flickering upward kick into one
/// cell every frame, like a candle flame.
pub struct CandleSource {
    pub x: i32,
    pub y: i32,
    pub amount: f64,
    pub velocity_scale: f64,
    rng: Xor128,
}

impl CandleSource {
    pub fn new(x: i32, y: i32, amount: f64, velocity_scale: f64, seed: u32) -> Self {
        Self {
            x,
            y,
            amount,
            velocity_scale,
            rng: Xor128::new(seed),
        }
    }

    /// Centered horizontally, 18 cells above the bottom wall.
    pub fn centered(n: usize, amount: f64, velocity_scale: f64, seed: u32) -> Self {
        let x = (n / 2) as i32;
        let y = n as i32 - 19;
        Self::new(x, y, amount, velocity_scale, seed)
    }

    /// One-time initial puff: dye plus a kick with both components in [0, scale).
    pub fn ignite(&mut self, state: &mut FluidState) {
        let dx = self.rng.next_unit() * self.velocity_scale;
        let dy = self.rng.next_unit() * self.velocity_scale;
        debug!(x = self.x, y = self.y, dx, dy, "igniting source");
        state.add_density(self.x, self.y, self.amount);
        state.add_velocity(self.x, self.y, dx, dy);
    }

    /// Per-frame emission: dye plus a sideways flicker in [-0.5, 0.5) and an
    /// upward (negative y) push in [-1, 0), both scaled.
    pub fn emit(&mut self, state: &mut FluidState) {
        let dx = self.rng.next_range(-0.5, 0.5) * self.velocity_scale;
        let dy = self.rng.next_range(-1.0, 0.0) * self.velocity_scale;
        state.add_density(self.x, self.y, self.amount);
        state.add_velocity(self.x, self.y, dx, dy);
    }
}
