use tracing::{debug, warn};

use crate::solver::{self, SolverParams};

/// Convert 2D coordinates to a 1D offset, clamping each axis into `[0, n-1]`.
/// Out-of-range coordinates land on the nearest edge cell instead of failing.
/// `n` must be non-zero.
pub fn idx(x: i32, y: i32, n: usize) -> usize {
    let max = n as i32 - 1;
    let x = x.min(max).max(0) as usize;
    let y = y.min(max).max(0) as usize;
    x + y * n
}

/// Fast index for interior cells where x,y are guaranteed in-bounds.
/// Skips clamping; use only when 0 <= x < n and 0 <= y < n.
#[inline(always)]
pub const fn idx_inner(x: usize, y: usize, n: usize) -> usize {
    x + y * n
}

/// Owned copy of the readable fields, handed to a renderer so it never
/// aliases the live solver buffers.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSnapshot {
    pub n: usize,
    pub density: Vec<f64>,
    pub vx: Vec<f64>,
    pub vy: Vec<f64>,
}

impl FrameSnapshot {
    /// Pre-allocate a snapshot buffer matching the given grid size.
    pub fn new_empty(n: usize) -> Self {
        FrameSnapshot {
            n,
            density: vec![0.0; n * n],
            vx: vec![0.0; n * n],
            vy: vec![0.0; n * n],
        }
    }
}

/// Solver state: the six N×N buffers plus the parameters fixed at construction.
///
/// Grid sizes below 3 are accepted but leave every interior loop empty, so
/// the fields only change through injection, corner averaging and `fade`.
pub struct FluidState {
    pub(crate) n: usize,
    pub(crate) params: SolverParams,
    pub(crate) vx: Vec<f64>,
    pub(crate) vy: Vec<f64>,
    /// Previous-step horizontal velocity; pressure workspace in the second projection.
    pub(crate) vx0: Vec<f64>,
    /// Previous-step vertical velocity; divergence workspace in the second projection.
    pub(crate) vy0: Vec<f64>,
    pub(crate) density: Vec<f64>,
    /// Previous-step density.
    pub(crate) s: Vec<f64>,
}

impl FluidState {
    /// `n` must be non-zero; indexing an empty grid panics on first access.
    pub fn new(n: usize, params: SolverParams) -> Self {
        if n < 3 {
            warn!(n, "grid size below 3 leaves no interior cells; the solver will not move anything");
        }
        debug!(n, dt = params.dt, diff = params.diff, visc = params.visc, iter = params.iter, "allocating fluid state");
        let size = n * n;
        Self {
            n,
            params,
            vx: vec![0.0; size],
            vy: vec![0.0; size],
            vx0: vec![0.0; size],
            vy0: vec![0.0; size],
            density: vec![0.0; size],
            s: vec![0.0; size],
        }
    }

    /// Construct with explicit rates; iteration count, gravity and fade rate keep their defaults.
    /// `n` must be non-zero.
    pub fn with_rates(n: usize, dt: f64, diffusion: f64, viscosity: f64) -> Self {
        let params = SolverParams {
            dt,
            diff: diffusion,
            visc: viscosity,
            ..SolverParams::default()
        };
        Self::new(n, params)
    }

    pub fn size(&self) -> usize {
        self.n
    }

    pub fn params(&self) -> &SolverParams {
        &self.params
    }

    pub fn density(&self) -> &[f64] {
        &self.density
    }

    /// Horizontal and vertical velocity components.
    pub fn velocity(&self) -> (&[f64], &[f64]) {
        (&self.vx, &self.vy)
    }

    pub fn density_at(&self, x: i32, y: i32) -> f64 {
        self.density[idx(x, y, self.n)]
    }

    pub fn velocity_at(&self, x: i32, y: i32) -> (f64, f64) {
        let ii = idx(x, y, self.n);
        (self.vx[ii], self.vy[ii])
    }

    /// Accumulate dye at the (clamped) cell.
    pub fn add_density(&mut self, x: i32, y: i32, amount: f64) {
        let ii = idx(x, y, self.n);
        self.density[ii] += amount;
    }

    /// Accumulate a velocity impulse at the (clamped) cell. Gravity biases
    /// the vertical component of every impulse.
    pub fn add_velocity(&mut self, x: i32, y: i32, dx: f64, dy: f64) {
        let ii = idx(x, y, self.n);
        self.vx[ii] += dx;
        self.vy[ii] += dy - self.params.gravity;
    }

    /// Advance one frame.
    pub fn step(&mut self) {
        solver::fluid_step(self);
    }

    /// Subtract the fade rate from every density cell. No floor.
    pub fn fade(&mut self) {
        let rate = self.params.fade_rate;
        for d in self.density.iter_mut() {
            *d -= rate;
        }
    }

    /// Zero every buffer in place.
    pub fn reset(&mut self) {
        for buf in [
            &mut self.vx,
            &mut self.vy,
            &mut self.vx0,
            &mut self.vy0,
            &mut self.density,
            &mut self.s,
        ] {
            buf.fill(0.0);
        }
    }

    /// Allocating snapshot convenience method.
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            n: self.n,
            density: self.density.clone(),
            vx: self.vx.clone(),
            vy: self.vy.clone(),
        }
    }

    /// Copy current state into a pre-allocated snapshot, avoiding allocation
    /// when the sizes already match.
    pub fn snapshot_into(&self, dst: &mut FrameSnapshot) {
        let size = self.n * self.n;
        dst.density.resize(size, 0.0);
        dst.vx.resize(size, 0.0);
        dst.vy.resize(size, 0.0);
        dst.density.copy_from_slice(&self.density);
        dst.vx.copy_from_slice(&self.vx);
        dst.vy.copy_from_slice(&self.vy);
        dst.n = self.n;
    }
}
