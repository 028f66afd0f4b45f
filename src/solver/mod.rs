mod boundary;
mod core;
pub mod diagnostics;
mod params;

// Re-export public API
pub use boundary::{set_bnd, FieldType};
pub use self::core::{advect, diffuse, lin_solve, project};
pub use params::SolverParams;

use tracing::trace;

use crate::state::FluidState;

/// One full frame: diffuse, project, advect and project velocity, then
/// diffuse and advect density through the projected flow.
///
/// Buffer roles: `vx0/vy0` hold the diffused-and-projected velocity that is
/// advected into `vx/vy`; `vx/vy` double as pressure/divergence workspace
/// for the first projection and `vx0/vy0` for the second.
pub fn fluid_step(state: &mut FluidState) {
    let params = state.params;
    let dt = params.dt;
    let iter = params.iter;
    let n = state.n;

    // Diffuse velocity
    diffuse(FieldType::Vx, &mut state.vx0, &state.vx, params.visc, dt, iter, n);
    diffuse(FieldType::Vy, &mut state.vy0, &state.vy, params.visc, dt, iter, n);

    // Project to make diffused velocity divergence-free
    project(&mut state.vx0, &mut state.vy0, &mut state.vx, &mut state.vy, iter, n);

    // Advect velocity along itself
    advect(FieldType::Vx, &mut state.vx, &state.vx0, &state.vx0, &state.vy0, dt, n);
    advect(FieldType::Vy, &mut state.vy, &state.vy0, &state.vx0, &state.vy0, dt, n);

    // Project again to remove divergence introduced by advection
    project(&mut state.vx, &mut state.vy, &mut state.vx0, &mut state.vy0, iter, n);

    // Diffuse + advect density
    diffuse(FieldType::Scalar, &mut state.s, &state.density, params.diff, dt, iter, n);
    advect(FieldType::Scalar, &mut state.density, &state.s, &state.vx, &state.vy, dt, n);

    trace!(n, "fluid step complete");
}
