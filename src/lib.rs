//! Stable-fluids solver on a square grid: implicit diffusion, pressure
//! projection and semi-Lagrangian advection of velocity and dye.
//!
//! Grid sizes below 3 have no interior cells and never move anything.

pub mod config;
pub mod error;
pub mod solver;
pub mod source;
pub mod state;

pub use error::ConfigError;
pub use solver::{FieldType, SolverParams};
pub use state::{idx, FluidState, FrameSnapshot};
