use std::path::PathBuf;
use std::time::Instant;

use stable_fluids::config;
use stable_fluids::solver::diagnostics::{
    compute_density_range, compute_divergence_abs_mean, compute_kinetic_energy, compute_total_density,
};
use stable_fluids::FluidState;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // An explicit path must parse; the implicit one falls back to defaults.
    let cfg = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => match config::load_from(&path) {
            Ok(cfg) => cfg,
            Err(e) => {
                error!("{e}");
                std::process::exit(1);
            }
        },
        None => config::load(),
    };

    let n = cfg.grid.size;
    let mut state = FluidState::new(n, cfg.solver_params());
    let mut source = cfg.candle_source();
    if let Some(src) = source.as_mut() {
        src.ignite(&mut state);
    }

    info!(n, frames = cfg.run.frames, source = source.is_some(), "starting headless run");
    let started = Instant::now();

    for frame in 1..=cfg.run.frames {
        if let Some(src) = source.as_mut() {
            src.emit(&mut state);
        }
        state.step();

        if frame % cfg.run.report_every == 0 || frame == cfg.run.frames {
            let (vx, vy) = state.velocity();
            let (lo, hi) = compute_density_range(state.density());
            info!(
                frame,
                mass = compute_total_density(state.density(), n),
                density_min = lo,
                density_max = hi,
                kinetic_energy = compute_kinetic_energy(vx, vy, n),
                divergence = compute_divergence_abs_mean(vx, vy, n),
                "frame report"
            );
        }

        state.fade();
    }

    let elapsed = started.elapsed();
    let per_frame_ms = if cfg.run.frames > 0 {
        elapsed.as_secs_f64() * 1000.0 / cfg.run.frames as f64
    } else {
        0.0
    };
    info!(elapsed_ms = elapsed.as_millis() as u64, per_frame_ms, "run complete");
}
