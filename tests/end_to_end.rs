use approx::assert_abs_diff_eq;
use stable_fluids::solver::diagnostics::{compute_divergence_abs_mean, compute_total_density};
use stable_fluids::solver::{project, set_bnd, FieldType};
use stable_fluids::source::CandleSource;
use stable_fluids::{idx, FluidState, SolverParams};

#[test]
fn test_still_spike_on_tiny_grid() {
    const N: usize = 4;
    let mut state = FluidState::with_rates(N, 0.1, 0.0, 0.0);
    state.add_density(2, 2, 100.0);
    state.step();

    let d = state.density();
    assert_eq!(d[idx(2, 2, N)], 100.0);
    assert_eq!(d[idx(1, 1, N)], 0.0);
    assert_eq!(d[idx(1, 2, N)], 0.0);
    assert_eq!(d[idx(2, 1, N)], 0.0);

    // Edges mirror their interior neighbour, corners average their edges.
    for i in 1..3 {
        assert_eq!(d[idx(i, 0, N)], d[idx(i, 1, N)]);
        assert_eq!(d[idx(i, 3, N)], d[idx(i, 2, N)]);
        assert_eq!(d[idx(0, i, N)], d[idx(1, i, N)]);
        assert_eq!(d[idx(3, i, N)], d[idx(2, i, N)]);
    }
    assert_eq!(d[idx(3, 3, N)], 0.5 * (d[idx(2, 3, N)] + d[idx(3, 2, N)]));
    assert_eq!(d[idx(0, 0, N)], 0.0);

    let (vx, vy) = state.velocity();
    assert!(vx.iter().chain(vy.iter()).all(|&v| v == 0.0));
}

#[test]
fn test_injection_split_matches_single() {
    let mut a = FluidState::with_rates(16, 0.2, 0.0001, 0.0001);
    let mut b = FluidState::with_rates(16, 0.2, 0.0001, 0.0001);
    a.add_density(3, 9, 20.0);
    a.add_density(3, 9, 5.0);
    a.add_velocity(3, 9, 0.5, 0.0);
    a.add_velocity(3, 9, 0.5, -1.0);
    b.add_density(3, 9, 25.0);
    b.add_velocity(3, 9, 1.0, -1.0);
    for _ in 0..3 {
        a.step();
        b.step();
    }
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn test_public_projection_reduces_divergence() {
    const N: usize = 24;
    let mut vx = vec![0.0; N * N];
    let mut vy = vec![0.0; N * N];
    let c = (N / 2) as f64;
    for j in 1..(N - 1) {
        for i in 1..(N - 1) {
            let dx = i as f64 - c;
            let dy = j as f64 - c;
            let w = 0.05 * (-(dx * dx + dy * dy) / 8.0).exp();
            vx[idx(i as i32, j as i32, N)] = dx * w;
            vy[idx(i as i32, j as i32, N)] = dy * w;
        }
    }
    let before = compute_divergence_abs_mean(&vx, &vy, N);
    let mut p = vec![0.0; N * N];
    let mut div = vec![0.0; N * N];
    project(&mut vx, &mut vy, &mut p, &mut div, 4, N);
    let after = compute_divergence_abs_mean(&vx, &vy, N);
    assert!(after < before, "before={}, after={}", before, after);
}

#[test]
fn test_boundary_law_via_public_api() {
    const N: usize = 6;
    let mut field: Vec<f64> = (0..N * N).map(|k| k as f64 - 10.0).collect();
    set_bnd(FieldType::Vy, &mut field, N);
    for i in 1..(N as i32 - 1) {
        assert_eq!(field[idx(i, 0, N)], -field[idx(i, 1, N)]);
        assert_eq!(field[idx(i, N as i32 - 1, N)], -field[idx(i, N as i32 - 2, N)]);
    }
}

#[test]
fn test_fade_runs_density_negative() {
    let mut state = FluidState::new(8, SolverParams::default());
    let rate = state.params().fade_rate;
    for k in 1..=10 {
        state.fade();
        for &d in state.density() {
            assert_abs_diff_eq!(d, -rate * k as f64, epsilon = 1e-12);
        }
    }
}

#[test]
fn test_candle_run_produces_rising_plume() {
    const N: usize = 32;
    let mut state = FluidState::new(N, SolverParams::default());
    let mut candle = CandleSource::new(16, 24, 100.0, 3.0, 42);
    candle.ignite(&mut state);
    for _ in 0..40 {
        candle.emit(&mut state);
        state.step();
        state.fade();
    }

    let above: f64 = (1..24).flat_map(|y| (1..31).map(move |x| (x, y))).map(|(x, y)| state.density_at(x, y)).sum();
    let below: f64 = (25..31).flat_map(|y| (1..31).map(move |x| (x, y))).map(|(x, y)| state.density_at(x, y)).sum();
    assert!(above > below, "dye should rise above the candle: above={}, below={}", above, below);
    assert!(compute_total_density(state.density(), N).is_finite());
}
