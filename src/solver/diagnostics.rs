use crate::state::idx_inner;

/// Mean absolute central-difference divergence over interior cells:
/// 0.5 * |(vx[i+1]-vx[i-1]) + (vy[j+1]-vy[j-1])|.
pub fn compute_divergence_abs_mean(vx: &[f64], vy: &[f64], n: usize) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for j in 1..n.saturating_sub(1) {
        for i in 1..n.saturating_sub(1) {
            let d = 0.5
                * (vx[idx_inner(i + 1, j, n)] - vx[idx_inner(i - 1, j, n)]
                    + vy[idx_inner(i, j + 1, n)] - vy[idx_inner(i, j - 1, n)]);
            sum += d.abs();
            count += 1;
        }
    }
    if count > 0 { sum / count as f64 } else { 0.0 }
}

/// Total dye over interior cells. Edge cells are mirrors and would double-count.
pub fn compute_total_density(density: &[f64], n: usize) -> f64 {
    let mut sum = 0.0;
    for j in 1..n.saturating_sub(1) {
        for i in 1..n.saturating_sub(1) {
            sum += density[idx_inner(i, j, n)];
        }
    }
    sum
}

/// Compute volume-averaged kinetic energy: KE = 0.5 * <vx² + vy²>.
pub fn compute_kinetic_energy(vx: &[f64], vy: &[f64], n: usize) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for j in 1..n.saturating_sub(1) {
        for i in 1..n.saturating_sub(1) {
            let ii = idx_inner(i, j, n);
            sum += vx[ii] * vx[ii] + vy[ii] * vy[ii];
            count += 1;
        }
    }
    if count > 0 { 0.5 * sum / count as f64 } else { 0.0 }
}

/// Smallest and largest value in a field; `(0.0, 0.0)` when empty.
pub fn compute_density_range(density: &[f64]) -> (f64, f64) {
    if density.is_empty() {
        return (0.0, 0.0);
    }
    density
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &d| (lo.min(d), hi.max(d)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const N: usize = 10;

    #[test]
    fn test_divergence_zero_for_uniform_flow() {
        let vx = vec![0.3; N * N];
        let vy = vec![-0.7; N * N];
        assert_eq!(compute_divergence_abs_mean(&vx, &vy, N), 0.0);
    }

    #[test]
    fn test_divergence_of_linear_expansion() {
        // vx = i, vy = j → divergence 0.5 * (2 + 2) = 2 everywhere inside.
        let mut vx = vec![0.0; N * N];
        let mut vy = vec![0.0; N * N];
        for j in 0..N {
            for i in 0..N {
                vx[idx_inner(i, j, N)] = i as f64;
                vy[idx_inner(i, j, N)] = j as f64;
            }
        }
        assert_relative_eq!(compute_divergence_abs_mean(&vx, &vy, N), 2.0);
    }

    #[test]
    fn test_total_density_ignores_edges() {
        let mut density = vec![1.0; N * N];
        density[idx_inner(0, 4, N)] = 1000.0;
        let total = compute_total_density(&density, N);
        assert_relative_eq!(total, ((N - 2) * (N - 2)) as f64);
    }

    #[test]
    fn test_kinetic_energy_zero() {
        let vx = vec![0.0; N * N];
        let vy = vec![0.0; N * N];
        let ke = compute_kinetic_energy(&vx, &vy, N);
        assert!(ke.abs() < 1e-15, "KE should be 0 with no flow, got {}", ke);
    }

    #[test]
    fn test_kinetic_energy_uniform_flow() {
        let vx = vec![1.0; N * N];
        let vy = vec![0.0; N * N];
        let ke = compute_kinetic_energy(&vx, &vy, N);
        assert_relative_eq!(ke, 0.5);
    }

    #[test]
    fn test_density_range() {
        assert_eq!(compute_density_range(&[]), (0.0, 0.0));
        assert_eq!(compute_density_range(&[2.0, -1.5, 7.0, 0.0]), (-1.5, 7.0));
    }

    #[test]
    fn test_degenerate_grid_measures_nothing() {
        assert_eq!(compute_divergence_abs_mean(&[1.0, 2.0, 3.0, 4.0], &[0.0; 4], 2), 0.0);
        assert_eq!(compute_kinetic_energy(&[1.0; 4], &[1.0; 4], 2), 0.0);
        assert_eq!(compute_total_density(&[1.0; 4], 2), 0.0);
    }
}
