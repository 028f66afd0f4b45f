use crate::state::{idx, idx_inner};
use super::boundary::{FieldType, set_bnd};

/// Gauss-Seidel iterative linear solver.
/// Solves: x[i,j] = (x0[i,j] + a * (neighbors)) / c
///
/// Neighbours are read from `x` as the sweep updates it. Boundary cells are
/// enforced once, after the last sweep.
pub fn lin_solve(field_type: FieldType, x: &mut [f64], x0: &[f64], a: f64, c: f64, iter: usize, n: usize) {
    let c_inv = 1.0 / c;
    let hi = n.saturating_sub(1);
    for _ in 0..iter {
        for j in 1..hi {
            for i in 1..hi {
                let neighbors = x[idx_inner(i + 1, j, n)]
                    + x[idx_inner(i - 1, j, n)]
                    + x[idx_inner(i, j + 1, n)]
                    + x[idx_inner(i, j - 1, n)];
                x[idx_inner(i, j, n)] = (x0[idx_inner(i, j, n)] + a * neighbors) * c_inv;
            }
        }
    }
    set_bnd(field_type, x, n);
}

/// Diffusion step: spreads the field over time.
/// a = dt * diff * (N-2)^2, c = 1 + 6a
///
/// `x` is used as the initial guess, so whatever it held from the previous
/// frame seeds the relaxation.
pub fn diffuse(field_type: FieldType, x: &mut [f64], x0: &[f64], diff: f64, dt: f64, iter: usize, n: usize) {
    let h = n as f64 - 2.0;
    let a = dt * diff * h * h;
    let c = 1.0 + 6.0 * a;
    lin_solve(field_type, x, x0, a, c, iter, n);
}

/// Semi-Lagrangian advection: traces each cell backwards through the velocity
/// field and bilinearly samples `d0` at the departure point.
pub fn advect(field_type: FieldType, d: &mut [f64], d0: &[f64], vx: &[f64], vy: &[f64], dt: f64, n: usize) {
    let dt0 = dt * n as f64;
    let n_f = n as f64;
    let hi = n.saturating_sub(1);

    for j in 1..hi {
        for i in 1..hi {
            let ii = idx_inner(i, j, n);
            // Trace backwards. The upper bound sits past the last cell;
            // sampling relies on idx clamping there.
            let x = (i as f64 - dt0 * vx[ii]).clamp(0.5, n_f + 0.5);
            let y = (j as f64 - dt0 * vy[ii]).clamp(0.5, n_f + 0.5);

            let x0 = x.floor();
            let y0 = y.floor();
            let s1 = x - x0;
            let s0 = 1.0 - s1;
            let t1 = y - y0;
            let t0 = 1.0 - t1;

            let i0 = x0 as i32;
            let i1 = i0 + 1;
            let j0 = y0 as i32;
            let j1 = j0 + 1;

            d[ii] = s0 * (t0 * d0[idx(i0, j0, n)] + t1 * d0[idx(i0, j1, n)])
                + s1 * (t0 * d0[idx(i1, j0, n)] + t1 * d0[idx(i1, j1, n)]);
        }
    }
    set_bnd(field_type, d, n);
}

/// Pressure projection: removes the divergent part of (vx, vy).
/// `p` and `div` are workspaces; their previous contents are discarded.
pub fn project(vx: &mut [f64], vy: &mut [f64], p: &mut [f64], div: &mut [f64], iter: usize, n: usize) {
    let n_f = n as f64;
    let hi = n.saturating_sub(1);

    // Calculate divergence
    for j in 1..hi {
        for i in 1..hi {
            div[idx_inner(i, j, n)] = -0.5
                * (vx[idx_inner(i + 1, j, n)] - vx[idx_inner(i - 1, j, n)]
                    + vy[idx_inner(i, j + 1, n)] - vy[idx_inner(i, j - 1, n)])
                / n_f;
            p[idx_inner(i, j, n)] = 0.0;
        }
    }
    set_bnd(FieldType::Scalar, div, n);
    set_bnd(FieldType::Scalar, p, n);

    // Solve for pressure
    lin_solve(FieldType::Scalar, p, div, 1.0, 6.0, iter, n);

    // Subtract pressure gradient from velocity
    for j in 1..hi {
        for i in 1..hi {
            vx[idx_inner(i, j, n)] -= 0.5 * (p[idx_inner(i + 1, j, n)] - p[idx_inner(i - 1, j, n)]) * n_f;
            vy[idx_inner(i, j, n)] -= 0.5 * (p[idx_inner(i, j + 1, n)] - p[idx_inner(i, j - 1, n)]) * n_f;
        }
    }
    set_bnd(FieldType::Vx, vx, n);
    set_bnd(FieldType::Vy, vy, n);
}
