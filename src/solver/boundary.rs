use crate::state::idx;

/// Field type for boundary condition dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Scalar,
    Vx,
    Vy,
}

impl FieldType {
    /// Sign applied when copying into the top/bottom rows.
    fn row_sign(self) -> f64 {
        if self == FieldType::Vy { -1.0 } else { 1.0 }
    }

    /// Sign applied when copying into the left/right columns.
    fn column_sign(self) -> f64 {
        if self == FieldType::Vx { -1.0 } else { 1.0 }
    }
}

/// Wall boundary conditions on all four sides.
///   - `FieldType::Scalar`: Neumann (copy neighbor) at every wall
///   - `FieldType::Vx`: negate at left/right walls, copy at top/bottom
///   - `FieldType::Vy`: negate at top/bottom walls, copy at left/right
///
/// Corners are the average of their two edge neighbours, written after the edges.
pub fn set_bnd(field_type: FieldType, x: &mut [f64], n: usize) {
    let last = n as i32 - 1;

    let row_sign = field_type.row_sign();
    for i in 1..last {
        x[idx(i, 0, n)] = row_sign * x[idx(i, 1, n)];
        x[idx(i, last, n)] = row_sign * x[idx(i, last - 1, n)];
    }

    let column_sign = field_type.column_sign();
    for j in 1..last {
        x[idx(0, j, n)] = column_sign * x[idx(1, j, n)];
        x[idx(last, j, n)] = column_sign * x[idx(last - 1, j, n)];
    }

    x[idx(0, 0, n)] = 0.5 * (x[idx(1, 0, n)] + x[idx(0, 1, n)]);
    x[idx(0, last, n)] = 0.5 * (x[idx(1, last, n)] + x[idx(0, last - 1, n)]);
    x[idx(last, 0, n)] = 0.5 * (x[idx(last - 1, 0, n)] + x[idx(last, 1, n)]);
    x[idx(last, last, n)] = 0.5 * (x[idx(last - 1, last, n)] + x[idx(last, last - 1, n)]);
}
