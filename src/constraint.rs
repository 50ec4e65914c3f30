//! Shrink-only distance constraints between neighbouring cloth points.

use crate::config::ClothConfig;
use crate::float::Float;
use crate::row::ClothRow;
use crate::vec::Vec3;

/// Rest lengths for the three constraint families.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ConstraintLengths<F: Float> {
    /// Between neighbours within a row.
    pub horizontal: F,
    /// Between the same column in adjacent rows.
    pub vertical: F,
    /// Across each quad.
    pub diagonal: F,
}

impl<F: Float> ConstraintLengths<F> {
    /// Derive the rest lengths from the clamped counts.
    pub fn from_config(config: &ClothConfig<F>) -> Self {
        let config = config.clamped();
        let horizontal = config.width / F::from_usize(config.side_count);
        let vertical = config.length / F::from_usize(config.segment_count);
        let diagonal = (vertical * vertical + horizontal * horizontal).sqrt();
        ConstraintLengths { horizontal, vertical, diagonal }
    }
}

/// Pull `p` and `q` together if they are farther apart than `target`.
///
/// Returns the corrected pair. Closer pairs and coincident pairs are left
/// alone, as is a pair with no free end. With both ends free the correction
/// is split evenly; otherwise the free end takes all of it.
pub fn project<F: Float>(
    p: Vec3<F>,
    free_p: bool,
    q: Vec3<F>,
    free_q: bool,
    target: F,
) -> (Vec3<F>, Vec3<F>) {
    let delta = q - p;
    let dist = delta.length();
    if !(dist > F::zero()) {
        return (p, q);
    }
    let error = (dist - target) / dist;
    if error <= F::zero() {
        return (p, q);
    }
    match (free_p, free_q) {
        (true, true) => {
            let half = delta.scale(error * F::half());
            (p + half, q - half)
        }
        (true, false) => (p + delta.scale(error), q),
        (false, true) => (p, q - delta.scale(error)),
        (false, false) => (p, q),
    }
}

/// Neighbours within one row. Anchored rows are skipped.
pub fn solve_horizontal<F: Float>(row: &mut ClothRow<F>, target: F) {
    if !row.free {
        return;
    }
    let points = &mut row.positions;
    for i in 0..points.len() - 1 {
        let (p, q) = project(points[i], true, points[i + 1], true, target);
        points[i] = p;
        points[i + 1] = q;
    }
}

/// Same column, rows `a` and `b`.
pub fn solve_vertical<F: Float>(a: &mut ClothRow<F>, b: &mut ClothRow<F>, target: F) {
    for i in 0..a.positions.len() {
        let (p, q) = project(a.positions[i], a.free, b.positions[i], b.free, target);
        a.positions[i] = p;
        b.positions[i] = q;
    }
}

/// `a[i]` to `b[i + 1]`.
pub fn solve_diagonal_down<F: Float>(a: &mut ClothRow<F>, b: &mut ClothRow<F>, target: F) {
    for i in 0..a.positions.len() - 1 {
        let (p, q) = project(a.positions[i], a.free, b.positions[i + 1], b.free, target);
        a.positions[i] = p;
        b.positions[i + 1] = q;
    }
}

/// `a[i + 1]` to `b[i]`.
pub fn solve_diagonal_up<F: Float>(a: &mut ClothRow<F>, b: &mut ClothRow<F>, target: F) {
    for i in 0..a.positions.len() - 1 {
        let (p, q) = project(a.positions[i + 1], a.free, b.positions[i], b.free, target);
        a.positions[i + 1] = p;
        b.positions[i] = q;
    }
}

/// All four families for one segment, in solver order.
pub fn solve_segment<F: Float>(a: &mut ClothRow<F>, b: &mut ClothRow<F>, lengths: &ConstraintLengths<F>) {
    solve_horizontal(a, lengths.horizontal);
    solve_vertical(a, b, lengths.vertical);
    solve_diagonal_down(a, b, lengths.diagonal);
    solve_diagonal_up(a, b, lengths.diagonal);
}
