//! Per-point acceleration: gravity plus flat-plate wind on each grid face.

use crate::float::Float;
use crate::grid::ClothGrid;
use crate::row::ClothRow;
use crate::vec::Vec3;

/// Wind vectors shorter than this (per component) are treated as calm.
pub const WIND_EPSILON: f32 = 1.0e-4;

/// Wind force on a triangle spanned by edges `first` and `second`.
///
/// The face normal is scaled by how much of the wind projects onto it.
/// Degenerate triangles have a zero normal and contribute nothing.
pub fn face_wind<F: Float>(first: Vec3<F>, second: Vec3<F>, wind: Vec3<F>) -> Vec3<F> {
    let normal = first.cross(second).normalize();
    normal.scale(normal.dot(wind))
}

/// Recompute every row's acceleration from gravity and wind.
///
/// Each segment's upper row collects wind from the two triangles of every
/// quad below it. The terminal row is the upper row of no segment, so it
/// gets the same two-triangle pattern mirrored against the row above.
pub fn update_accelerations<F: Float>(grid: &mut ClothGrid<F>, gravity: Vec3<F>, wind: Vec3<F>) {
    for row in grid.rows_mut() {
        row.acceleration.reset(gravity);
    }

    if wind.is_near_zero(F::from_f32(WIND_EPSILON)) {
        return;
    }

    let segments = grid.segment_count();
    for seg in 0..segments {
        let (a, b) = grid.pair_mut(seg);
        accumulate_upper(a, b, wind);
        if seg + 1 == segments {
            accumulate_terminal(a, b, wind);
        }
    }
}

fn accumulate_upper<F: Float>(a: &mut ClothRow<F>, b: &ClothRow<F>, wind: Vec3<F>) {
    if !a.acceleration.is_per_point() {
        return;
    }
    let pa = &a.positions;
    let pb = &b.positions;
    for i in 0..pa.len() - 1 {
        let f1 = face_wind(pa[i + 1] - pa[i], pb[i] - pa[i], wind);
        let f2 = face_wind(pb[i + 1] - pa[i + 1], pa[i] - pa[i + 1], wind);
        a.acceleration.add(i, f1);
        a.acceleration.add(i + 1, f2);
    }
}

fn accumulate_terminal<F: Float>(a: &ClothRow<F>, b: &mut ClothRow<F>, wind: Vec3<F>) {
    if !b.acceleration.is_per_point() {
        return;
    }
    let pa = &a.positions;
    let pb = &b.positions;
    for i in 0..pb.len() - 1 {
        let f1 = face_wind(pa[i] - pb[i], pb[i + 1] - pb[i], wind);
        let f2 = face_wind(pb[i] - pb[i + 1], pa[i + 1] - pb[i + 1], wind);
        b.acceleration.add(i, f1);
        b.acceleration.add(i + 1, f2);
    }
}
