//! Verlet stepping for free rows and frame-following for anchored rows.

use crate::float::Float;
use crate::grid::ClothGrid;
use crate::row::ClothRow;
use crate::vec::Vec3;

impl<F: Float> ClothRow<F> {
    /// Position-Verlet step with implicit velocity.
    ///
    /// Damping scales only the inherited velocity. Accelerations are fresh
    /// every substep and always multiplied by `dt * dt`, in both storage modes.
    pub fn verlet_step(&mut self, dt: F) {
        let dt_sq = dt * dt;
        let keep = F::one() - self.damping;
        for i in 0..self.positions.len() {
            let pos = self.positions[i];
            let velocity = pos - self.previous[i];
            let new_pos = pos + velocity.scale(keep) + self.acceleration.at(i).scale(dt_sq);
            self.previous[i] = pos;
            self.positions[i] = new_pos;
        }
    }

    /// Snap an anchored row onto the attachment frame.
    ///
    /// `previous` holds the fixed offsets and is left untouched.
    pub fn follow_frame(&mut self, center: Vec3<F>, side_axis: Vec3<F>) {
        for i in 0..self.positions.len() {
            self.positions[i] = center + self.side_offset(i, side_axis) + self.previous[i];
        }
    }
}

/// Advance every row by one substep.
pub fn integrate<F: Float>(grid: &mut ClothGrid<F>, center: Vec3<F>, side_axis: Vec3<F>, dt: F) {
    for row in grid.rows_mut() {
        if row.free {
            row.verlet_step(dt);
        } else {
            row.follow_frame(center, side_axis);
        }
    }
}
