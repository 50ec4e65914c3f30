//! The cloth grid: rows of points, the first few anchored to the owner.

use crate::config::ClothConfig;
use crate::float::Float;
use crate::row::ClothRow;
use crate::vec::Vec3;
use alloc::vec::Vec as AllocVec;

/// Rows ordered along the sheet's length.
///
/// Row `r` holds `side_count + 1` points. Rows `0..fixed_row_count` are
/// anchored; the remainder are free. The shape never changes after
/// construction: a new configuration builds a new grid.
#[derive(Clone, Debug)]
pub struct ClothGrid<F: Float> {
    rows: AllocVec<ClothRow<F>>,
    fixed_rows: usize,
}

impl<F: Float> ClothGrid<F> {
    /// Build a grid hanging from `start` along `drop_direction`.
    ///
    /// Row `k` is centered at `start + drop_direction * length * k / segment_count`.
    /// Anchored rows record that displacement as their offset from the
    /// attachment frame. `drop_direction` and `side_axis` are expected to be
    /// unit vectors in simulation space.
    pub fn new(
        config: &ClothConfig<F>,
        start: Vec3<F>,
        drop_direction: Vec3<F>,
        side_axis: Vec3<F>,
    ) -> Self {
        let config = config.clamped();
        let row_count = config.segment_count + 1;
        let fixed_rows = config.fixed_line_count;
        let per_point = config.has_wind();
        let segments = F::from_usize(config.segment_count);

        let mut rows = AllocVec::with_capacity(row_count);
        for k in 0..row_count {
            let free = k >= fixed_rows;
            let mut row = ClothRow::new(free, config.side_count, config.width, config.damping, per_point);
            let alpha = F::from_usize(k) / segments;
            let relative = drop_direction.scale(alpha * config.length);
            let center = start + relative;
            if free {
                row.set_initial_positions(center, Vec3::zero(), side_axis);
            } else {
                row.set_initial_positions(center, relative, side_axis);
            }
            rows.push(row);
        }

        ClothGrid { rows, fixed_rows }
    }

    /// Mutable access to rows `segment` and `segment + 1` at once.
    pub fn pair_mut(&mut self, segment: usize) -> (&mut ClothRow<F>, &mut ClothRow<F>) {
        let (head, tail) = self.rows.split_at_mut(segment + 1);
        (&mut head[segment], &mut tail[0])
    }

    pub fn rows(&self) -> &[ClothRow<F>] { &self.rows }
    pub fn rows_mut(&mut self) -> &mut [ClothRow<F>] { &mut self.rows }
    pub fn row(&self, index: usize) -> &ClothRow<F> { &self.rows[index] }
    pub fn row_mut(&mut self, index: usize) -> &mut ClothRow<F> { &mut self.rows[index] }
    pub fn row_count(&self) -> usize { self.rows.len() }
    pub fn point_count(&self) -> usize { self.rows[0].len() }
    pub fn segment_count(&self) -> usize { self.rows.len() - 1 }
    pub fn side_count(&self) -> usize { self.point_count() - 1 }
    pub fn fixed_row_count(&self) -> usize { self.fixed_rows }

    /// Index of the last row, the one that is never the upper half of a segment.
    pub fn terminal_row(&self) -> usize { self.rows.len() - 1 }

    pub fn position_at(&self, row: usize, col: usize) -> Vec3<F> {
        self.rows[row].positions[col]
    }

    /// Give every row per-point (wind) or uniform (calm) acceleration storage.
    pub fn set_per_point_acceleration(&mut self, per_point: bool) {
        for row in &mut self.rows {
            row.set_per_point(per_point);
        }
    }

    /// Row-major copy of every position.
    pub fn positions(&self) -> AllocVec<Vec3<F>> {
        self.rows.iter().flat_map(|r| r.positions.iter().copied()).collect()
    }
}
