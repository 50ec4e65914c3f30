//! Iterative Gauss-Seidel relaxation over every segment of the grid.

use crate::config::ClothConfig;
use crate::constraint::{solve_horizontal, solve_segment, ConstraintLengths};
use crate::float::Float;
use crate::grid::ClothGrid;
use crate::observer::StepObserver;
use crate::vec::Vec3;

/// Runs the structural and shear constraints a fixed number of times.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ConstraintSolver<F: Float> {
    lengths: ConstraintLengths<F>,
    iterations: usize,
}

impl<F: Float> ConstraintSolver<F> {
    pub fn new(config: &ClothConfig<F>) -> Self {
        ConstraintSolver {
            lengths: ConstraintLengths::from_config(config),
            iterations: config.clamped().solver_iterations,
        }
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations.max(1);
        self
    }

    pub fn lengths(&self) -> &ConstraintLengths<F> { &self.lengths }
    pub fn iterations(&self) -> usize { self.iterations }

    /// One full relaxation: `iterations` passes, segments top to bottom.
    ///
    /// Rows are updated in place, so later segments see the corrections of
    /// earlier ones within the same pass.
    pub fn solve<O: StepObserver>(&self, grid: &mut ClothGrid<F>, observer: &mut O) {
        let segments = grid.segment_count();
        let terminal = grid.terminal_row();
        for i in 0..self.iterations {
            for seg in 0..segments {
                let (a, b) = grid.pair_mut(seg);
                solve_segment(a, b, &self.lengths);
            }
            solve_horizontal(grid.row_mut(terminal), self.lengths.horizontal);
            observer.on_constraint_iteration(i);
        }
    }

    /// Sum of `|distance - target|` over every pair with a free end.
    pub fn total_stretch(&self, grid: &ClothGrid<F>) -> F {
        let l = &self.lengths;
        let mut total = F::zero();
        let mut add = |a: Vec3<F>, b: Vec3<F>, target: F| {
            total = total + (a.distance(b) - target).abs();
        };

        for row in grid.rows().iter().filter(|r| r.is_free()) {
            let p = row.positions();
            for i in 0..p.len() - 1 {
                add(p[i], p[i + 1], l.horizontal);
            }
        }

        for seg in 0..grid.segment_count() {
            let a = grid.row(seg);
            let b = grid.row(seg + 1);
            if !a.is_free() && !b.is_free() {
                continue;
            }
            let (pa, pb) = (a.positions(), b.positions());
            for i in 0..pa.len() {
                add(pa[i], pb[i], l.vertical);
            }
            for i in 0..pa.len() - 1 {
                add(pa[i], pb[i + 1], l.diagonal);
                add(pa[i + 1], pb[i], l.diagonal);
            }
        }
        total
    }
}
