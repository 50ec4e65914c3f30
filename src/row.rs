//! A single row of cloth points spanning the sheet's width.

use crate::float::Float;
use crate::vec::Vec3;
use alloc::vec;
use alloc::vec::Vec as AllocVec;

/// Acceleration storage for a row.
///
/// `PerPoint` is needed once wind produces direction-dependent forces;
/// `Uniform` is the wind-free reduction that stores one shared vector.
#[derive(Clone, Debug, PartialEq)]
pub enum RowAcceleration<F: Float> {
    Uniform(Vec3<F>),
    PerPoint(AllocVec<Vec3<F>>),
}

impl<F: Float> RowAcceleration<F> {
    /// Acceleration of point `index`.
    pub fn at(&self, index: usize) -> Vec3<F> {
        match self {
            RowAcceleration::Uniform(a) => *a,
            RowAcceleration::PerPoint(a) => a[index],
        }
    }

    /// Overwrite every entry with `base`.
    pub fn reset(&mut self, base: Vec3<F>) {
        match self {
            RowAcceleration::Uniform(a) => *a = base,
            RowAcceleration::PerPoint(a) => a.iter_mut().for_each(|v| *v = base),
        }
    }

    /// Add to a single point's acceleration. Ignored in `Uniform` mode.
    pub fn add(&mut self, index: usize, delta: Vec3<F>) {
        if let RowAcceleration::PerPoint(a) = self {
            a[index] += delta;
        }
    }

    pub fn is_per_point(&self) -> bool {
        matches!(self, RowAcceleration::PerPoint(_))
    }
}

/// One rank of the grid.
///
/// `previous` holds the prior position of each point for free rows and the
/// constant offset from the attachment frame for anchored rows.
#[derive(Clone, Debug)]
pub struct ClothRow<F: Float> {
    pub(crate) free: bool,
    pub(crate) width: F,
    pub(crate) damping: F,
    pub(crate) positions: AllocVec<Vec3<F>>,
    pub(crate) previous: AllocVec<Vec3<F>>,
    pub(crate) acceleration: RowAcceleration<F>,
}

impl<F: Float> ClothRow<F> {
    /// Allocate `side_count + 1` points (at least two) at the origin.
    pub fn new(free: bool, side_count: usize, width: F, damping: F, per_point: bool) -> Self {
        let points = side_count.max(1) + 1;
        let acceleration = if per_point {
            RowAcceleration::PerPoint(vec![Vec3::zero(); points])
        } else {
            RowAcceleration::Uniform(Vec3::zero())
        };
        ClothRow {
            free,
            width,
            damping,
            positions: vec![Vec3::zero(); points],
            previous: vec![Vec3::zero(); points],
            acceleration,
        }
    }

    /// Lay the points out along `side_axis`, centered on `center`.
    ///
    /// Free rows start at rest. Anchored rows remember `relative_offset`
    /// as their fixed offset from the attachment frame.
    pub fn set_initial_positions(&mut self, center: Vec3<F>, relative_offset: Vec3<F>, side_axis: Vec3<F>) {
        for i in 0..self.positions.len() {
            let pos = center + self.side_offset(i, side_axis);
            self.positions[i] = pos;
            self.previous[i] = if self.free { pos } else { relative_offset };
        }
    }

    /// Offset of point `index` from the row center along `side_axis`.
    pub fn side_offset(&self, index: usize, side_axis: Vec3<F>) -> Vec3<F> {
        let start = side_axis.scale(-self.width * F::half());
        let delta = side_axis.scale(self.width / F::from_usize(self.side_count()));
        start + delta.scale(F::from_usize(index))
    }

    pub fn is_free(&self) -> bool { self.free }
    pub fn width(&self) -> F { self.width }
    pub fn damping(&self) -> F { self.damping }
    pub fn len(&self) -> usize { self.positions.len() }
    pub fn is_empty(&self) -> bool { self.positions.is_empty() }
    pub fn side_count(&self) -> usize { self.positions.len() - 1 }
    pub fn positions(&self) -> &[Vec3<F>] { &self.positions }
    pub fn previous(&self) -> &[Vec3<F>] { &self.previous }
    pub fn acceleration(&self) -> &RowAcceleration<F> { &self.acceleration }

    /// Rest distance between neighbouring points.
    pub fn side_length(&self) -> F {
        self.width / F::from_usize(self.side_count())
    }

    /// Switch acceleration storage, keeping the current value for uniform rows.
    pub(crate) fn set_per_point(&mut self, per_point: bool) {
        if per_point == self.acceleration.is_per_point() {
            return;
        }
        let base = self.acceleration.at(0);
        self.acceleration = if per_point {
            RowAcceleration::PerPoint(vec![base; self.positions.len()])
        } else {
            RowAcceleration::Uniform(base)
        };
    }

    /// Direct mutable access to point positions.
    pub fn positions_mut(&mut self) -> &mut [Vec3<F>] {
        &mut self.positions
    }
}
