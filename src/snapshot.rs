//! Read-only copies of the grid handed to rendering.

use crate::error::ClothError;
use crate::float::Float;
use crate::transform::OwnerTransform;
use crate::vec::Vec3;
use alloc::vec::Vec as AllocVec;

/// Axis-aligned bounding box.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb<F: Float> {
    pub min: Vec3<F>,
    pub max: Vec3<F>,
}

impl<F: Float> Aabb<F> {
    /// Smallest box containing every point; `None` for an empty set.
    pub fn from_points<I: IntoIterator<Item = Vec3<F>>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let bounds = iter.fold(Aabb { min: first, max: first }, |b, p| Aabb {
            min: b.min.min(p),
            max: b.max.max(p),
        });
        Some(bounds)
    }

    pub fn center(&self) -> Vec3<F> {
        (self.min + self.max).scale(F::half())
    }

    pub fn size(&self) -> Vec3<F> {
        self.max - self.min
    }

    pub fn contains(&self, p: Vec3<F>) -> bool {
        p.x >= self.min.x && p.y >= self.min.y && p.z >= self.min.z
            && p.x <= self.max.x && p.y <= self.max.y && p.z <= self.max.z
    }
}

/// Row-major copy of every point position after a tick.
#[derive(Clone, Debug, PartialEq)]
pub struct GridSnapshot<F: Float> {
    rows: usize,
    cols: usize,
    points: AllocVec<Vec3<F>>,
}

impl<F: Float> GridSnapshot<F> {
    /// Wrap row-major `points`. `points.len()` must equal `rows * cols`.
    pub fn new(rows: usize, cols: usize, points: AllocVec<Vec3<F>>) -> Self {
        debug_assert_eq!(points.len(), rows * cols, "snapshot size mismatch");
        GridSnapshot { rows, cols, points }
    }

    pub fn rows(&self) -> usize { self.rows }
    pub fn cols(&self) -> usize { self.cols }
    pub fn points(&self) -> &[Vec3<F>] { &self.points }

    pub fn point(&self, row: usize, col: usize) -> Vec3<F> {
        self.points[row * self.cols + col]
    }

    pub fn try_point(&self, row: usize, col: usize) -> Result<Vec3<F>, ClothError> {
        if row >= self.rows || col >= self.cols {
            return Err(ClothError::PointOutOfBounds { row, col, rows: self.rows, cols: self.cols });
        }
        Ok(self.point(row, col))
    }

    pub fn row(&self, row: usize) -> &[Vec3<F>] {
        &self.points[row * self.cols..(row + 1) * self.cols]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[Vec3<F>]> {
        self.points.chunks(self.cols.max(1))
    }

    /// Bounds of every point, in the snapshot's own space.
    pub fn bounds(&self) -> Option<Aabb<F>> {
        Aabb::from_points(self.points.iter().copied())
    }

    /// Copy with every point expressed in the owner's local frame.
    pub fn to_owner_local(&self, owner: &OwnerTransform<F>) -> Self {
        self.map(|p| owner.inverse_transform_point(p))
    }

    /// Copy with every point moved from the owner's frame into world space.
    pub fn to_world(&self, owner: &OwnerTransform<F>) -> Self {
        self.map(|p| owner.transform_point(p))
    }

    /// Interleaved `[x0, y0, z0, x1, ...]`, row-major.
    pub fn to_flat(&self) -> AllocVec<F> {
        let mut out = AllocVec::with_capacity(self.points.len() * 3);
        for p in &self.points {
            out.push(p.x);
            out.push(p.y);
            out.push(p.z);
        }
        out
    }

    fn map(&self, f: impl Fn(Vec3<F>) -> Vec3<F>) -> Self {
        GridSnapshot {
            rows: self.rows,
            cols: self.cols,
            points: self.points.iter().map(|p| f(*p)).collect(),
        }
    }
}
