//! Positional clipping of free points against a single plane.

use crate::float::Float;
use crate::grid::ClothGrid;
use crate::vec::Vec3;

/// Infinite plane through `origin`; the positive side is along `normal`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Plane<F: Float> {
    pub origin: Vec3<F>,
    pub normal: Vec3<F>,
}

impl<F: Float> Plane<F> {
    /// The normal is normalized on construction.
    pub fn new(origin: Vec3<F>, normal: Vec3<F>) -> Self {
        Plane { origin, normal: normal.normalize() }
    }

    pub fn signed_distance(&self, point: Vec3<F>) -> F {
        point.dot(self.normal) - self.origin.dot(self.normal)
    }

    /// Move `point` onto the plane if it is behind it.
    pub fn clip(&self, point: Vec3<F>) -> Vec3<F> {
        let distance = self.signed_distance(point);
        if distance < F::zero() {
            point + self.normal.scale(-distance)
        } else {
            point
        }
    }
}

/// Push every free point that sits behind `plane` back onto it.
///
/// Purely positional: the Verlet history is untouched, so the correction
/// shows up as velocity on the next substep. Anchored rows are exempt.
pub fn resolve<F: Float>(grid: &mut ClothGrid<F>, plane: &Plane<F>) {
    for row in grid.rows_mut().iter_mut().filter(|r| r.is_free()) {
        for p in row.positions_mut() {
            *p = plane.clip(*p);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClothConfig;

    fn floor() -> Plane<f64> {
        Plane::new(Vec3::new(0.0, 0.0, -15.0), Vec3::new(0.0, 0.0, 2.0))
    }

    #[test]
    fn signed_distance_sign() {
        let plane = floor();
        assert!((plane.signed_distance(Vec3::new(3.0, 1.0, -10.0)) - 5.0).abs() < 1e-12);
        assert!((plane.signed_distance(Vec3::new(3.0, 1.0, -20.0)) + 5.0).abs() < 1e-12);
    }

    #[test]
    fn clip_lands_on_plane() {
        let plane = floor();
        let clipped = plane.clip(Vec3::new(3.0, 1.0, -22.0));
        assert!(plane.signed_distance(clipped).abs() < 1e-12);
        assert_eq!(clipped.x, 3.0);
        assert_eq!(clipped.y, 1.0);
    }

    #[test]
    fn points_in_front_unchanged() {
        let plane = floor();
        let p = Vec3::new(-7.0, 2.0, -15.0);
        assert_eq!(plane.clip(p), p);
    }

    #[test]
    fn only_free_rows_are_clipped() {
        // Rows at z = 0, -10, -20, -30; plane at z = -15 keeps only the top two in front.
        let config = ClothConfig::<f64>::new().with_size(30.0, 10.0).with_grid(1, 3).with_fixed_line_count(1);
        let mut grid = ClothGrid::new(&config, Vec3::zero(), Vec3::new(0.0, 0.0, -1.0), Vec3::unit_x());
        let plane = Plane::new(Vec3::new(0.0, 0.0, -15.0), Vec3::unit_z());
        resolve(&mut grid, &plane);
        assert!((grid.position_at(1, 0).z + 10.0).abs() < 1e-12);
        assert!((grid.position_at(2, 0).z + 15.0).abs() < 1e-12);
        assert!((grid.position_at(3, 1).z + 15.0).abs() < 1e-12);

        // An anchored row behind the plane is left where it is.
        let plane = Plane::new(Vec3::new(0.0, 0.0, 5.0), Vec3::unit_z());
        resolve(&mut grid, &plane);
        assert_eq!(grid.position_at(0, 0).z, 0.0);
        assert!((grid.position_at(1, 0).z - 5.0).abs() < 1e-12);
    }
}
