//! Owner frame: the world position and orientation the cloth is attached to.

use crate::float::Float;
use crate::vec::Vec3;
use core::ops::Mul;

/// Rotation quaternion (`w` is the scalar part).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quat<F: Float> {
    pub x: F,
    pub y: F,
    pub z: F,
    pub w: F,
}

impl<F: Float> Quat<F> {
    pub fn new(x: F, y: F, z: F, w: F) -> Self {
        Quat { x, y, z, w }
    }

    pub fn identity() -> Self {
        Quat { x: F::zero(), y: F::zero(), z: F::zero(), w: F::one() }
    }

    /// Rotation of `angle` radians about `axis`. A zero axis yields identity.
    pub fn from_axis_angle(axis: Vec3<F>, angle: F) -> Self {
        let axis = axis.normalize();
        if axis == Vec3::zero() {
            return Self::identity();
        }
        let half = angle * F::half();
        let s = half.sin();
        Quat { x: axis.x * s, y: axis.y * s, z: axis.z * s, w: half.cos() }
    }

    /// Inverse rotation, assuming unit length.
    pub fn conjugate(self) -> Self {
        Quat { x: -self.x, y: -self.y, z: -self.z, w: self.w }
    }

    /// Rescale to unit length. Degenerate input yields identity.
    pub fn normalize(self) -> Self {
        let len_sq = self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w;
        let len = len_sq.sqrt();
        if len.is_near_zero(F::from_f32(1e-8)) {
            return Self::identity();
        }
        let inv = F::one() / len;
        Quat { x: self.x * inv, y: self.y * inv, z: self.z * inv, w: self.w * inv }
    }

    /// Rotate a vector by this (unit) quaternion.
    pub fn rotate(self, v: Vec3<F>) -> Vec3<F> {
        let q = Vec3::new(self.x, self.y, self.z);
        let two = F::one() + F::one();
        let t = q.cross(v).scale(two);
        v + t.scale(self.w) + q.cross(t)
    }

    /// Rotate a vector by the inverse of this (unit) quaternion.
    pub fn inverse_rotate(self, v: Vec3<F>) -> Vec3<F> {
        self.conjugate().rotate(v)
    }
}

impl<F: Float> Default for Quat<F> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<F: Float> Mul for Quat<F> {
    type Output = Self;

    /// Hamilton product: `(a * b).rotate(v) == a.rotate(b.rotate(v))`.
    fn mul(self, b: Self) -> Self {
        let a = self;
        Quat {
            x: a.w * b.x + a.x * b.w + a.y * b.z - a.z * b.y,
            y: a.w * b.y - a.x * b.z + a.y * b.w + a.z * b.x,
            z: a.w * b.z + a.x * b.y - a.y * b.x + a.z * b.w,
            w: a.w * b.w - a.x * b.x - a.y * b.y - a.z * b.z,
        }
    }
}

/// World placement of the component that owns the cloth.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OwnerTransform<F: Float> {
    pub location: Vec3<F>,
    pub rotation: Quat<F>,
}

impl<F: Float> OwnerTransform<F> {
    pub fn new(location: Vec3<F>, rotation: Quat<F>) -> Self {
        OwnerTransform { location, rotation: rotation.normalize() }
    }

    pub fn identity() -> Self {
        OwnerTransform { location: Vec3::zero(), rotation: Quat::identity() }
    }

    pub fn from_location(location: Vec3<F>) -> Self {
        OwnerTransform { location, rotation: Quat::identity() }
    }

    pub fn transform_point(&self, p: Vec3<F>) -> Vec3<F> {
        self.location + self.rotation.rotate(p)
    }

    pub fn inverse_transform_point(&self, p: Vec3<F>) -> Vec3<F> {
        self.rotation.inverse_rotate(p - self.location)
    }

    pub fn transform_vector(&self, v: Vec3<F>) -> Vec3<F> {
        self.rotation.rotate(v)
    }

    pub fn inverse_transform_vector(&self, v: Vec3<F>) -> Vec3<F> {
        self.rotation.inverse_rotate(v)
    }

    pub fn axis_x(&self) -> Vec3<F> { self.rotation.rotate(Vec3::unit_x()) }
    pub fn axis_y(&self) -> Vec3<F> { self.rotation.rotate(Vec3::unit_y()) }
    pub fn axis_z(&self) -> Vec3<F> { self.rotation.rotate(Vec3::unit_z()) }
}
