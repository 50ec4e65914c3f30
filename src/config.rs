//! Cloth configuration: sheet dimensions, solver settings and frame selectors.

use crate::error::ClothError;
use crate::float::Float;
use crate::vec::Vec3;

/// Narrowest sheet accepted; narrower widths are raised to this.
pub const MIN_WIDTH: f32 = 0.01;
/// Upper bound on constraint passes per substep.
pub const MAX_SOLVER_ITERATIONS: usize = 100;
/// Upper bound on sides (points per row minus one).
pub const MAX_SIDE_COUNT: usize = 16;
/// Upper bound on segments (rows minus one).
pub const MAX_SEGMENT_COUNT: usize = 50;
/// Substeps per second before time dilation.
pub const DEFAULT_SUBSTEP_RATE: f32 = 60.0;
/// Shortest substep accepted.
pub const MIN_SUBSTEP: f32 = 1.0e-5;
/// Most substeps a single tick may run; time beyond this is dropped.
pub const MAX_SUBSTEPS_PER_TICK: usize = 600;

/// Owner axis along which the points of each row are spread.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SideAxis {
    /// Owner forward axis.
    #[default]
    X,
    /// Owner right axis.
    Y,
    /// Owner up axis.
    Z,
}

impl SideAxis {
    /// The axis in the owner's own frame.
    pub fn local_vector<F: Float>(self) -> Vec3<F> {
        match self {
            SideAxis::X => Vec3::unit_x(),
            SideAxis::Y => Vec3::unit_y(),
            SideAxis::Z => Vec3::unit_z(),
        }
    }
}

/// Optional collision plane through the owner origin.
///
/// The name lists the plane's two spanning axes; the remaining axis is the
/// normal, and points are kept on its positive side.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CollisionPlane {
    /// No collision.
    #[default]
    None,
    /// Normal along owner Z.
    XY,
    /// Normal along owner X.
    YZ,
    /// Normal along owner Y.
    ZX,
}

impl CollisionPlane {
    /// Plane normal in the owner's frame, or `None` when collision is off.
    pub fn local_normal<F: Float>(self) -> Option<Vec3<F>> {
        match self {
            CollisionPlane::None => None,
            CollisionPlane::XY => Some(Vec3::unit_z()),
            CollisionPlane::YZ => Some(Vec3::unit_x()),
            CollisionPlane::ZX => Some(Vec3::unit_y()),
        }
    }
}

/// Configuration for a cloth sheet.
///
/// Values are corrected by [`ClothConfig::clamped`] when a simulation is
/// built, never rejected. Use [`ClothConfig::validate`] to check strictly.
///
/// # Builder Pattern
/// ```
/// use drape::config::{ClothConfig, CollisionPlane, SideAxis};
/// use drape::vec::Vec3;
///
/// let config: ClothConfig<f32> = ClothConfig::new()
///     .with_size(200.0, 80.0)
///     .with_grid(4, 20)
///     .with_solver_iterations(16)
///     .with_wind(Vec3::new(300.0, 0.0, 0.0))
///     .with_side_axis(SideAxis::Y)
///     .with_collision_plane(CollisionPlane::XY);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClothConfig<F: Float> {
    /// Rest length of the sheet along its rows. Default: 100.
    pub length: F,
    /// Rest width of each row. Default: 100.
    pub width: F,
    /// Fraction of inherited velocity removed per substep, [0, 1]. Default: 0.
    pub damping: F,
    /// Constraint passes per substep. More = stiffer. Default: 10.
    pub solver_iterations: usize,
    /// Sides per row; each row holds `side_count + 1` points. Default: 1.
    pub side_count: usize,
    /// Segments along the length; the grid has `segment_count + 1` rows. Default: 10.
    pub segment_count: usize,
    /// Leading rows pinned to the owner frame. Default: 1.
    pub fixed_line_count: usize,
    /// Simulate in world space (true) or in the owner's frame (false). Default: true.
    pub process_in_world_space: bool,
    /// World-space acceleration applied to every free point. Default: (0, 0, -980).
    pub gravity: Vec3<F>,
    /// Use `local_gravity` instead of `gravity`. Default: false.
    pub use_local_gravity: bool,
    /// Owner-frame gravity, rotated with the owner. Default: (0, 0, -980).
    pub local_gravity: Vec3<F>,
    /// Owner-frame wind, rotated with the owner; zero disables aerodynamic
    /// forcing. Default: zero.
    pub wind: Vec3<F>,
    /// Owner axis each row spreads along. Default: X.
    pub side_axis: SideAxis,
    /// Collision plane relative to the owner. Default: none.
    pub collision_plane: CollisionPlane,
    /// Base substep in seconds, scaled by time dilation each tick. Default: 1/60.
    pub substep: F,
}

impl<F: Float> ClothConfig<F> {
    /// Create a new config with default values.
    pub fn new() -> Self {
        ClothConfig {
            length: F::from_f32(100.0),
            width: F::from_f32(100.0),
            damping: F::zero(),
            solver_iterations: 10,
            side_count: 1,
            segment_count: 10,
            fixed_line_count: 1,
            process_in_world_space: true,
            gravity: Vec3::new(F::zero(), F::zero(), F::from_f32(-980.0)),
            use_local_gravity: false,
            local_gravity: Vec3::new(F::zero(), F::zero(), F::from_f32(-980.0)),
            wind: Vec3::zero(),
            side_axis: SideAxis::X,
            collision_plane: CollisionPlane::None,
            substep: F::one() / F::from_f32(DEFAULT_SUBSTEP_RATE),
        }
    }

    /// Set the sheet length and width.
    pub fn with_size(mut self, length: F, width: F) -> Self {
        self.length = length;
        self.width = width;
        self
    }

    /// Set the number of sides per row and segments along the length.
    pub fn with_grid(mut self, side_count: usize, segment_count: usize) -> Self {
        self.side_count = side_count;
        self.segment_count = segment_count;
        self
    }

    /// Set the damping factor.
    pub fn with_damping(mut self, damping: F) -> Self {
        self.damping = damping;
        self
    }

    /// Set the number of constraint passes per substep.
    pub fn with_solver_iterations(mut self, iterations: usize) -> Self {
        self.solver_iterations = iterations;
        self
    }

    /// Set how many leading rows are anchored.
    pub fn with_fixed_line_count(mut self, count: usize) -> Self {
        self.fixed_line_count = count;
        self
    }

    /// Choose between world-space and owner-space simulation.
    pub fn with_world_space(mut self, world_space: bool) -> Self {
        self.process_in_world_space = world_space;
        self
    }

    /// Set the gravity vector.
    pub fn with_gravity(mut self, gravity: Vec3<F>) -> Self {
        self.gravity = gravity;
        self
    }

    /// Switch to owner-frame gravity.
    pub fn with_local_gravity(mut self, gravity: Vec3<F>) -> Self {
        self.use_local_gravity = true;
        self.local_gravity = gravity;
        self
    }

    /// Set the owner-frame wind vector.
    pub fn with_wind(mut self, wind: Vec3<F>) -> Self {
        self.wind = wind;
        self
    }

    /// Set the owner axis rows spread along.
    pub fn with_side_axis(mut self, axis: SideAxis) -> Self {
        self.side_axis = axis;
        self
    }

    /// Set the owner-relative collision plane.
    pub fn with_collision_plane(mut self, plane: CollisionPlane) -> Self {
        self.collision_plane = plane;
        self
    }

    /// Set the base substep in seconds.
    pub fn with_substep(mut self, substep: F) -> Self {
        self.substep = substep;
        self
    }

    /// Number of rows in the grid after clamping.
    pub fn row_count(&self) -> usize {
        self.segment_count.clamp(1, MAX_SEGMENT_COUNT) + 1
    }

    /// Number of points in each row after clamping.
    pub fn point_count(&self) -> usize {
        self.side_count.clamp(1, MAX_SIDE_COUNT) + 1
    }

    /// Whether wind is strong enough to be simulated.
    pub fn has_wind(&self) -> bool {
        !self.wind.is_near_zero(F::from_f32(1e-4))
    }

    /// Copy with every field pulled into its accepted range.
    ///
    /// NaN scalars collapse to the lower bound; non-finite vectors become zero.
    pub fn clamped(&self) -> Self {
        let zero = F::zero();
        let finite_or_zero = |v: Vec3<F>| if v.is_finite() { v } else { Vec3::zero() };
        let segment_count = self.segment_count.clamp(1, MAX_SEGMENT_COUNT);
        ClothConfig {
            length: self.length.max(zero),
            width: self.width.max(F::from_f32(MIN_WIDTH)),
            damping: self.damping.clamp(zero, F::one()),
            solver_iterations: self.solver_iterations.clamp(1, MAX_SOLVER_ITERATIONS),
            side_count: self.side_count.clamp(1, MAX_SIDE_COUNT),
            segment_count,
            fixed_line_count: self.fixed_line_count.clamp(1, segment_count + 1),
            process_in_world_space: self.process_in_world_space,
            gravity: finite_or_zero(self.gravity),
            use_local_gravity: self.use_local_gravity,
            local_gravity: finite_or_zero(self.local_gravity),
            wind: finite_or_zero(self.wind),
            side_axis: self.side_axis,
            collision_plane: self.collision_plane,
            substep: self.substep.max(F::from_f32(MIN_SUBSTEP)),
        }
    }

    /// Strict check: the first field that [`clamped`](Self::clamped) would change.
    pub fn validate(&self) -> Result<(), ClothError> {
        let scalars = [
            ("length", self.length, 0.0, f64::MAX),
            ("width", self.width, MIN_WIDTH as f64, f64::MAX),
            ("damping", self.damping, 0.0, 1.0),
            ("substep", self.substep, MIN_SUBSTEP as f64, f64::MAX),
        ];
        for (field, value, min, max) in scalars {
            if !value.is_finite() {
                return Err(ClothError::NonFinite { field });
            }
            check_range(field, value.to_f64(), min, max)?;
        }

        if !self.gravity.is_finite() {
            return Err(ClothError::NonFinite { field: "gravity" });
        }
        if !self.local_gravity.is_finite() {
            return Err(ClothError::NonFinite { field: "local_gravity" });
        }
        if !self.wind.is_finite() {
            return Err(ClothError::NonFinite { field: "wind" });
        }

        let counts = [
            ("solver_iterations", self.solver_iterations, 1, MAX_SOLVER_ITERATIONS),
            ("side_count", self.side_count, 1, MAX_SIDE_COUNT),
            ("segment_count", self.segment_count, 1, MAX_SEGMENT_COUNT),
            ("fixed_line_count", self.fixed_line_count, 1, self.row_count()),
        ];
        for (field, value, min, max) in counts {
            check_range(field, value as f64, min as f64, max as f64)?;
        }
        Ok(())
    }
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ClothError> {
    if value < min || value > max {
        return Err(ClothError::OutOfRange { field, min, max, value });
    }
    Ok(())
}

impl<F: Float> Default for ClothConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config: ClothConfig<f32> = ClothConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.clamped(), config);
        assert_eq!(config.row_count(), 11);
        assert_eq!(config.point_count(), 2);
    }

    #[test]
    fn clamps_counts_and_ratios() {
        let config: ClothConfig<f32> = ClothConfig::new()
            .with_grid(0, 400)
            .with_solver_iterations(0)
            .with_fixed_line_count(1000)
            .with_damping(3.0)
            .with_size(-5.0, 0.0);
        let c = config.clamped();
        assert_eq!(c.side_count, 1);
        assert_eq!(c.segment_count, MAX_SEGMENT_COUNT);
        assert_eq!(c.solver_iterations, 1);
        assert_eq!(c.fixed_line_count, MAX_SEGMENT_COUNT + 1);
        assert_eq!(c.damping, 1.0);
        assert_eq!(c.length, 0.0);
        assert_eq!(c.width, MIN_WIDTH);
    }

    #[test]
    fn zero_fixed_lines_raised_to_one() {
        let c = ClothConfig::<f64>::new().with_fixed_line_count(0).clamped();
        assert_eq!(c.fixed_line_count, 1);
    }

    #[test]
    fn nan_collapses_to_lower_bound() {
        let c = ClothConfig::<f32>::new()
            .with_damping(f32::NAN)
            .with_gravity(Vec3::new(f32::NAN, 0.0, 0.0))
            .clamped();
        assert_eq!(c.damping, 0.0);
        assert_eq!(c.gravity, Vec3::zero());
    }

    #[test]
    fn validate_reports_field() {
        let err = ClothConfig::<f32>::new().with_grid(17, 10).validate().unwrap_err();
        match err {
            ClothError::OutOfRange { field, .. } => assert_eq!(field, "side_count"),
            other => panic!("unexpected error {:?}", other),
        }
        let err = ClothConfig::<f32>::new().with_wind(Vec3::new(0.0, f32::INFINITY, 0.0)).validate();
        assert_eq!(err, Err(ClothError::NonFinite { field: "wind" }));
    }

    #[test]
    fn local_gravity_builder() {
        let c = ClothConfig::<f32>::new().with_local_gravity(Vec3::new(0.0, -50.0, 0.0));
        assert!(c.use_local_gravity);
        assert_eq!(c.local_gravity, Vec3::new(0.0, -50.0, 0.0));
        assert_eq!(c.gravity, Vec3::new(0.0, 0.0, -980.0));

        let bad = ClothConfig::<f32>::new().with_local_gravity(Vec3::new(f32::NAN, 0.0, 0.0));
        assert_eq!(bad.validate(), Err(ClothError::NonFinite { field: "local_gravity" }));
        assert_eq!(bad.clamped().local_gravity, Vec3::zero());
    }

    #[test]
    fn wind_threshold() {
        assert!(!ClothConfig::<f32>::new().has_wind());
        assert!(ClothConfig::<f32>::new().with_wind(Vec3::new(0.0, 5.0, 0.0)).has_wind());
    }

    #[test]
    fn plane_normals() {
        assert_eq!(CollisionPlane::None.local_normal::<f32>(), None);
        assert_eq!(CollisionPlane::XY.local_normal::<f32>(), Some(Vec3::unit_z()));
        assert_eq!(CollisionPlane::YZ.local_normal::<f32>(), Some(Vec3::unit_x()));
        assert_eq!(CollisionPlane::ZX.local_normal::<f32>(), Some(Vec3::unit_y()));
    }
}
