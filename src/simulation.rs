//! Fixed-substep driver tying forces, integration, constraints and collision together.

use crate::collision::{self, Plane};
use crate::config::{ClothConfig, MAX_SUBSTEPS_PER_TICK, MIN_SUBSTEP};
use crate::float::Float;
use crate::forces;
use crate::grid::ClothGrid;
use crate::integrator;
use crate::observer::{NoOpStepObserver, StepObserver};
use crate::snapshot::{Aabb, GridSnapshot};
use crate::solver::ConstraintSolver;
use crate::transform::OwnerTransform;
use crate::vec::Vec3;

/// Everything a substep needs from the owner, in simulation space.
#[derive(Copy, Clone, Debug)]
struct Frame<F: Float> {
    center: Vec3<F>,
    side_axis: Vec3<F>,
    gravity: Vec3<F>,
    wind: Vec3<F>,
    plane: Option<Plane<F>>,
}

/// A cloth sheet attached to an owner.
///
/// The simulation exclusively owns its grid. Each call to
/// [`advance`](Self::advance) runs whole substeps to completion; callers read
/// results through [`snapshot`](Self::snapshot), which copies.
///
/// In world space the points live in world coordinates and anchored rows sit
/// on the owner's location. In owner space the points live in the owner's
/// frame; anchored rows then only feel the owner's displacement since the
/// previous substep, which drags the sheet without carrying it along.
#[derive(Clone, Debug)]
pub struct ClothSimulation<F: Float> {
    config: ClothConfig<F>,
    grid: ClothGrid<F>,
    solver: ConstraintSolver<F>,
    last_owner_location: Vec3<F>,
}

impl<F: Float> ClothSimulation<F> {
    /// Build a sheet hanging from `owner`. Out-of-range settings are clamped.
    pub fn new(config: ClothConfig<F>, owner: &OwnerTransform<F>) -> Self {
        let config = clamp_logged(config);
        let grid = build_grid(&config, owner);
        let solver = ConstraintSolver::new(&config);
        tracing::debug!(
            rows = grid.row_count(),
            cols = grid.point_count(),
            fixed_rows = grid.fixed_row_count(),
            iterations = solver.iterations(),
            world_space = config.process_in_world_space,
            wind = config.has_wind(),
            "cloth initialized"
        );
        ClothSimulation { config, grid, solver, last_owner_location: owner.location }
    }

    /// Replace the configuration and rebuild the grid from scratch.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn reconfigure(&mut self, config: ClothConfig<F>, owner: &OwnerTransform<F>) {
        *self = Self::new(config, owner);
    }

    /// Change gravity from the next substep on. Non-finite input becomes zero.
    pub fn set_gravity(&mut self, gravity: Vec3<F>) {
        self.config.gravity = if gravity.is_finite() { gravity } else { Vec3::zero() };
    }

    /// Change the owner-frame wind from the next substep on, switching acceleration storage
    /// when the wind crosses the calm threshold.
    pub fn set_wind(&mut self, wind: Vec3<F>) {
        let was_windy = self.config.has_wind();
        self.config.wind = if wind.is_finite() { wind } else { Vec3::zero() };
        let windy = self.config.has_wind();
        if windy != was_windy {
            tracing::debug!(windy, "switching acceleration storage");
            self.grid.set_per_point_acceleration(windy);
        }
    }

    /// Run as many whole substeps as fit in `dt`.
    ///
    /// The substep is `min(dt, config.substep * time_dilation)`. Time left
    /// over after the last whole substep is dropped, as is anything past
    /// [`MAX_SUBSTEPS_PER_TICK`]. A substep shorter than [`MIN_SUBSTEP`]
    /// runs nothing. Returns the number of substeps run.
    pub fn advance(&mut self, dt: F, owner: &OwnerTransform<F>, time_dilation: F) -> usize {
        self.advance_with_observer(dt, owner, time_dilation, &mut NoOpStepObserver)
    }

    /// [`advance`](Self::advance), reporting each phase to `observer`.
    pub fn advance_with_observer<O: StepObserver>(
        &mut self,
        dt: F,
        owner: &OwnerTransform<F>,
        time_dilation: F,
        observer: &mut O,
    ) -> usize {
        let count = substep_count(dt, self.config.substep * time_dilation);
        if count == 0 {
            tracing::trace!(?dt, ?time_dilation, "tick skipped");
            observer.on_step_complete(0);
            return 0;
        }

        let substep = dt.min(self.config.substep * time_dilation);
        for i in 0..count {
            self.substep(substep, owner, observer);
            observer.on_substep_complete(i);
        }

        tracing::trace!(substeps = count, ?substep, "tick complete");
        observer.on_step_complete(count);
        count
    }

    fn substep<O: StepObserver>(&mut self, dt: F, owner: &OwnerTransform<F>, observer: &mut O) {
        let frame = self.frame(owner);

        forces::update_accelerations(&mut self.grid, frame.gravity, frame.wind);
        observer.on_forces();

        integrator::integrate(&mut self.grid, frame.center, frame.side_axis, dt);
        observer.on_integrate();

        self.solver.solve(&mut self.grid, observer);

        if let Some(plane) = frame.plane {
            collision::resolve(&mut self.grid, &plane);
        }
        observer.on_collision();
    }

    fn frame(&mut self, owner: &OwnerTransform<F>) -> Frame<F> {
        let c = &self.config;
        let axis = c.side_axis.local_vector();
        let frame = if c.process_in_world_space {
            Frame {
                center: owner.location,
                side_axis: owner.transform_vector(axis),
                gravity: world_gravity(c, owner),
                wind: owner.transform_vector(c.wind),
                plane: c
                    .collision_plane
                    .local_normal()
                    .map(|n| Plane::new(owner.location, owner.transform_vector(n))),
            }
        } else {
            Frame {
                center: owner.inverse_transform_vector(owner.location - self.last_owner_location),
                side_axis: axis,
                gravity: owner_gravity(c, owner),
                wind: c.wind,
                plane: c.collision_plane.local_normal().map(|n| Plane::new(Vec3::zero(), n)),
            }
        };
        self.last_owner_location = owner.location;
        frame
    }

    /// Copy of every position in simulation space.
    pub fn snapshot(&self) -> GridSnapshot<F> {
        GridSnapshot::new(self.grid.row_count(), self.grid.point_count(), self.grid.positions())
    }

    /// Copy of every position in the owner's local frame, ready for meshing.
    pub fn render_snapshot(&self, owner: &OwnerTransform<F>) -> GridSnapshot<F> {
        let snapshot = self.snapshot();
        if self.config.process_in_world_space {
            snapshot.to_owner_local(owner)
        } else {
            snapshot
        }
    }

    /// World-space bounds of the sheet.
    pub fn bounds(&self, owner: &OwnerTransform<F>) -> Aabb<F> {
        let world = self.config.process_in_world_space;
        let points = self.grid.rows().iter().flat_map(|r| r.positions().iter().copied());
        let bounds = Aabb::from_points(points.map(|p| if world { p } else { owner.transform_point(p) }));
        // A grid always holds at least two rows of two points.
        bounds.unwrap_or(Aabb { min: owner.location, max: owner.location })
    }

    pub fn config(&self) -> &ClothConfig<F> { &self.config }
    pub fn grid(&self) -> &ClothGrid<F> { &self.grid }
    pub fn solver(&self) -> &ConstraintSolver<F> { &self.solver }

    /// Mutable grid access for external impulses.
    #[doc(hidden)]
    pub fn grid_mut(&mut self) -> &mut ClothGrid<F> { &mut self.grid }
}

/// Whole substeps of `min(dt, base)` that fit in `dt`, capped.
fn substep_count<F: Float>(dt: F, base: F) -> usize {
    let substep = dt.min(base);
    if !dt.is_finite() || !substep.is_finite() || !(substep >= F::from_f32(MIN_SUBSTEP)) {
        return 0;
    }
    let whole = libm::floor((dt / substep).to_f64());
    if whole >= MAX_SUBSTEPS_PER_TICK as f64 {
        tracing::warn!(requested = whole, cap = MAX_SUBSTEPS_PER_TICK, "substeps capped");
        return MAX_SUBSTEPS_PER_TICK;
    }
    whole as usize
}

fn clamp_logged<F: Float>(config: ClothConfig<F>) -> ClothConfig<F> {
    if let Err(err) = config.validate() {
        tracing::warn!(%err, "cloth configuration clamped");
    }
    config.clamped()
}

/// Gravity in world space: the world setting, or the owner-frame override rotated out.
fn world_gravity<F: Float>(config: &ClothConfig<F>, owner: &OwnerTransform<F>) -> Vec3<F> {
    if config.use_local_gravity {
        owner.transform_vector(config.local_gravity)
    } else {
        config.gravity
    }
}

/// Gravity in the owner's frame.
fn owner_gravity<F: Float>(config: &ClothConfig<F>, owner: &OwnerTransform<F>) -> Vec3<F> {
    if config.use_local_gravity {
        config.local_gravity
    } else {
        owner.inverse_transform_vector(config.gravity)
    }
}

fn build_grid<F: Float>(config: &ClothConfig<F>, owner: &OwnerTransform<F>) -> ClothGrid<F> {
    let axis = config.side_axis.local_vector();
    if config.process_in_world_space {
        let down = world_gravity(config, owner).normalize();
        let drop = if down == Vec3::zero() { -owner.axis_z() } else { down };
        ClothGrid::new(config, owner.location, drop, owner.transform_vector(axis))
    } else {
        let down = owner_gravity(config, owner).normalize();
        let drop = if down == Vec3::zero() { -Vec3::unit_z() } else { down };
        ClothGrid::new(config, Vec3::zero(), drop, axis)
    }
}
