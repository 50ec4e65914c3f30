use drape::config::ClothConfig;
use drape::{forces, integrator};
use drape::{ClothSimulation, OwnerTransform, Quat, RowAcceleration, SideAxis, Vec3};

fn approx(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() < eps
}

fn approx_vec(a: Vec3<f64>, b: Vec3<f64>, eps: f64) -> bool {
    (a - b).length() < eps
}

#[test]
fn grid_dimensions_follow_counts() {
    let owner = OwnerTransform::identity();
    let config = ClothConfig::<f64>::new().with_grid(4, 8).with_fixed_line_count(3);
    let sim = ClothSimulation::new(config, &owner);
    let grid = sim.grid();
    assert_eq!(grid.row_count(), 9);
    assert_eq!(grid.point_count(), 5);
    assert_eq!(grid.fixed_row_count(), 3);
    for (k, row) in grid.rows().iter().enumerate() {
        assert_eq!(row.len(), 5);
        assert_eq!(row.is_free(), k >= 3);
    }
}

#[test]
fn rows_evenly_spaced_along_gravity() {
    let owner = OwnerTransform::from_location(Vec3::new(0.0, 0.0, 100.0));
    let config = ClothConfig::<f64>::new().with_size(80.0, 40.0).with_grid(4, 4);
    let sim = ClothSimulation::new(config, &owner);
    let grid = sim.grid();
    for k in 0..grid.row_count() {
        for i in 0..grid.point_count() {
            let p = grid.position_at(k, i);
            assert!(approx(p.z, 100.0 - 20.0 * k as f64, 1e-9), "row {} z = {}", k, p.z);
            assert!(approx(p.x, -20.0 + 10.0 * i as f64, 1e-9), "col {} x = {}", i, p.x);
            assert!(approx(p.y, 0.0, 1e-12));
        }
    }
}

#[test]
fn side_axis_follows_owner_rotation() {
    let owner = OwnerTransform::new(
        Vec3::zero(),
        Quat::from_axis_angle(Vec3::unit_z(), core::f64::consts::FRAC_PI_2),
    );
    let config = ClothConfig::<f64>::new().with_side_axis(SideAxis::X).with_grid(1, 2);
    let sim = ClothSimulation::new(config, &owner);
    let row = sim.grid().row(0);
    // Owner X points along world Y after a quarter turn.
    let span = row.positions()[1] - row.positions()[0];
    assert!(approx_vec(span, Vec3::new(0.0, 100.0, 0.0), 1e-9));
}

#[test]
fn wind_selects_per_point_storage() {
    let owner = OwnerTransform::identity();
    let calm = ClothSimulation::new(ClothConfig::<f32>::new(), &owner);
    let windy = ClothSimulation::new(ClothConfig::<f32>::new().with_wind(Vec3::new(0.0, 50.0, 0.0)), &owner);
    assert!(matches!(calm.grid().row(1).acceleration(), RowAcceleration::Uniform(_)));
    assert!(windy.grid().row(1).acceleration().is_per_point());
}

#[test]
fn verlet_step_matches_closed_form() {
    // 2x2 sheet, 100 x 100, top row anchored at the origin.
    let owner = OwnerTransform::identity();
    let gravity = Vec3::new(0.0, 0.0, -980.0);
    let mut sim = ClothSimulation::new(ClothConfig::<f64>::new().with_grid(1, 1), &owner);
    let dt = 1.0 / 60.0;
    let g = 980.0 * dt * dt;
    let grid = sim.grid_mut();

    forces::update_accelerations(grid, gravity, Vec3::zero());
    integrator::integrate(grid, Vec3::zero(), Vec3::unit_x(), dt);

    assert_eq!(grid.position_at(0, 0), Vec3::new(-50.0, 0.0, 0.0));
    assert_eq!(grid.position_at(0, 1), Vec3::new(50.0, 0.0, 0.0));
    assert!(approx_vec(grid.position_at(1, 0), Vec3::new(-50.0, 0.0, -100.0 - g), 1e-9));
    assert!(approx_vec(grid.position_at(1, 1), Vec3::new(50.0, 0.0, -100.0 - g), 1e-9));

    // Second step inherits the first step's displacement.
    forces::update_accelerations(grid, gravity, Vec3::zero());
    integrator::integrate(grid, Vec3::zero(), Vec3::unit_x(), dt);
    assert!(approx(grid.position_at(1, 0).z, -100.0 - 3.0 * g, 1e-9));
}

#[test]
fn damping_scales_inherited_velocity_only() {
    let owner = OwnerTransform::identity();
    let config = ClothConfig::<f64>::new().with_grid(1, 1).with_damping(0.5);
    let mut sim = ClothSimulation::new(config, &owner);
    let dt = 1.0 / 60.0;
    let g = 980.0 * dt * dt;
    let grid = sim.grid_mut();
    for _ in 0..2 {
        forces::update_accelerations(grid, Vec3::new(0.0, 0.0, -980.0), Vec3::zero());
        integrator::integrate(grid, Vec3::zero(), Vec3::unit_x(), dt);
    }
    // First step: -g. Second: -g * 0.5 inherited, -g fresh.
    assert!(approx(grid.position_at(1, 0).z, -100.0 - 2.5 * g, 1e-9));
}

#[test]
fn snapshot_is_row_major_copy() {
    let owner = OwnerTransform::from_location(Vec3::new(1.0, 2.0, 3.0));
    let sim = ClothSimulation::new(ClothConfig::<f64>::new().with_grid(3, 2), &owner);
    let snap = sim.snapshot();
    assert_eq!(snap.points().len(), 12);
    for k in 0..snap.rows() {
        for i in 0..snap.cols() {
            assert_eq!(snap.point(k, i), sim.grid().position_at(k, i));
        }
    }
    assert!(snap.try_point(3, 0).is_err());
}
