use drape::config::ClothConfig;
use drape::{project, ClothGrid, ClothSimulation, ConstraintSolver, NoOpStepObserver, OwnerTransform, Vec3};

fn hanging_grid(config: &ClothConfig<f64>) -> ClothGrid<f64> {
    let sim = ClothSimulation::new(config.clone(), &OwnerTransform::identity());
    sim.grid().clone()
}

/// Scale every free row's drop from the top row by `factor`.
fn scale_drop(grid: &mut ClothGrid<f64>, factor: f64) {
    for row in grid.rows_mut().iter_mut().filter(|r| r.is_free()) {
        for p in row.positions_mut() {
            p.z *= factor;
        }
    }
}

#[test]
fn projection_never_lengthens() {
    let p = Vec3::new(0.0, 0.0, 0.0);
    let q = Vec3::new(3.0, 4.0, 0.0);
    for target in [0.5f64, 2.0, 5.0, 9.0] {
        let (a, b) = project(p, true, q, true, target);
        let after = a.distance(b);
        assert!(after <= 5.0 + 1e-12);
        assert!(after >= target.min(5.0) - 1e-12);
    }
}

#[test]
fn repeated_projection_shrinks_to_target() {
    let target = 2.0f64;
    for (free_p, free_q) in [(true, true), (true, false), (false, true)] {
        let mut p = Vec3::new(-1.0, 2.0, 0.5);
        let mut q = Vec3::new(6.0, -3.0, 4.0);
        let mut last = p.distance(q);
        for pass in 0..8 {
            let (a, b) = project(p, free_p, q, free_q, target);
            p = a;
            q = b;
            let d = p.distance(q);
            assert!(d <= last + 1e-12, "pass {} grew {} -> {}", pass, last, d);
            assert!(d >= target - 1e-9, "pass {} overshot to {}", pass, d);
            last = d;
        }
        assert!((last - target).abs() < 1e-9);
    }
}

#[test]
fn compressed_grid_left_alone() {
    let config = ClothConfig::<f64>::new().with_grid(2, 4);
    let mut grid = hanging_grid(&config);
    scale_drop(&mut grid, 0.5);
    let before = grid.positions();

    let solver = ConstraintSolver::new(&config);
    solver.solve(&mut grid, &mut NoOpStepObserver);
    assert_eq!(grid.positions(), before);
}

#[test]
fn stretched_grid_contracts() {
    let config = ClothConfig::<f64>::new().with_grid(2, 4);
    let mut grid = hanging_grid(&config);
    scale_drop(&mut grid, 1.5);

    let solver = ConstraintSolver::new(&config);
    let before = solver.total_stretch(&grid);
    solver.solve(&mut grid, &mut NoOpStepObserver);
    let after = solver.total_stretch(&grid);
    assert!(after < before, "stretch {} -> {}", before, after);

    // Nothing is pulled past its rest length.
    let bottom = grid.position_at(4, 1);
    assert!(bottom.z >= -150.0 - 1e-9);
}

#[test]
fn more_iterations_converge_further() {
    let config = ClothConfig::<f64>::new().with_grid(3, 6);
    let mut stretched = hanging_grid(&config);
    scale_drop(&mut stretched, 2.0);

    let mut coarse = stretched.clone();
    let mut fine = stretched.clone();
    ConstraintSolver::new(&config).with_iterations(1).solve(&mut coarse, &mut NoOpStepObserver);
    ConstraintSolver::new(&config).with_iterations(50).solve(&mut fine, &mut NoOpStepObserver);

    let solver = ConstraintSolver::new(&config);
    let initial = solver.total_stretch(&stretched);
    let one = solver.total_stretch(&coarse);
    let fifty = solver.total_stretch(&fine);
    assert!(one < initial);
    assert!(fifty < one, "1 pass: {}, 50 passes: {}", one, fifty);
}

#[test]
fn anchored_rows_untouched_by_solver() {
    let config = ClothConfig::<f64>::new().with_grid(2, 5).with_fixed_line_count(2);
    let mut grid = hanging_grid(&config);
    scale_drop(&mut grid, 3.0);
    let top = grid.row(0).positions().to_vec();
    let second = grid.row(1).positions().to_vec();

    ConstraintSolver::new(&config).solve(&mut grid, &mut NoOpStepObserver);
    assert_eq!(grid.row(0).positions(), &top[..]);
    assert_eq!(grid.row(1).positions(), &second[..]);
}

#[test]
fn rest_lengths_from_config() {
    let config = ClothConfig::<f64>::new().with_size(60.0, 30.0).with_grid(3, 6);
    let solver = ConstraintSolver::new(&config);
    let l = solver.lengths();
    assert!((l.horizontal - 10.0).abs() < 1e-12);
    assert!((l.vertical - 10.0).abs() < 1e-12);
    assert!((l.diagonal - 200.0f64.sqrt()).abs() < 1e-12);
}
