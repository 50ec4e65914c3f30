//! Benchmarks for drape cloth simulation.

use criterion::{criterion_group, criterion_main, Criterion};
use drape::*;

fn bench_calm_banner(c: &mut Criterion) {
    c.bench_function("banner_4x10_calm_60_ticks", |b| {
        b.iter(|| {
            let owner = OwnerTransform::from_location(Vec3::new(0.0f32, 0.0, 200.0));
            let mut cloth = ClothSimulation::new(ClothConfig::new().with_grid(4, 10), &owner);
            for _ in 0..60 {
                cloth.advance(1.0 / 60.0, &owner, 1.0);
            }
            cloth.snapshot()
        });
    });
}

fn bench_windy_flag(c: &mut Criterion) {
    c.bench_function("flag_16x50_wind_60_ticks", |b| {
        b.iter(|| {
            let owner = OwnerTransform::from_location(Vec3::new(0.0f32, 0.0, 500.0));
            let config = ClothConfig::new()
                .with_size(400.0, 200.0)
                .with_grid(16, 50)
                .with_wind(Vec3::new(0.0, 800.0, 100.0))
                .with_solver_iterations(10);
            let mut cloth = ClothSimulation::new(config, &owner);
            for _ in 0..60 {
                cloth.advance(1.0 / 60.0, &owner, 1.0);
            }
            cloth.snapshot()
        });
    });
}

fn bench_moving_cape(c: &mut Criterion) {
    c.bench_function("cape_6x14_local_collision_60_ticks", |b| {
        b.iter(|| {
            let mut owner = OwnerTransform::from_location(Vec3::new(0.0f32, 0.0, 180.0));
            let config = ClothConfig::new()
                .with_grid(6, 14)
                .with_fixed_line_count(2)
                .with_world_space(false)
                .with_collision_plane(CollisionPlane::YZ);
            let mut cloth = ClothSimulation::new(config, &owner);
            for tick in 0..60 {
                let t = tick as f32 / 60.0;
                owner = OwnerTransform::new(
                    Vec3::new(120.0 * t, 0.0, 180.0),
                    Quat::from_axis_angle(Vec3::unit_z(), t),
                );
                cloth.advance(1.0 / 60.0, &owner, 1.0);
            }
            cloth.render_snapshot(&owner)
        });
    });
}

criterion_group!(benches, bench_calm_banner, bench_windy_flag, bench_moving_cape);
criterion_main!(benches);
