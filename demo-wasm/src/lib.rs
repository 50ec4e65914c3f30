use drape::{ClothConfig, ClothSimulation, CollisionPlane, OwnerTransform, Quat, SideAxis, Vec3};
use wasm_bindgen::prelude::*;

fn owner_at(x: f32, y: f32, z: f32, yaw: f32) -> OwnerTransform<f32> {
    OwnerTransform::new(Vec3::new(x, y, z), Quat::from_axis_angle(Vec3::unit_z(), yaw))
}

// ---- Banner Demo ----

/// World-space banner hanging from a pole the page can drag around.
#[wasm_bindgen]
pub struct BannerDemo {
    cloth: ClothSimulation<f32>,
    owner: OwnerTransform<f32>,
    time_dilation: f32,
}

#[wasm_bindgen]
impl BannerDemo {
    #[wasm_bindgen(constructor)]
    pub fn new(sides: usize, segments: usize) -> Self {
        let owner = owner_at(0.0, 0.0, 300.0, 0.0);
        let config = ClothConfig::new()
            .with_size(240.0, 120.0)
            .with_grid(sides, segments)
            .with_damping(0.02)
            .with_solver_iterations(12);
        BannerDemo {
            cloth: ClothSimulation::new(config, &owner),
            owner,
            time_dilation: 1.0,
        }
    }

    pub fn update(&mut self, dt: f32) -> usize {
        self.cloth.advance(dt, &self.owner, self.time_dilation)
    }

    pub fn move_owner(&mut self, x: f32, y: f32, z: f32, yaw: f32) {
        self.owner = owner_at(x, y, z, yaw);
    }

    pub fn set_wind(&mut self, x: f32, y: f32, z: f32) {
        self.cloth.set_wind(Vec3::new(x, y, z));
    }

    pub fn set_time_dilation(&mut self, dilation: f32) {
        self.time_dilation = dilation;
    }

    /// Returns flat [x0, y0, z0, x1, ...] world positions in row-major order
    pub fn positions(&self) -> Vec<f32> {
        self.cloth.snapshot().to_flat()
    }

    /// Returns [min_x, min_y, min_z, max_x, max_y, max_z]
    pub fn bounds(&self) -> Vec<f32> {
        let b = self.cloth.bounds(&self.owner);
        vec![b.min.x, b.min.y, b.min.z, b.max.x, b.max.y, b.max.z]
    }

    pub fn cols(&self) -> usize {
        self.cloth.grid().point_count()
    }
    pub fn rows(&self) -> usize {
        self.cloth.grid().row_count()
    }
}

// ---- Cape Demo ----

/// Owner-space cape that trails behind a moving character and stays off its back.
#[wasm_bindgen]
pub struct CapeDemo {
    cloth: ClothSimulation<f32>,
    owner: OwnerTransform<f32>,
}

#[wasm_bindgen]
impl CapeDemo {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        let owner = owner_at(0.0, 0.0, 180.0, 0.0);
        let config = ClothConfig::new()
            .with_size(140.0, 60.0)
            .with_grid(6, 14)
            .with_fixed_line_count(2)
            .with_world_space(false)
            .with_side_axis(SideAxis::Y)
            .with_collision_plane(CollisionPlane::YZ);
        CapeDemo {
            cloth: ClothSimulation::new(config, &owner),
            owner,
        }
    }

    pub fn update(&mut self, dt: f32) -> usize {
        self.cloth.advance(dt, &self.owner, 1.0)
    }

    pub fn move_owner(&mut self, x: f32, y: f32, z: f32, yaw: f32) {
        self.owner = owner_at(x, y, z, yaw);
    }

    /// Returns flat [x0, y0, z0, x1, ...] in the owner's frame, ready for skinning
    pub fn local_positions(&self) -> Vec<f32> {
        self.cloth.render_snapshot(&self.owner).to_flat()
    }

    /// Returns flat [x0, y0, z0, x1, ...] world positions
    pub fn positions(&self) -> Vec<f32> {
        self.cloth.render_snapshot(&self.owner).to_world(&self.owner).to_flat()
    }

    pub fn cols(&self) -> usize {
        self.cloth.grid().point_count()
    }
    pub fn rows(&self) -> usize {
        self.cloth.grid().row_count()
    }
}
