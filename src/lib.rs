//! Verlet cloth sheets for games.
//!
//! `drape` simulates a rectangular sheet as rows of points hanging from an
//! owner frame. Designed for banners, flags, capes and curtains that follow
//! a moving object.
//!
//! # Features
//!
//! - **Verlet integration**: Position-based dynamics with implicit velocity
//! - **Shrink-only constraints**: Structural and shear relaxation that never pushes points apart
//! - **Wind**: Flat-plate aerodynamic forcing from each face normal
//! - **Anchored rows**: Leading rows follow the owner frame every substep
//! - **Plane collision**: Optional clipping against an owner-relative plane
//! - **Fixed substeps**: Deterministic stepping independent of frame rate
//! - **Observable**: Monitor each phase via the `StepObserver` trait
//! - **`no_std` compatible**: Works in embedded and WASM environments
//!
//! # Example
//! ```
//! use drape::{ClothConfig, ClothSimulation, OwnerTransform, Vec3};
//!
//! let owner = OwnerTransform::from_location(Vec3::new(0.0f32, 0.0, 200.0));
//! let config = ClothConfig::new()
//!     .with_grid(4, 12)
//!     .with_wind(Vec3::new(0.0, 400.0, 0.0));
//! let mut cloth = ClothSimulation::new(config, &owner);
//!
//! let substeps = cloth.advance(1.0 / 30.0, &owner, 1.0);
//! assert_eq!(substeps, 2);
//!
//! let snapshot = cloth.snapshot();
//! assert_eq!(snapshot.rows(), 13);
//! assert_eq!(snapshot.cols(), 5);
//! ```

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod transform;
pub mod config;
pub mod error;
pub mod row;
pub mod grid;
pub mod forces;
pub mod integrator;
pub mod constraint;
pub mod solver;
pub mod collision;
pub mod snapshot;
pub mod observer;
pub mod simulation;

// Re-export primary API
pub use float::Float;
pub use vec::Vec3;
pub use transform::{OwnerTransform, Quat};
pub use config::{ClothConfig, CollisionPlane, SideAxis};
pub use error::ClothError;
pub use row::{ClothRow, RowAcceleration};
pub use grid::ClothGrid;
pub use constraint::{project, ConstraintLengths};
pub use solver::ConstraintSolver;
pub use collision::Plane;
pub use snapshot::{Aabb, GridSnapshot};
pub use observer::{NoOpStepObserver, StepObserver};
pub use simulation::ClothSimulation;
