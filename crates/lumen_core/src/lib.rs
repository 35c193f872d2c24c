//! Lumen Core - Scene description types for the lumen ray tracer.
//!
//! This crate provides:
//!
//! - **Scene description records**: `SceneDescription`, `ShapeDescription`,
//!   `LightDescription`, `CameraDescription`, `Material`
//! - **JSON loading** with validation
//! - **The demo scene**: glass sphere, mirror quad and a wall of spheres
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::SceneDescription;
//!
//! let scene = SceneDescription::load("scene.json")?;
//! println!("Loaded {} shapes, {} lights", scene.shapes.len(), scene.lights.len());
//! ```

mod demo;
pub mod material;
pub mod scene;

// Re-export commonly used types
pub use material::Material;
pub use scene::{
    CameraDescription, LightDescription, SceneDescription, SceneError, SceneResult,
    ShapeDescription,
};
