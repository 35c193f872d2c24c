//! Scene description types for lumen.
//!
//! These records are what a scene file (or the built-in demo) hands to the
//! renderer: plain data with no behavior beyond validation. The renderer
//! turns them into its own intersectable shapes.

use std::fs;
use std::path::Path;

use lumen_math::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Material;

/// Errors that can occur while loading or validating a scene description.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid shape #{index}: {message}")]
    InvalidShape { index: usize, message: String },

    #[error("Invalid camera: {0}")]
    InvalidCamera(String),
}

pub type SceneResult<T> = Result<T, SceneError>;

/// A geometric primitive record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ShapeDescription {
    Sphere {
        center: Vec3,
        radius: f32,
        color: Vec3,
        #[serde(default)]
        material: Material,
    },
    Triangle {
        vertices: [Vec3; 3],
        color: Vec3,
        #[serde(default)]
        material: Material,
    },
}

impl ShapeDescription {
    /// Create a sphere record.
    pub fn sphere(center: Vec3, radius: f32, color: Vec3, material: Material) -> Self {
        Self::Sphere {
            center,
            radius,
            color,
            material,
        }
    }

    /// Create a triangle record.
    pub fn triangle(a: Vec3, b: Vec3, c: Vec3, color: Vec3, material: Material) -> Self {
        Self::Triangle {
            vertices: [a, b, c],
            color,
            material,
        }
    }

    /// Material of the described shape.
    pub fn material(&self) -> Material {
        match self {
            Self::Sphere { material, .. } | Self::Triangle { material, .. } => *material,
        }
    }

    fn validate(&self, index: usize) -> SceneResult<()> {
        let invalid = |message: &str| SceneError::InvalidShape {
            index,
            message: message.to_string(),
        };

        match self {
            Self::Sphere {
                center, radius, ..
            } => {
                if !center.is_finite() {
                    return Err(invalid("sphere center is not finite"));
                }
                if !(radius.is_finite() && *radius > 0.0) {
                    return Err(invalid("sphere radius must be positive"));
                }
            }
            Self::Triangle { vertices, .. } => {
                if !vertices.iter().all(|v| v.is_finite()) {
                    return Err(invalid("triangle vertex is not finite"));
                }
                let [a, b, c] = *vertices;
                if (b - a).cross(c - a).length_squared() == 0.0 {
                    return Err(invalid("triangle is degenerate"));
                }
            }
        }
        Ok(())
    }
}

/// A point light record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LightDescription {
    pub position: Vec3,
    /// Emitted intensity per channel, not normalized
    pub color: Vec3,
}

impl LightDescription {
    pub fn new(position: Vec3, color: Vec3) -> Self {
        Self { position, color }
    }
}

/// Fixed forward-facing camera parameters.
///
/// The camera always looks down +Z from `eye`; only the field of view and the
/// output resolution shape the projection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraDescription {
    pub eye: Vec3,
    /// Distance from the eye to the view plane along +Z
    pub forward_distance: f32,
    /// Vertical field of view in degrees
    pub fov_y_degrees: f32,
    pub width: u32,
    pub height: u32,
}

impl Default for CameraDescription {
    fn default() -> Self {
        Self {
            eye: Vec3::ZERO,
            forward_distance: 1.0,
            fov_y_degrees: 65.0,
            width: 800,
            height: 600,
        }
    }
}

impl CameraDescription {
    fn validate(&self) -> SceneResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SceneError::InvalidCamera(format!(
                "resolution {}x{} has a zero dimension",
                self.width, self.height
            )));
        }
        if !(self.fov_y_degrees > 0.0 && self.fov_y_degrees < 180.0) {
            return Err(SceneError::InvalidCamera(format!(
                "field of view {} is outside (0, 180)",
                self.fov_y_degrees
            )));
        }
        if !(self.forward_distance.is_finite() && self.forward_distance > 0.0) {
            return Err(SceneError::InvalidCamera(
                "forward distance must be positive".to_string(),
            ));
        }
        if !self.eye.is_finite() {
            return Err(SceneError::InvalidCamera("eye is not finite".to_string()));
        }
        Ok(())
    }
}

/// A complete scene: camera, shapes and lights.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub camera: CameraDescription,
    #[serde(default)]
    pub shapes: Vec<ShapeDescription>,
    #[serde(default)]
    pub lights: Vec<LightDescription>,
}

impl SceneDescription {
    /// Parse and validate a scene from a JSON string.
    pub fn from_json_str(json: &str) -> SceneResult<Self> {
        let scene: SceneDescription = serde_json::from_str(json)?;
        scene.validate()?;
        Ok(scene)
    }

    /// Load and validate a scene from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> SceneResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let scene = Self::from_json_str(&contents)?;
        log::info!(
            "Loaded scene {}: {} shapes, {} lights",
            path.display(),
            scene.shapes.len(),
            scene.lights.len()
        );
        Ok(scene)
    }

    /// Serialize the scene as pretty-printed JSON.
    pub fn to_json_string(&self) -> SceneResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the invariants the renderer relies on.
    pub fn validate(&self) -> SceneResult<()> {
        self.camera.validate()?;
        for (index, shape) in self.shapes.iter().enumerate() {
            shape.validate(index)?;
        }
        if self.lights.is_empty() {
            log::warn!("Scene has no lights, everything will render black");
        }
        Ok(())
    }

    /// Add a shape record.
    pub fn add_shape(&mut self, shape: ShapeDescription) {
        self.shapes.push(shape);
    }

    /// Add a light record.
    pub fn add_light(&mut self, light: LightDescription) {
        self.lights.push(light);
    }
}
