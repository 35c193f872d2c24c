//! Surface material classes.

use serde::{Deserialize, Serialize};

/// How a surface interacts with light.
///
/// The material is fixed per shape at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Material {
    /// Direct lighting only
    #[default]
    Diffuse,
    /// Perfect mirror, traced recursively
    Reflective,
    /// Transparent, reflection and transmission blended by a Fresnel weight
    Refractive,
}

impl Material {
    /// True for materials that spawn secondary rays.
    pub fn is_specular(self) -> bool {
        !matches!(self, Material::Diffuse)
    }
}
