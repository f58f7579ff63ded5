//! Material system for rendered anchor meshes

use crate::render::Color;

/// Material properties for 3D rendering
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Base color including alpha
    pub base_color: Color,

    /// Metallic factor (0.0 = dielectric, 1.0 = metallic)
    pub metallic: f32,

    /// Roughness factor (0.0 = mirror, 1.0 = completely rough)
    pub roughness: f32,
}

impl Material {
    /// Create a new material with default properties
    pub fn new() -> Self {
        Self {
            base_color: Color::rgb(1.0, 1.0, 1.0),
            metallic: 0.0,
            roughness: 0.5,
        }
    }

    /// Solid, non-metallic material of the given color
    ///
    /// This is what every anchor mesh gets; the color comes from the anchor
    /// identifier so the material is as deterministic as the mesh.
    pub fn solid(color: Color) -> Self {
        Self {
            base_color: color,
            ..Self::new()
        }
    }

    /// Set the base color
    pub fn with_color(mut self, color: Color) -> Self {
        self.base_color = color;
        self
    }

    /// Set the metallic factor
    pub fn with_metallic(mut self, metallic: f32) -> Self {
        self.metallic = metallic.clamp(0.0, 1.0);
        self
    }

    /// Set the roughness factor
    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness.clamp(0.0, 1.0);
        self
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new()
    }
}
