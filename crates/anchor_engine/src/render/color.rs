//! Display colors and per-anchor color derivation

use crate::anchor::AnchorId;

/// RGBA display color with components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red component
    pub r: f32,
    /// Green component
    pub g: f32,
    /// Blue component
    pub b: f32,
    /// Alpha component (1.0 = opaque)
    pub a: f32,
}

impl Color {
    /// Create a fully opaque color from RGB components
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

/// Derive a deterministic display color for an anchor
///
/// Uses the first three bytes of the identifier's canonical byte
/// representation, normalized to the unit range, with fixed alpha 1.0. Pure:
/// the same identifier always maps to the same color, so re-rendered anchors
/// stay visually stable across updates.
pub fn color_for_anchor(id: AnchorId) -> Color {
    let bytes = id.as_bytes();
    Color::rgb(
        f32::from(bytes[0]) / 255.0,
        f32::from(bytes[1]) / 255.0,
        f32::from(bytes[2]) / 255.0,
    )
}
