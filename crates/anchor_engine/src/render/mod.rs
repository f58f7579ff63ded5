//! Renderer-facing resource types
//!
//! This module holds the output vocabulary of the synchronization engine:
//! mesh descriptors, solid-color materials, and the mesh entities the scene
//! graph carries. Everything here is backend-agnostic data; no rendering API
//! leaks through.

mod color;
mod material;
mod mesh;

pub use color::{color_for_anchor, Color};
pub use material::Material;
pub use mesh::{MeshDescriptor, MeshEntity};
