//! Mesh representation for reconstructed surfaces
//!
//! The mesh descriptor is the renderer-agnostic intermediate form produced by
//! the geometry converter: flat position/normal buffers plus triangle index
//! triples. A mesh entity pairs a descriptor with its material and is what
//! the scene graph ultimately carries.

use crate::render::Material;

/// Renderer-agnostic triangle mesh
///
/// Positions and normals are index-aligned; each triangle holds three indices
/// into both arrays.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshDescriptor {
    /// Vertex positions
    pub positions: Vec<[f32; 3]>,

    /// Vertex normals, index-aligned with `positions`
    pub normals: Vec<[f32; 3]>,

    /// Triangular faces as index triples
    pub triangles: Vec<[u32; 3]>,
}

impl MeshDescriptor {
    /// Create a mesh descriptor from its buffers
    pub fn new(positions: Vec<[f32; 3]>, normals: Vec<[f32; 3]>, triangles: Vec<[u32; 3]>) -> Self {
        Self {
            positions,
            normals,
            triangles,
        }
    }

    /// Empty mesh with no vertices or faces
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new(), Vec::new())
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangular faces
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }
}

/// Renderable object built from a mesh descriptor and a material
///
/// Owned exclusively by at most one registry slot at a time; replacing an
/// anchor's mesh discards the previous entity.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshEntity {
    /// Mesh geometry
    pub mesh: MeshDescriptor,

    /// Surface material
    pub material: Material,
}

impl MeshEntity {
    /// Create a mesh entity
    pub fn new(mesh: MeshDescriptor, material: Material) -> Self {
        Self { mesh, material }
    }
}
