//! Mesh anchor data model
//!
//! Types describing what the AR subsystem hands us: opaque anchor
//! identifiers, raw reconstructed geometry buffers, and the add/update/remove
//! events that reference them. Nothing in this module touches the scene
//! graph; it is the input vocabulary of the synchronization engine.

use std::fmt;

use crate::foundation::math::Transform;

/// 128-bit unique identifier for a spatial mesh anchor
///
/// Assigned by the AR subsystem and immutable for the anchor's lifetime.
/// The canonical byte representation is stable and is what the color
/// derivation keys off.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnchorId([u8; 16]);

impl AnchorId {
    /// Create an identifier from its canonical 16-byte representation
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Create an identifier from a 128-bit integer (big-endian byte order)
    pub const fn from_u128(value: u128) -> Self {
        Self(value.to_be_bytes())
    }

    /// Canonical byte representation
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

impl fmt::Display for AnchorId {
    /// Formats as lowercase hex in 8-4-4-4-12 grouping
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = &self.0;
        write!(
            f,
            "{:02x}{:02x}{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}-{:02x}{:02x}{:02x}{:02x}{:02x}{:02x}",
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
            b[8], b[9], b[10], b[11], b[12], b[13], b[14], b[15],
        )
    }
}

impl fmt::Debug for AnchorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AnchorId({self})")
    }
}

/// Semantic label attached to reconstructed geometry
///
/// Consumed only for logging in this engine; the renderer-facing output does
/// not vary by classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Classification {
    /// No classification available
    #[default]
    None,
    /// Vertical wall surface
    Wall,
    /// Floor surface
    Floor,
    /// Ceiling surface
    Ceiling,
    /// Table surface
    Table,
    /// Seat surface
    Seat,
    /// Window
    Window,
    /// Door
    Door,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::None => "none",
            Self::Wall => "wall",
            Self::Floor => "floor",
            Self::Ceiling => "ceiling",
            Self::Table => "table",
            Self::Seat => "seat",
            Self::Window => "window",
            Self::Door => "door",
        };
        f.write_str(label)
    }
}

/// Raw triangle index buffer with runtime-specified index width
///
/// The AR subsystem delivers face indices as an opaque byte buffer plus the
/// number of bytes per index (2 or 4 in practice). Indices are little-endian,
/// three consecutive indices per face.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaceBuffer {
    /// Raw index bytes
    pub data: Vec<u8>,
    /// Bytes per face index
    pub bytes_per_index: usize,
    /// Number of triangular faces described by `data`
    pub face_count: usize,
}

impl FaceBuffer {
    /// Create a face buffer from raw parts
    pub fn new(data: Vec<u8>, bytes_per_index: usize, face_count: usize) -> Self {
        Self {
            data,
            bytes_per_index,
            face_count,
        }
    }

    /// Build a 4-byte-wide face buffer from triangle indices
    ///
    /// `indices.len()` must be a multiple of 3; the face count is derived.
    pub fn from_u32_indices(indices: &[u32]) -> Self {
        let data = indices.iter().flat_map(|i| i.to_le_bytes()).collect();
        Self::new(data, 4, indices.len() / 3)
    }

    /// Build a 2-byte-wide face buffer from triangle indices
    pub fn from_u16_indices(indices: &[u16]) -> Self {
        let data = indices.iter().flat_map(|i| i.to_le_bytes()).collect();
        Self::new(data, 2, indices.len() / 3)
    }
}

/// Raw reconstructed surface geometry carried by an anchor
///
/// Positions and normals are index-aligned; faces reference both through the
/// shared index space.
#[derive(Debug, Clone, PartialEq)]
pub struct RawGeometry {
    /// Vertex positions
    pub positions: Vec<[f32; 3]>,
    /// Vertex normals, same length as `positions`
    pub normals: Vec<[f32; 3]>,
    /// Triangle index buffer
    pub faces: FaceBuffer,
}

impl RawGeometry {
    /// Create raw geometry from its buffers
    pub fn new(positions: Vec<[f32; 3]>, normals: Vec<[f32; 3]>, faces: FaceBuffer) -> Self {
        Self {
            positions,
            normals,
            faces,
        }
    }
}

/// One update from the AR subsystem's anchor stream
#[derive(Debug, Clone)]
pub enum AnchorEvent {
    /// A new anchor appeared
    Added {
        /// Anchor identifier
        id: AnchorId,
        /// Semantic label, logging only
        classification: Classification,
        /// Geometry snapshot at the time of the event
        geometry: RawGeometry,
        /// Anchor's current world transform
        transform: Transform,
    },
    /// An existing anchor's geometry or pose changed
    Updated {
        /// Anchor identifier
        id: AnchorId,
        /// Semantic label, logging only
        classification: Classification,
        /// Geometry snapshot at the time of the event
        geometry: RawGeometry,
        /// Anchor's current world transform
        transform: Transform,
    },
    /// An anchor was invalidated and should disappear
    Removed {
        /// Anchor identifier
        id: AnchorId,
        /// Semantic label, logging only
        classification: Classification,
    },
}

impl AnchorEvent {
    /// The anchor this event refers to
    pub fn anchor_id(&self) -> AnchorId {
        match self {
            Self::Added { id, .. } | Self::Updated { id, .. } | Self::Removed { id, .. } => *id,
        }
    }

    /// Event kind as a short label for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Added { .. } => "added",
            Self::Updated { .. } => "updated",
            Self::Removed { .. } => "removed",
        }
    }
}
