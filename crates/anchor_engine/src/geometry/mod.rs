//! Geometry conversion
//!
//! Turns a [`RawGeometry`] buffer as delivered by the AR subsystem into a
//! renderer-agnostic [`MeshDescriptor`]. Positions and normals pass through
//! unchanged; the face index buffer is decoded honoring its declared index
//! width rather than assuming a fixed one.
//!
//! Conversion is deterministic: identical input always yields a bit-identical
//! descriptor, so re-running an event replays to the same mesh.

use thiserror::Error;

use crate::anchor::RawGeometry;
use crate::render::MeshDescriptor;

/// Errors produced by geometry conversion
///
/// All variants are recoverable at the pipeline level: the dispatcher logs
/// the failure and drops the offending event.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GeometryConversionError {
    /// Index width other than 2 or 4 bytes
    #[error("unsupported face index width: {0} bytes")]
    UnsupportedIndexWidth(usize),

    /// Index buffer does not hold `face_count * 3` indices
    #[error("face index buffer too short: need {required} bytes, have {actual}")]
    IndexBufferTooShort {
        /// Bytes required by the declared face count and index width
        required: usize,
        /// Bytes actually present
        actual: usize,
    },

    /// Declared face count is larger than any index buffer could hold
    #[error("face count {0} overflows the required index buffer size")]
    FaceCountTooLarge(usize),

    /// A decoded face index does not address any vertex
    #[error("face index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        /// The offending decoded index
        index: u32,
        /// Number of vertices in the position buffer
        vertex_count: usize,
    },

    /// Normal buffer is not index-aligned with the position buffer
    #[error("normal count {normals} does not match vertex count {positions}")]
    NormalCountMismatch {
        /// Number of normals present
        normals: usize,
        /// Number of positions present
        positions: usize,
    },
}

/// Convert raw anchor geometry into a renderable mesh descriptor
///
/// Faces are assumed triangular; for each of the declared `face_count` faces
/// three consecutive little-endian indices are read at the declared width.
/// A face count of zero is valid and produces an empty triangle list.
pub fn convert(raw: &RawGeometry) -> Result<MeshDescriptor, GeometryConversionError> {
    if raw.normals.len() != raw.positions.len() {
        return Err(GeometryConversionError::NormalCountMismatch {
            normals: raw.normals.len(),
            positions: raw.positions.len(),
        });
    }

    let width = raw.faces.bytes_per_index;
    if width != 2 && width != 4 {
        return Err(GeometryConversionError::UnsupportedIndexWidth(width));
    }

    // face_count is untrusted session metadata; the requirement itself can
    // overflow before the buffer length ever gets compared
    let required = raw
        .faces
        .face_count
        .checked_mul(3)
        .and_then(|indices| indices.checked_mul(width))
        .ok_or(GeometryConversionError::FaceCountTooLarge(
            raw.faces.face_count,
        ))?;
    if raw.faces.data.len() < required {
        return Err(GeometryConversionError::IndexBufferTooShort {
            required,
            actual: raw.faces.data.len(),
        });
    }

    let vertex_count = raw.positions.len();
    let data = &raw.faces.data;
    let mut triangles = Vec::with_capacity(raw.faces.face_count);

    for face in 0..raw.faces.face_count {
        let mut triangle = [0u32; 3];
        for (corner, slot) in triangle.iter_mut().enumerate() {
            let offset = (face * 3 + corner) * width;
            let index = match width {
                2 => u32::from(u16::from_le_bytes([data[offset], data[offset + 1]])),
                _ => u32::from_le_bytes([
                    data[offset],
                    data[offset + 1],
                    data[offset + 2],
                    data[offset + 3],
                ]),
            };
            if index as usize >= vertex_count {
                return Err(GeometryConversionError::IndexOutOfRange {
                    index,
                    vertex_count,
                });
            }
            *slot = index;
        }
        triangles.push(triangle);
    }

    Ok(MeshDescriptor {
        positions: raw.positions.clone(),
        normals: raw.normals.clone(),
        triangles,
    })
}
