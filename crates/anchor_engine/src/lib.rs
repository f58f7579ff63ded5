//! # Anchor Engine
//!
//! An incremental mesh-anchor synchronization engine: consumes a live stream
//! of scene-reconstruction updates from a platform AR subsystem and keeps a
//! scene graph of mesh entities mirroring the physical environment.
//!
//! ## Features
//!
//! - **Anchor stream consumption**: single-consumer async loop with
//!   cooperative cancellation
//! - **Geometry conversion**: raw anchor buffers (variable index width) to
//!   renderer-agnostic mesh descriptors
//! - **Named registry**: one stable scene node per anchor, replaced in place
//!   on updates, destroyed on removal
//! - **Deterministic coloring**: stable per-anchor display colors
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use anchor_engine::prelude::*;
//!
//! # async fn demo() -> Result<(), TrackingError> {
//! let (events_tx, mut events_rx) = session_channel(64);
//! let (shutdown_tx, shutdown_rx) = shutdown_channel();
//!
//! // Hand events_tx to the AR session collaborator, shutdown_tx to the
//! // session teardown path; then drain the stream.
//! let mut tracker = WorldMeshTracker::new();
//! tracker.run(&mut events_rx, shutdown_rx).await?;
//! log::info!("final mesh count: {}", tracker.mesh_count());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod anchor;
pub mod foundation;
pub mod geometry;
pub mod render;
pub mod scene;
pub mod tracking;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        anchor::{AnchorEvent, AnchorId, Classification, FaceBuffer, RawGeometry},
        foundation::math::{Mat4, Quat, Transform, Vec3},
        geometry::GeometryConversionError,
        render::{color_for_anchor, Color, Material, MeshDescriptor, MeshEntity},
        scene::{MeshAnchorRegistry, NodeHandle, RegistryError, SceneGraph},
        tracking::{
            session_channel, shutdown_channel, SessionError, SessionUpdate, TrackerStats,
            TrackingError, WorldMeshTracker,
        },
    };
}
