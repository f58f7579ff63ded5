//! Scene management system
//!
//! The scene graph host surface: an arena-backed node hierarchy plus the
//! registry that keeps one named node per live mesh anchor.
//!
//! ## Architecture
//!
//! ```text
//! Anchor Event Dispatcher
//!          ↓
//! Mesh Anchor Registry (bookkeeping)
//!          ↓
//! Scene Graph (arena of nodes, handle-based)
//! ```
//!
//! Nodes are stored in a slot map and referenced by stable handles; child
//! lists are ordered sequences of handles, so parent/child relationships
//! carry no ownership cycles.

mod registry;
mod scene_graph;

pub use registry::{MeshAnchorRegistry, RegistryError};
pub use scene_graph::{NodeHandle, SceneGraph, SceneNode};
