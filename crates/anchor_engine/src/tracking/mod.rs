//! World mesh tracking
//!
//! The consumer side of the AR session's anchor stream: session channel
//! types, and the dispatcher that applies each add/update/remove event to
//! the mesh anchor registry.
//!
//! ## Architecture
//!
//! ```text
//! AR Session (producer task)
//!      ↓ mpsc<SessionUpdate>
//! WorldMeshTracker::run (single consumer, owns the scene graph)
//!      ↓
//! MeshAnchorRegistry → SceneGraph
//! ```
//!
//! All registry mutation happens on the task driving [`WorldMeshTracker`];
//! exclusive access is enforced by `&mut self`, not by locks.

mod dispatcher;
mod session;

pub use dispatcher::{TrackerStats, TrackingError, WorldMeshTracker};
pub use session::{session_channel, shutdown_channel, SessionError, SessionUpdate};
