//! Session stream types
//!
//! The AR session collaborator is external; what reaches this engine is an
//! ordered, potentially unbounded sequence of anchor events, with session
//! failures delivered in-band so they can terminate the run loop.

use thiserror::Error;
use tokio::sync::{mpsc, watch};

use crate::anchor::AnchorEvent;

/// Failure of the external AR session
///
/// Fatal to the current run of the consumption loop, not to the process;
/// surfaced to the caller of [`WorldMeshTracker::run`].
///
/// [`WorldMeshTracker::run`]: crate::tracking::WorldMeshTracker::run
#[derive(Error, Debug)]
pub enum SessionError {
    /// The session could not be started
    #[error("AR session failed to start: {0}")]
    StartFailed(String),

    /// The session stopped delivering updates abnormally
    #[error("AR session lost: {0}")]
    Lost(String),
}

/// One element of the session stream: an event, or a session failure
pub type SessionUpdate = Result<AnchorEvent, SessionError>;

/// Create the bounded channel the session feeds anchor updates through
pub fn session_channel(
    capacity: usize,
) -> (mpsc::Sender<SessionUpdate>, mpsc::Receiver<SessionUpdate>) {
    mpsc::channel(capacity)
}

/// Create a shutdown signal pair for cooperative cancellation
///
/// Send `true` through the sender to ask the run loop to stop pulling
/// events; keep the sender alive for as long as shutdown may be requested.
pub fn shutdown_channel() -> (watch::Sender<bool>, watch::Receiver<bool>) {
    watch::channel(false)
}
