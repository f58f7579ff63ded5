//! Anchor event dispatcher
//!
//! Routes each event from the session stream to the registry: `Added`
//! converts and creates, `Updated` converts and replaces, `Removed` tears
//! down. The dispatcher is deliberately forgiving about stream anomalies:
//! a duplicate add becomes an update, an update for an unknown anchor
//! becomes an add, and a removal of an unknown anchor is ignored, so a
//! dropped or repeated event never wedges the mirror of the physical
//! environment.

use thiserror::Error;
use tokio::sync::{mpsc, watch};

use crate::anchor::{AnchorEvent, AnchorId, RawGeometry};
use crate::geometry;
use crate::render::{color_for_anchor, Material, MeshEntity};
use crate::scene::{MeshAnchorRegistry, RegistryError};
use crate::tracking::session::{SessionError, SessionUpdate};

/// Errors that terminate a tracking run
#[derive(Error, Debug)]
pub enum TrackingError {
    /// The external session failed; fatal to this run
    #[error("session error: {0}")]
    Session(#[from] SessionError),

    /// Registry invariant violation; a programming-error signal
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
}

/// Counters for a tracking run, observability only
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackerStats {
    /// Anchors created
    pub added: u64,
    /// Meshes replaced in place
    pub updated: u64,
    /// Anchors torn down
    pub removed: u64,
    /// Events dropped due to malformed geometry
    pub dropped: u64,
}

/// Consumes the anchor stream and mirrors it into a scene graph
///
/// Owns the [`MeshAnchorRegistry`] and therefore the scene graph; the task
/// that drives [`run`](Self::run) is the scene-graph-owning context. Per-id
/// event order is preserved because a single consumer applies one event
/// fully before taking the next.
#[derive(Debug, Default)]
pub struct WorldMeshTracker {
    registry: MeshAnchorRegistry,
    stats: TrackerStats,
}

impl WorldMeshTracker {
    /// Create a tracker with an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the registry for inspection
    pub fn registry(&self) -> &MeshAnchorRegistry {
        &self.registry
    }

    /// Number of anchors currently mirrored
    pub fn mesh_count(&self) -> usize {
        self.registry.count()
    }

    /// Counters accumulated since construction
    pub fn stats(&self) -> TrackerStats {
        self.stats
    }

    /// Drain the session stream until it ends, fails, or shutdown fires
    ///
    /// Suspends only while waiting for the next update. Returns `Ok(())`
    /// when the stream closes or shutdown is requested; an in-band
    /// [`SessionError`] or a registry inconsistency terminates the run with
    /// an error. An event still unprocessed at shutdown is discarded, never
    /// retried; registry state stays consistent because each event is
    /// applied atomically between awaits.
    pub async fn run(
        &mut self,
        events: &mut mpsc::Receiver<SessionUpdate>,
        mut shutdown: watch::Receiver<bool>,
    ) -> Result<(), TrackingError> {
        loop {
            tokio::select! {
                () = wait_for_shutdown(&mut shutdown) => {
                    log::info!("shutdown requested, stopping anchor consumption");
                    return Ok(());
                }
                update = events.recv() => match update {
                    Some(Ok(event)) => self.apply(event)?,
                    Some(Err(err)) => {
                        log::error!("anchor session failed: {err}");
                        return Err(TrackingError::Session(err));
                    }
                    None => {
                        log::info!(
                            "anchor stream ended; {} meshes live, stats {:?}",
                            self.registry.count(),
                            self.stats,
                        );
                        return Ok(());
                    }
                },
            }
        }
    }

    /// Apply a single anchor event to the registry
    ///
    /// Geometry conversion failures are logged and dropped here rather than
    /// surfaced as errors; a malformed anchor must not halt the pipeline.
    /// Registry inconsistencies do surface; they indicate a logic fault.
    pub fn apply(&mut self, event: AnchorEvent) -> Result<(), TrackingError> {
        match event {
            AnchorEvent::Added {
                id,
                classification,
                geometry,
                transform,
            } => {
                let Some(entity) = self.build_entity(id, &geometry, "added") else {
                    return Ok(());
                };
                if self.registry.contains(id) {
                    // Self-healing: duplicate add from the subsystem is a
                    // recoverable anomaly, handled as a corrective update.
                    log::warn!("duplicate added event for anchor {id}, treating as update");
                    self.registry.upsert(id, entity, &transform)?;
                    self.stats.updated += 1;
                } else {
                    self.registry.upsert(id, entity, &transform)?;
                    self.stats.added += 1;
                    log::info!(
                        "added anchor {id} (classification: {classification}); {} meshes live",
                        self.registry.count(),
                    );
                }
            }
            AnchorEvent::Updated {
                id,
                classification,
                geometry,
                transform,
            } => {
                let Some(entity) = self.build_entity(id, &geometry, "updated") else {
                    return Ok(());
                };
                if self.registry.contains(id) {
                    self.registry.upsert(id, entity, &transform)?;
                    self.stats.updated += 1;
                    log::debug!("updated anchor {id} (classification: {classification})");
                } else {
                    // Self-healing against a dropped added event
                    log::warn!("updated event for unknown anchor {id}, creating entry");
                    self.registry.upsert(id, entity, &transform)?;
                    self.stats.added += 1;
                }
            }
            AnchorEvent::Removed { id, classification } => {
                if self.registry.remove(id)? {
                    self.stats.removed += 1;
                    log::info!(
                        "removed anchor {id} (classification: {classification}); {} meshes live",
                        self.registry.count(),
                    );
                } else {
                    log::debug!("removed event for unknown anchor {id}, ignoring");
                }
            }
        }
        Ok(())
    }

    fn build_entity(
        &mut self,
        id: AnchorId,
        geometry: &RawGeometry,
        kind: &str,
    ) -> Option<MeshEntity> {
        match geometry::convert(geometry) {
            Ok(mesh) => Some(MeshEntity::new(
                mesh,
                Material::solid(color_for_anchor(id)),
            )),
            Err(err) => {
                log::error!("dropping {kind} event for anchor {id}: {err}");
                self.stats.dropped += 1;
                None
            }
        }
    }
}

/// Resolve when shutdown is requested; never resolve once it cannot be
async fn wait_for_shutdown(shutdown: &mut watch::Receiver<bool>) {
    if shutdown.wait_for(|stop| *stop).await.is_err() {
        // Sender dropped without signalling: shutdown can no longer arrive
        std::future::pending::<()>().await;
    }
}
