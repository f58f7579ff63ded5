//! Anchor replay demo
//!
//! Stands in for the platform AR session: feeds the tracker a scripted,
//! deterministic stream of synthetic anchor events and reports what the
//! scene graph looks like afterwards. Useful for eyeballing the engine's
//! behavior without any AR hardware.

use anchor_engine::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;

/// Replay script parameters, loaded from a RON file
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
struct ReplayConfig {
    /// Number of synthetic anchors to add
    anchor_count: usize,
    /// Updated events sent per anchor after its add
    updates_per_anchor: usize,
    /// Every n-th anchor is removed at the end of the script (0 = none)
    remove_every: usize,
    /// Session channel capacity
    channel_capacity: usize,
    /// RNG seed for jittered geometry
    seed: u64,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            anchor_count: 8,
            updates_per_anchor: 2,
            remove_every: 3,
            channel_capacity: 64,
            seed: 0xa11c,
        }
    }
}

fn parse_config(text: &str) -> ReplayConfig {
    let mut config: ReplayConfig = match ron::from_str(text) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("failed to parse config: {err}; using defaults");
            ReplayConfig::default()
        }
    };
    if config.channel_capacity == 0 {
        // The session channel is bounded and rejects a zero capacity
        log::warn!("channel_capacity must be positive, using 1");
        config.channel_capacity = 1;
    }
    config
}

fn load_config(path: &str) -> ReplayConfig {
    match std::fs::read_to_string(path) {
        Ok(text) => parse_config(&text),
        Err(err) => {
            log::warn!("could not read {path}: {err}; using defaults");
            ReplayConfig::default()
        }
    }
}

/// A jittered unit quad hovering near `center`
fn quad_geometry(center: [f32; 3], rng: &mut StdRng) -> RawGeometry {
    let jitter = |rng: &mut StdRng| rng.gen_range(-0.05..0.05);
    let corner = |dx: f32, dy: f32, rng: &mut StdRng| {
        [
            center[0] + dx + jitter(rng),
            center[1] + dy + jitter(rng),
            center[2] + jitter(rng),
        ]
    };
    let positions = vec![
        corner(-0.5, -0.5, rng),
        corner(0.5, -0.5, rng),
        corner(0.5, 0.5, rng),
        corner(-0.5, 0.5, rng),
    ];
    let normals = vec![[0.0, 0.0, 1.0]; 4];
    RawGeometry::new(positions, normals, FaceBuffer::from_u16_indices(&[0, 1, 2, 2, 3, 0]))
}

fn classification_for(index: usize) -> Classification {
    const CYCLE: [Classification; 5] = [
        Classification::Wall,
        Classification::Floor,
        Classification::Ceiling,
        Classification::Table,
        Classification::Seat,
    ];
    CYCLE[index % CYCLE.len()]
}

/// Build the full event script up front; the producer task just streams it
fn build_script(config: &ReplayConfig) -> Vec<SessionUpdate> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let ids: Vec<AnchorId> = (0..config.anchor_count)
        .map(|_| AnchorId::from_bytes(rng.gen()))
        .collect();

    let mut script = Vec::new();
    for (index, &id) in ids.iter().enumerate() {
        let center = [index as f32 * 1.5, 0.0, -2.0];
        script.push(Ok(AnchorEvent::Added {
            id,
            classification: classification_for(index),
            geometry: quad_geometry(center, &mut rng),
            transform: Transform::from_position(Vec3::new(center[0], center[1], center[2])),
        }));
        for _ in 0..config.updates_per_anchor {
            script.push(Ok(AnchorEvent::Updated {
                id,
                classification: classification_for(index),
                geometry: quad_geometry(center, &mut rng),
                transform: Transform::from_position(Vec3::new(center[0], center[1], center[2])),
            }));
        }
    }
    if config.remove_every > 0 {
        for (index, &id) in ids.iter().enumerate() {
            if index % config.remove_every == 0 {
                script.push(Ok(AnchorEvent::Removed {
                    id,
                    classification: classification_for(index),
                }));
            }
        }
    }
    script
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    anchor_engine::foundation::logging::init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "replay.ron".to_string());
    let config = load_config(&path);
    log::info!("replaying scripted session: {config:?}");

    let runtime = tokio::runtime::Builder::new_current_thread().build()?;
    runtime.block_on(async {
        let (events_tx, mut events_rx) = session_channel(config.channel_capacity);
        let (_shutdown_tx, shutdown_rx) = shutdown_channel();

        let script = build_script(&config);
        let producer = tokio::task::spawn(async move {
            for update in script {
                if events_tx.send(update).await.is_err() {
                    break;
                }
            }
        });

        let mut tracker = WorldMeshTracker::new();
        tracker.run(&mut events_rx, shutdown_rx).await?;
        producer.await?;

        let stats = tracker.stats();
        log::info!(
            "replay finished: {} meshes live ({} added, {} updated, {} removed, {} dropped)",
            tracker.mesh_count(),
            stats.added,
            stats.updated,
            stats.removed,
            stats.dropped,
        );
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_channel_capacity_is_clamped() {
        let config = parse_config("(channel_capacity: 0)");
        assert_eq!(config.channel_capacity, 1);
    }

    #[test]
    fn test_unparseable_config_falls_back_to_defaults() {
        let config = parse_config("not ron at all");
        assert_eq!(config.channel_capacity, ReplayConfig::default().channel_capacity);
        assert_eq!(config.anchor_count, ReplayConfig::default().anchor_count);
    }

    #[test]
    fn test_script_covers_every_anchor() {
        let config = ReplayConfig::default();
        let script = build_script(&config);
        let expected = config.anchor_count * (1 + config.updates_per_anchor)
            + config.anchor_count.div_ceil(config.remove_every);
        assert_eq!(script.len(), expected);
    }
}
