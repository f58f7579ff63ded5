//! Mesh anchor registry
//!
//! Keyed bookkeeping between anchor identifiers and their scene nodes. The
//! registry owns the scene graph it mutates; all operations preserve the
//! invariant that at most one node exists per anchor identifier.

use std::collections::HashMap;

use thiserror::Error;

use crate::anchor::AnchorId;
use crate::foundation::math::Transform;
use crate::render::MeshEntity;
use crate::scene::{NodeHandle, SceneGraph};

/// Registry-level errors
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The handle map and the scene graph disagree about an anchor
    ///
    /// Never expected at runtime if events are applied through the
    /// dispatcher; signals a programming error, not a recoverable condition.
    #[error("registry inconsistency for anchor {id}: {detail}")]
    Inconsistency {
        /// Anchor whose bookkeeping is inconsistent
        id: AnchorId,
        /// What disagreed
        detail: String,
    },
}

/// Keyed store mapping each live anchor to its scene node
///
/// An anchor's node is created on first upsert, keeps its identity (and the
/// transform association established at creation) across mesh replacements,
/// and is destroyed with all descendants on removal.
#[derive(Debug)]
pub struct MeshAnchorRegistry {
    graph: SceneGraph,
    entries: HashMap<AnchorId, NodeHandle>,
}

impl MeshAnchorRegistry {
    /// Create an empty registry with a fresh scene graph
    pub fn new() -> Self {
        Self {
            graph: SceneGraph::new(),
            entries: HashMap::new(),
        }
    }

    /// Deterministic lookup name for an anchor's node
    pub fn node_name(id: AnchorId) -> String {
        format!("MeshAnchor-{id}")
    }

    /// Create or replace the mesh displayed for an anchor
    ///
    /// On first call for an id: creates a node at `transform`, names it
    /// `MeshAnchor-<id>`, attaches the entity as its sole child, and parents
    /// it under the scene root. On later calls: discards the node's current
    /// mesh child(ren) and attaches the new entity in place; the node's
    /// identity and creation-time transform are preserved and `transform` is
    /// ignored. Never creates two nodes for the same id.
    pub fn upsert(
        &mut self,
        id: AnchorId,
        entity: MeshEntity,
        transform: &Transform,
    ) -> Result<NodeHandle, RegistryError> {
        if let Some(&anchor_node) = self.entries.get(&id) {
            if self.graph.node(anchor_node).is_none() {
                return Err(RegistryError::Inconsistency {
                    id,
                    detail: "entry references a destroyed node".to_string(),
                });
            }
            self.graph.remove_children(anchor_node);
            self.attach_entity_child(anchor_node, entity);
            return Ok(anchor_node);
        }

        let name = Self::node_name(id);
        if self.graph.find_by_name(&name).is_some() {
            return Err(RegistryError::Inconsistency {
                id,
                detail: format!("node named {name} exists without a registry entry"),
            });
        }

        let anchor_node = self.graph.create_node(transform.clone());
        self.graph.set_name(anchor_node, name);
        self.graph.add_child(self.graph.root(), anchor_node);
        self.attach_entity_child(anchor_node, entity);
        self.entries.insert(id, anchor_node);
        Ok(anchor_node)
    }

    /// Remove an anchor's node and all descendants
    ///
    /// Returns `Ok(true)` if an entry existed, `Ok(false)` for an unknown
    /// id. Removing an absent anchor is a no-op so duplicate or late removal
    /// events are tolerated.
    pub fn remove(&mut self, id: AnchorId) -> Result<bool, RegistryError> {
        let Some(anchor_node) = self.entries.remove(&id) else {
            return Ok(false);
        };
        if self.graph.remove_subtree(anchor_node) == 0 {
            return Err(RegistryError::Inconsistency {
                id,
                detail: "entry referenced a node the scene graph no longer holds".to_string(),
            });
        }
        Ok(true)
    }

    /// Whether an anchor currently has a live entry
    pub fn contains(&self, id: AnchorId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Scene node handle for an anchor, if present
    pub fn node_for(&self, id: AnchorId) -> Option<NodeHandle> {
        self.entries.get(&id).copied()
    }

    /// Number of live entries, used for observability only
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    /// Borrow the scene graph this registry maintains
    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    fn attach_entity_child(&mut self, anchor_node: NodeHandle, entity: MeshEntity) {
        let mesh_node = self.graph.create_node(Transform::identity());
        self.graph.set_entity(mesh_node, entity);
        self.graph.add_child(anchor_node, mesh_node);
    }
}

impl Default for MeshAnchorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::render::{Material, MeshDescriptor};

    fn entity_with_triangles(triangles: Vec<[u32; 3]>) -> MeshEntity {
        let vertex_count = triangles
            .iter()
            .flatten()
            .map(|&i| i as usize + 1)
            .max()
            .unwrap_or(0);
        MeshEntity::new(
            MeshDescriptor::new(
                vec![[0.0; 3]; vertex_count],
                vec![[0.0, 1.0, 0.0]; vertex_count],
                triangles,
            ),
            Material::default(),
        )
    }

    fn id(n: u128) -> AnchorId {
        AnchorId::from_u128(n)
    }

    #[test]
    fn test_upsert_creates_named_node() {
        let mut registry = MeshAnchorRegistry::new();
        let anchor = id(1);
        let node = registry
            .upsert(anchor, entity_with_triangles(vec![[0, 1, 2]]), &Transform::identity())
            .unwrap();

        assert_eq!(registry.count(), 1);
        let name = MeshAnchorRegistry::node_name(anchor);
        assert_eq!(registry.graph().find_by_name(&name), Some(node));

        // Entity rides on the sole child, not on the anchor node itself
        let anchor_node = registry.graph().node(node).unwrap();
        assert!(anchor_node.entity.is_none());
        assert_eq!(anchor_node.children.len(), 1);
        let mesh_node = registry.graph().node(anchor_node.children[0]).unwrap();
        assert_eq!(mesh_node.entity.as_ref().unwrap().mesh.triangle_count(), 1);
    }

    #[test]
    fn test_upsert_replaces_mesh_preserving_node() {
        let mut registry = MeshAnchorRegistry::new();
        let anchor = id(2);
        let created_at = Transform::from_position(Vec3::new(0.0, 2.0, 0.0));
        let node = registry
            .upsert(anchor, entity_with_triangles(vec![[0, 1, 2], [2, 3, 0]]), &created_at)
            .unwrap();

        let later = Transform::from_position(Vec3::new(9.0, 9.0, 9.0));
        let node_again = registry
            .upsert(anchor, entity_with_triangles(vec![]), &later)
            .unwrap();

        assert_eq!(node, node_again);
        assert_eq!(registry.count(), 1);
        let anchor_node = registry.graph().node(node).unwrap();
        assert_eq!(anchor_node.transform, created_at);
        assert_eq!(anchor_node.children.len(), 1);
        let mesh_node = registry.graph().node(anchor_node.children[0]).unwrap();
        assert_eq!(mesh_node.entity.as_ref().unwrap().mesh.triangle_count(), 0);
    }

    #[test]
    fn test_remove_destroys_subtree() {
        let mut registry = MeshAnchorRegistry::new();
        let anchor = id(3);
        let node = registry
            .upsert(anchor, entity_with_triangles(vec![[0, 1, 2]]), &Transform::identity())
            .unwrap();

        assert!(registry.remove(anchor).unwrap());
        assert_eq!(registry.count(), 0);
        assert!(registry.graph().node(node).is_none());
        assert_eq!(
            registry
                .graph()
                .find_by_name(&MeshAnchorRegistry::node_name(anchor)),
            None
        );
        // Only the root remains
        assert_eq!(registry.graph().node_count(), 1);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut registry = MeshAnchorRegistry::new();
        registry
            .upsert(id(4), entity_with_triangles(vec![]), &Transform::identity())
            .unwrap();

        assert!(!registry.remove(id(5)).unwrap());
        assert_eq!(registry.count(), 1);
    }

    #[test]
    fn test_duplicate_remove_is_noop() {
        let mut registry = MeshAnchorRegistry::new();
        let anchor = id(6);
        registry
            .upsert(anchor, entity_with_triangles(vec![]), &Transform::identity())
            .unwrap();

        assert!(registry.remove(anchor).unwrap());
        assert!(!registry.remove(anchor).unwrap());
        assert_eq!(registry.count(), 0);
    }

    #[test]
    fn test_distinct_anchors_are_independent() {
        let mut registry = MeshAnchorRegistry::new();
        let x = id(7);
        let y = id(8);
        registry
            .upsert(x, entity_with_triangles(vec![[0, 1, 2]]), &Transform::identity())
            .unwrap();
        registry
            .upsert(y, entity_with_triangles(vec![[0, 1, 2]]), &Transform::identity())
            .unwrap();
        assert_eq!(registry.count(), 2);

        registry.remove(x).unwrap();
        assert_eq!(registry.count(), 1);
        assert!(registry.contains(y));
        assert!(registry
            .graph()
            .find_by_name(&MeshAnchorRegistry::node_name(y))
            .is_some());
    }
}
