//! Arena-backed scene graph
//!
//! A hierarchy of renderable nodes stored in a slot map. Handles stay stable
//! across unrelated insertions and removals; a handle to a destroyed node
//! simply stops resolving, it never aliases a new node.

use crate::foundation::collections::{Handle, HandleMap};
use crate::foundation::math::Transform;
use crate::render::MeshEntity;

/// Stable handle to a scene graph node
pub type NodeHandle = Handle;

/// One node in the scene graph
#[derive(Debug)]
pub struct SceneNode {
    /// Optional lookup name, unique by convention not enforcement
    pub name: Option<String>,
    /// Local transform of this node
    pub transform: Transform,
    /// Parent handle, `None` for the root and detached nodes
    pub parent: Option<NodeHandle>,
    /// Ordered child handles
    pub children: Vec<NodeHandle>,
    /// Renderable payload, if any
    pub entity: Option<MeshEntity>,
}

/// Arena of scene nodes with a single root
///
/// Supports the host operations the synchronization engine needs: create a
/// node, attach a child, remove a subtree, and find a node by name.
#[derive(Debug)]
pub struct SceneGraph {
    nodes: HandleMap<SceneNode>,
    root: NodeHandle,
}

impl SceneGraph {
    /// Create a scene graph containing only an unnamed root at identity
    pub fn new() -> Self {
        let mut nodes = HandleMap::with_key();
        let root = nodes.insert(SceneNode {
            name: None,
            transform: Transform::identity(),
            parent: None,
            children: Vec::new(),
            entity: None,
        });
        Self { nodes, root }
    }

    /// Handle of the root node
    pub fn root(&self) -> NodeHandle {
        self.root
    }

    /// Create a detached node at the given transform
    pub fn create_node(&mut self, transform: Transform) -> NodeHandle {
        self.nodes.insert(SceneNode {
            name: None,
            transform,
            parent: None,
            children: Vec::new(),
            entity: None,
        })
    }

    /// Assign a lookup name to a node
    ///
    /// Returns false if the handle no longer resolves.
    pub fn set_name(&mut self, handle: NodeHandle, name: impl Into<String>) -> bool {
        match self.nodes.get_mut(handle) {
            Some(node) => {
                node.name = Some(name.into());
                true
            }
            None => false,
        }
    }

    /// Attach a renderable entity to a node
    ///
    /// Replaces any entity the node already carried. Returns false if the
    /// handle no longer resolves.
    pub fn set_entity(&mut self, handle: NodeHandle, entity: MeshEntity) -> bool {
        match self.nodes.get_mut(handle) {
            Some(node) => {
                node.entity = Some(entity);
                true
            }
            None => false,
        }
    }

    /// Attach `child` under `parent`
    ///
    /// Detaches the child from its previous parent first, so a node is never
    /// listed under two parents. Returns false if either handle is stale.
    pub fn add_child(&mut self, parent: NodeHandle, child: NodeHandle) -> bool {
        if !self.nodes.contains_key(parent) || !self.nodes.contains_key(child) {
            return false;
        }
        self.detach(child);
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
        true
    }

    /// Remove a node and all of its descendants
    ///
    /// The subtree is detached from its parent and every node in it is
    /// destroyed. Returns the number of nodes removed; zero for a stale
    /// handle or the root (the root is never removed).
    pub fn remove_subtree(&mut self, handle: NodeHandle) -> usize {
        if handle == self.root || !self.nodes.contains_key(handle) {
            return 0;
        }
        self.detach(handle);

        let mut removed = 0;
        let mut pending = vec![handle];
        while let Some(current) = pending.pop() {
            if let Some(node) = self.nodes.remove(current) {
                pending.extend(node.children);
                removed += 1;
            }
        }
        removed
    }

    /// Detach and destroy every child subtree of a node
    ///
    /// The node itself survives with its name and transform intact. Returns
    /// the number of nodes removed.
    pub fn remove_children(&mut self, handle: NodeHandle) -> usize {
        let children = match self.nodes.get(handle) {
            Some(node) => node.children.clone(),
            None => return 0,
        };
        children
            .into_iter()
            .map(|child| self.remove_subtree(child))
            .sum()
    }

    /// Find a node by its lookup name
    pub fn find_by_name(&self, name: &str) -> Option<NodeHandle> {
        self.nodes
            .iter()
            .find(|(_, node)| node.name.as_deref() == Some(name))
            .map(|(handle, _)| handle)
    }

    /// Borrow a node, if the handle still resolves
    pub fn node(&self, handle: NodeHandle) -> Option<&SceneNode> {
        self.nodes.get(handle)
    }

    /// Total number of nodes, including the root
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn detach(&mut self, child: NodeHandle) {
        if let Some(parent) = self.nodes[child].parent.take() {
            if let Some(parent_node) = self.nodes.get_mut(parent) {
                parent_node.children.retain(|c| *c != child);
            }
        }
    }
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::render::{Material, MeshDescriptor, MeshEntity};

    fn empty_entity() -> MeshEntity {
        MeshEntity::new(MeshDescriptor::empty(), Material::default())
    }

    #[test]
    fn test_create_and_attach_node() {
        let mut graph = SceneGraph::new();
        let node = graph.create_node(Transform::from_position(Vec3::new(1.0, 0.0, 0.0)));
        assert!(graph.add_child(graph.root(), node));

        let root = graph.node(graph.root()).unwrap();
        assert_eq!(root.children, vec![node]);
        assert_eq!(graph.node(node).unwrap().parent, Some(graph.root()));
    }

    #[test]
    fn test_find_by_name() {
        let mut graph = SceneGraph::new();
        let node = graph.create_node(Transform::identity());
        graph.set_name(node, "MeshAnchor-test");

        assert_eq!(graph.find_by_name("MeshAnchor-test"), Some(node));
        assert_eq!(graph.find_by_name("missing"), None);
    }

    #[test]
    fn test_remove_subtree_destroys_descendants() {
        let mut graph = SceneGraph::new();
        let parent = graph.create_node(Transform::identity());
        let child = graph.create_node(Transform::identity());
        graph.add_child(graph.root(), parent);
        graph.add_child(parent, child);
        assert_eq!(graph.node_count(), 3);

        assert_eq!(graph.remove_subtree(parent), 2);
        assert_eq!(graph.node_count(), 1);
        assert!(graph.node(parent).is_none());
        assert!(graph.node(child).is_none());
        assert!(graph.node(graph.root()).unwrap().children.is_empty());
    }

    #[test]
    fn test_remove_subtree_with_stale_handle_is_noop() {
        let mut graph = SceneGraph::new();
        let node = graph.create_node(Transform::identity());
        graph.add_child(graph.root(), node);
        graph.remove_subtree(node);

        assert_eq!(graph.remove_subtree(node), 0);
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn test_remove_children_preserves_node_identity() {
        let mut graph = SceneGraph::new();
        let anchor = graph.create_node(Transform::identity());
        graph.set_name(anchor, "anchor");
        graph.add_child(graph.root(), anchor);

        let mesh_a = graph.create_node(Transform::identity());
        graph.set_entity(mesh_a, empty_entity());
        graph.add_child(anchor, mesh_a);

        assert_eq!(graph.remove_children(anchor), 1);
        assert!(graph.node(mesh_a).is_none());
        assert_eq!(graph.find_by_name("anchor"), Some(anchor));
        assert!(graph.node(anchor).unwrap().children.is_empty());
    }

    #[test]
    fn test_root_cannot_be_removed() {
        let mut graph = SceneGraph::new();
        assert_eq!(graph.remove_subtree(graph.root()), 0);
        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn test_reparenting_removes_from_old_parent() {
        let mut graph = SceneGraph::new();
        let a = graph.create_node(Transform::identity());
        let b = graph.create_node(Transform::identity());
        let child = graph.create_node(Transform::identity());
        graph.add_child(graph.root(), a);
        graph.add_child(graph.root(), b);

        graph.add_child(a, child);
        graph.add_child(b, child);

        assert!(graph.node(a).unwrap().children.is_empty());
        assert_eq!(graph.node(b).unwrap().children, vec![child]);
    }
}
