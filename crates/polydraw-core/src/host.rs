//! Scene graph host abstraction.

use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use uuid::Uuid;

/// Identifier of a node in the host scene graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(Uuid);

impl NodeId {
    /// Allocate a fresh node identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

/// Scene graph that displays visual nodes.
pub trait SceneHost {
    /// Attach a node to the displayed scene.
    fn add_child(&mut self, node: NodeId);

    /// Detach a node from the displayed scene.
    fn remove_child(&mut self, node: NodeId);

    /// Free the node's resources. The node must not be used afterwards.
    fn destroy(&mut self, node: NodeId);
}

/// Number of destroyed nodes a [`SceneGraph`] remembers.
pub const DESTROYED_HISTORY: usize = 1024;

/// Headless scene graph tracking attached nodes.
///
/// Destroyed nodes are remembered so a late `add_child` can be rejected, but
/// only the most recent [`DESTROYED_HISTORY`] of them. Capture sessions
/// destroy a marker and a segment per click, so the history would otherwise
/// grow for the lifetime of the canvas.
#[derive(Debug, Default)]
pub struct SceneGraph {
    children: Vec<NodeId>,
    destroyed: HashSet<NodeId>,
    /// Destroy order, oldest first.
    destroyed_order: VecDeque<NodeId>,
}

impl SceneGraph {
    /// Create an empty scene graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attached nodes, back to front.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Check whether a node is attached.
    pub fn contains(&self, node: NodeId) -> bool {
        self.children.contains(&node)
    }

    /// Check whether a node has been destroyed.
    pub fn is_destroyed(&self, node: NodeId) -> bool {
        self.destroyed.contains(&node)
    }

    /// Number of destroyed nodes still remembered.
    pub fn destroyed_len(&self) -> usize {
        self.destroyed.len()
    }
}

impl SceneHost for SceneGraph {
    fn add_child(&mut self, node: NodeId) {
        if self.destroyed.contains(&node) {
            log::warn!("Ignoring add of destroyed node {:?}", node);
            return;
        }
        if !self.children.contains(&node) {
            self.children.push(node);
        }
    }

    fn remove_child(&mut self, node: NodeId) {
        self.children.retain(|&child| child != node);
    }

    fn destroy(&mut self, node: NodeId) {
        self.remove_child(node);
        if !self.destroyed.insert(node) {
            return;
        }
        self.destroyed_order.push_back(node);
        let overflow = self.destroyed_order.len().saturating_sub(DESTROYED_HISTORY);
        for oldest in self.destroyed_order.drain(..overflow) {
            self.destroyed.remove(&oldest);
        }
    }
}
