//! Hit testing: scene point → node (or its resize handle).
//!
//! Nodes paint in list order, so the list is walked in reverse to find the
//! topmost hit. A node's resize handle sits in its bottom-right corner and
//! wins over the node body.

use lp_core::id::NodeId;
use lp_core::model::Node;

/// Side length of the square resize handle, in scene units.
pub const HANDLE_SIZE: f32 = 8.0;

/// What a pointer press landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// The body of a node.
    Node(NodeId),
    /// The bottom-right resize handle of a node.
    ResizeHandle(NodeId),
}

impl Hit {
    pub fn id(&self) -> NodeId {
        match self {
            Hit::Node(id) | Hit::ResizeHandle(id) => *id,
        }
    }
}

/// Find the topmost node or handle at scene position (px, py).
/// Returns `None` if nothing is hit (background).
pub fn hit_test(nodes: &[Node], px: f32, py: f32, handle_size: f32) -> Option<Hit> {
    nodes.iter().rev().find_map(|n| {
        let b = n.bounds();
        if !b.contains(px, py) {
            return None;
        }
        let in_handle = px >= n.x + n.w - handle_size && py >= n.y + n.h - handle_size;
        Some(if in_handle {
            Hit::ResizeHandle(n.id)
        } else {
            Hit::Node(n.id)
        })
    })
}
