//! Inline text editing of text nodes.
//!
//! While an edit is open, each change of the editor's value rewrites the
//! node's label and re-flows the box (unsnapped, so it follows typing).
//! Confirming grid-aligns the size upwards; cancelling restores the label and size
//! the node had when the edit began.

use lp_core::config::{GridConfig, TextFlowConfig};
use lp_core::id::NodeId;
use lp_core::model::Node;
use lp_core::text_flow::TextFlow;

use crate::history::Transaction;

/// Size a text node's box to its label.
pub fn reflow(node: &mut Node, config: &TextFlowConfig) {
    let flow = TextFlow::new(config, node.font_size(config));
    let text = node.label.as_deref().unwrap_or("");
    let layout = flow.fit(text, node.w, config.min_width, config.min_height);
    node.w = layout.width;
    node.h = layout.height;
}

/// Copy of `nodes` with `f` applied to node `id`, or `None` when there is no
/// such node or `f` left it unchanged.
pub(crate) fn edit_node(nodes: &[Node], id: NodeId, f: impl FnOnce(&mut Node)) -> Option<Vec<Node>> {
    let pos = nodes.iter().position(|n| n.id == id)?;
    let mut out = nodes.to_vec();
    f(&mut out[pos]);
    if out[pos] == nodes[pos] {
        return None;
    }
    Some(out)
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextEdit {
    id: NodeId,
    original_label: Option<String>,
    original_size: (f32, f32),
    tx: Transaction,
}

impl TextEdit {
    pub fn begin(node: &Node, tx: Transaction) -> Self {
        Self {
            id: node.id,
            original_label: node.label.clone(),
            original_size: (node.w, node.h),
            tx,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Label the node had when the edit began.
    pub fn original_label(&self) -> Option<&str> {
        self.original_label.as_deref()
    }

    pub fn into_transaction(self) -> Transaction {
        self.tx
    }

    /// Set the label to `text` and re-flow the box.
    pub fn update(&self, nodes: &[Node], text: &str, config: &TextFlowConfig) -> Option<Vec<Node>> {
        edit_node(nodes, self.id, |n| {
            n.label = Some(text.to_string());
            reflow(n, config);
        })
    }

    /// Restore the label and size from when the edit began.
    pub fn cancel(&self, nodes: &[Node]) -> Option<Vec<Node>> {
        edit_node(nodes, self.id, |n| {
            n.label = self.original_label.clone();
            (n.w, n.h) = self.original_size;
        })
    }

    /// Keep the label and grid-align the size upwards, so the box still
    /// holds its wrapped text and never drops below the text minimum.
    pub fn confirm(&self, nodes: &[Node], grid: &GridConfig, config: &TextFlowConfig) -> Option<Vec<Node>> {
        edit_node(nodes, self.id, |n| {
            (n.w, n.h) = grid.fit_text_size(n.w, n.h, config.min_width, config.min_height);
        })
    }
}
