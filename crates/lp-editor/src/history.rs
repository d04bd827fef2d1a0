//! History bridge: decides when a settled state is reported to the host.
//!
//! A transaction captures the node list when an interaction begins. At the
//! end it is compared against the host's *latest* node list, never a copy
//! taken during the session; equal lists produce no history entry.

use lp_core::model::{Node, Snapshot};

use crate::host::EditorHost;

/// An open transaction: the node list as it was when it began.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    before: Snapshot,
    label: &'static str,
}

impl Transaction {
    pub fn before(&self) -> &Snapshot {
        &self.before
    }

    pub fn label(&self) -> &'static str {
        self.label
    }
}

#[derive(Debug, Default, Clone)]
pub struct HistoryBridge {
    commits: usize,
    skipped: usize,
}

impl HistoryBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self, nodes: &[Node], label: &'static str) -> Transaction {
        Transaction {
            before: Snapshot::new(nodes),
            label,
        }
    }

    /// Close `tx`. Reports the host's current nodes through
    /// `on_history_save` unless they equal the transaction's start.
    pub fn commit<H: EditorHost + ?Sized>(&mut self, host: &mut H, tx: Transaction) -> bool {
        if tx.before.matches(host.nodes()) {
            self.skipped += 1;
            log::debug!("{}: no change, commit skipped", tx.label);
            return false;
        }
        let after = Snapshot::new(host.nodes());
        host.on_history_save(&after);
        self.commits += 1;
        log::debug!("{}: committed ({} nodes)", tx.label, after.len());
        true
    }

    /// Number of transactions that produced a history entry.
    pub fn commits(&self) -> usize {
        self.commits
    }

    /// Number of transactions that ended without a change.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;
    use crate::host::LayoutPage;
    use lp_core::model::NodeKind;

    #[test]
    fn commit_compares_against_latest_nodes() {
        let mut page = LayoutPage::new(&EditorConfig::default());
        page.add_node(NodeKind::Object);
        let mut bridge = HistoryBridge::new();

        let tx = bridge.begin(page.nodes(), "noop");
        assert!(!bridge.commit(&mut page, tx));

        let tx = bridge.begin(page.nodes(), "move");
        let mut moved = page.nodes().to_vec();
        moved[0].x += 10.0;
        page.set_nodes(moved);
        let before = page.history().len();
        assert!(bridge.commit(&mut page, tx));
        assert_eq!(page.history().len(), before + 1);
        assert_eq!((bridge.commits(), bridge.skipped()), (1, 1));
    }
}
