//! The editor's host contract, and `LayoutPage`, a reference host.
//!
//! The host owns the node list, the relations, the selection and the undo
//! history. The editor reads them through `EditorHost` and reports every
//! change back through its callbacks; it never keeps its own copy of the
//! scene between events.

use lp_core::config::NodeDefaults;
use lp_core::id::NodeId;
use lp_core::model::{Node, NodeKind, Relation, RelationKind, Selection, Snapshot, find_node};

use crate::commands::CommandStack;
use crate::config::EditorConfig;
use crate::input::InputEvent;

/// Scene-parser activity shown as an overlay on the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Busy {
    pub is_parsing: bool,
    /// Seconds since parsing started.
    pub parsing_time: f32,
}

pub trait EditorHost {
    fn nodes(&self) -> &[Node];
    fn relations(&self) -> &[Relation];
    fn selection(&self) -> Selection;

    /// The most recently added node, drawn with a short pulse.
    fn just_added(&self) -> Option<NodeId> {
        None
    }

    fn can_undo(&self) -> bool;
    fn can_redo(&self) -> bool;

    fn busy(&self) -> Busy {
        Busy::default()
    }

    /// Replace the whole node list.
    fn set_nodes(&mut self, nodes: Vec<Node>);

    /// A node was pressed. `event` is forwarded unchanged so the host can
    /// apply its own multi-select policy.
    fn on_select(&mut self, id: NodeId, event: &InputEvent);
    fn on_deselect(&mut self);
    fn on_delete(&mut self, id: NodeId);

    /// One delete gesture over several nodes. Hosts that keep history
    /// should record it as a single entry.
    fn on_delete_many(&mut self, ids: &[NodeId]) {
        for id in ids {
            self.on_delete(*id);
        }
    }
    fn on_copy(&mut self, id: NodeId);
    fn on_paste(&mut self);
    fn on_undo(&mut self);
    fn on_redo(&mut self);

    /// A settled state to record in the undo history.
    fn on_history_save(&mut self, snapshot: &Snapshot);
}

// ─── Reference host ──────────────────────────────────────────────────────

/// Page-level scene state: nodes, relations, selection, clipboard, history.
#[derive(Debug, Clone)]
pub struct LayoutPage {
    nodes: Vec<Node>,
    relations: Vec<Relation>,
    selection: Selection,
    just_added: Option<NodeId>,
    clipboard: Option<Node>,
    history: CommandStack,
    defaults: NodeDefaults,
    paste_offset: f32,
    pub busy: Busy,
}

impl LayoutPage {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            nodes: Vec::new(),
            relations: Vec::new(),
            selection: Selection::none(),
            just_added: None,
            clipboard: None,
            history: CommandStack::new(Snapshot::default(), config.history_depth),
            defaults: config.defaults.clone(),
            paste_offset: config.paste_offset,
            busy: Busy::default(),
        }
    }

    pub fn history(&self) -> &CommandStack {
        &self.history
    }

    fn save_history(&mut self) {
        self.history.save(Snapshot::new(&self.nodes));
    }

    /// Add a node of `kind` with the default geometry for that kind.
    pub fn add_node(&mut self, kind: NodeKind) -> NodeId {
        let node = Node::from_defaults(NodeId::fresh(), kind, &self.defaults);
        let id = node.id;
        self.nodes.push(node);
        self.just_added = Some(id);
        self.save_history();
        log::debug!("added {} node {id}", kind.name());
        id
    }

    /// Remove a node. Relations that reference it are kept.
    pub fn delete_node(&mut self, id: NodeId) -> bool {
        self.delete_nodes(&[id]) == 1
    }

    /// Remove every node in `ids` as one history step. Returns how many
    /// were found.
    pub fn delete_nodes(&mut self, ids: &[NodeId]) -> usize {
        let before = self.nodes.len();
        self.nodes.retain(|n| !ids.contains(&n.id));
        let removed = before - self.nodes.len();
        if removed == 0 {
            log::warn!("delete: none of {} nodes found", ids.len());
            return 0;
        }
        if self.selection.id.is_some_and(|s| ids.contains(&s)) {
            self.selection.id = None;
        }
        self.selection.ids.retain(|s| !ids.contains(s));
        if self.just_added.is_some_and(|j| ids.contains(&j)) {
            self.just_added = None;
        }
        self.save_history();
        log::debug!("deleted {removed} nodes");
        removed
    }

    pub fn copy(&mut self, id: NodeId) -> bool {
        match find_node(&self.nodes, id) {
            Some(n) => {
                self.clipboard = Some(n.clone());
                true
            }
            None => false,
        }
    }

    /// Duplicate the clipboard node with a fresh id, offset from the source.
    /// Repeated pastes cascade.
    pub fn paste(&mut self) -> Option<NodeId> {
        let source = self.clipboard.as_ref()?;
        let mut node = source.clone();
        node.id = NodeId::fresh();
        node.x += self.paste_offset;
        node.y += self.paste_offset;
        let id = node.id;
        self.clipboard = Some(node.clone());
        self.nodes.push(node);
        self.selection = Selection::single(id);
        self.just_added = Some(id);
        self.save_history();
        Some(id)
    }

    /// Install the output of the scene parser. History restarts here.
    pub fn load_parsed(&mut self, nodes: Vec<Node>, relations: Vec<Relation>) {
        self.nodes = nodes;
        self.relations = relations;
        self.selection = Selection::none();
        self.just_added = None;
        self.history.reset(Snapshot::new(&self.nodes));
        log::debug!("loaded {} nodes, {} relations", self.nodes.len(), self.relations.len());
    }

    /// Remove every node and relation.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.relations.clear();
        self.selection = Selection::none();
        self.just_added = None;
        self.save_history();
    }

    /// Annotate `from` → `to`. Defaults to `inside`.
    pub fn add_relation(&mut self, from: NodeId, to: NodeId, kind: Option<RelationKind>) -> Option<NodeId> {
        if from == to {
            return None;
        }
        let relation = Relation::new(from, to, kind.unwrap_or(RelationKind::Inside));
        let id = relation.id;
        self.relations.push(relation);
        Some(id)
    }

    pub fn remove_relation(&mut self, id: NodeId) -> bool {
        let before = self.relations.len();
        self.relations.retain(|r| r.id != id);
        self.relations.len() != before
    }

    pub fn select(&mut self, id: NodeId, additive: bool) {
        if !additive {
            self.selection = Selection::single(id);
            return;
        }
        let mut ids = self.selection.resolved();
        match ids.iter().position(|s| *s == id) {
            Some(pos) => {
                ids.remove(pos);
            }
            None => ids.push(id),
        }
        self.selection = Selection {
            id: ids.first().copied(),
            ids,
        };
    }

    pub fn clear_just_added(&mut self) {
        self.just_added = None;
    }

    fn install(&mut self, snapshot: Snapshot) {
        self.nodes = snapshot.to_vec();
        self.just_added = None;
    }

    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.install(snapshot);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.install(snapshot);
                true
            }
            None => false,
        }
    }
}

impl EditorHost for LayoutPage {
    fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    fn relations(&self) -> &[Relation] {
        &self.relations
    }

    fn selection(&self) -> Selection {
        self.selection.clone()
    }

    fn just_added(&self) -> Option<NodeId> {
        self.just_added
    }

    fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn busy(&self) -> Busy {
        self.busy
    }

    fn set_nodes(&mut self, nodes: Vec<Node>) {
        self.nodes = nodes;
    }

    fn on_select(&mut self, id: NodeId, event: &InputEvent) {
        self.select(id, event.modifiers().additive());
    }

    fn on_deselect(&mut self) {
        self.selection = Selection::none();
    }

    fn on_delete(&mut self, id: NodeId) {
        self.delete_node(id);
    }

    fn on_delete_many(&mut self, ids: &[NodeId]) {
        self.delete_nodes(ids);
    }

    fn on_copy(&mut self, id: NodeId) {
        self.copy(id);
    }

    fn on_paste(&mut self) {
        self.paste();
    }

    fn on_undo(&mut self) {
        self.undo();
    }

    fn on_redo(&mut self) {
        self.redo();
    }

    fn on_history_save(&mut self, snapshot: &Snapshot) {
        self.history.save(snapshot.clone());
    }
}
