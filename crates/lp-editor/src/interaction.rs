//! Canvas interaction state machine.
//!
//! `CanvasEditor` turns `InputEvent`s into node-list updates on an
//! `EditorHost`. At most one session is active at a time:
//!
//! | Session | Entered by | Ends on |
//! |---------|-----------|---------|
//! | `PendingTextClick` | press on an already-selected text node | move past the click threshold (→ `Dragging`) or release (→ `EditingText`) |
//! | `Dragging` | press on a node body | release: snap, commit |
//! | `Resizing` | press on a resize handle | release: commit |
//! | `Panning` | press on the background | release or pointer leave |
//! | `EditingText` | release of a pending text click | Escape (cancel), Ctrl/Cmd+Enter, blur, or a press elsewhere (confirm) |
//!
//! Every transition goes through `enter_session` / `exit_session`, so the
//! old session is torn down before the next is installed.

use futures::FutureExt;
use futures::future::BoxFuture;
use kurbo::Rect;
use lp_core::id::NodeId;
use lp_core::model::{Color, Node, find_node};
use lp_render::export::{ExportError, RasterImage, SceneSnapshot, export_scene};
use lp_render::hit::{Hit, hit_test};
use lp_render::svg::{SceneView, SvgOptions, render_svg};

use crate::config::EditorConfig;
use crate::history::{HistoryBridge, Transaction};
use crate::host::EditorHost;
use crate::input::{InputEvent, Modifiers};
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use crate::text_edit::{TextEdit, edit_node, reflow};
use crate::viewport::ViewportController;

/// Canvas size assumed for the live view until a surface is attached.
const DEFAULT_SURFACE: (u32, u32) = (800, 600);

/// The active session.
#[derive(Debug, Clone, PartialEq)]
pub enum Interaction {
    Idle,
    PendingTextClick {
        id: NodeId,
        /// Press position, screen units.
        origin: (f32, f32),
        start_pos: (f32, f32),
        tx: Transaction,
    },
    Dragging {
        id: NodeId,
        origin: (f32, f32),
        start_pos: (f32, f32),
        tx: Transaction,
    },
    Resizing {
        id: NodeId,
        origin: (f32, f32),
        start_size: (f32, f32),
        tx: Transaction,
    },
    Panning,
    EditingText(TextEdit),
}

impl Interaction {
    pub fn name(&self) -> &'static str {
        match self {
            Interaction::Idle => "idle",
            Interaction::PendingTextClick { .. } => "pending-text-click",
            Interaction::Dragging { .. } => "dragging",
            Interaction::Resizing { .. } => "resizing",
            Interaction::Panning => "panning",
            Interaction::EditingText(_) => "editing-text",
        }
    }

    /// Sessions that live between a pointer press and its release.
    pub fn is_pointer_session(&self) -> bool {
        matches!(
            self,
            Interaction::PendingTextClick { .. }
                | Interaction::Dragging { .. }
                | Interaction::Resizing { .. }
                | Interaction::Panning
        )
    }
}

/// Replace node `id` on the host with `f` applied. `false` if nothing changed.
fn apply<H: EditorHost + ?Sized>(host: &mut H, id: NodeId, f: impl FnOnce(&mut Node)) -> bool {
    match edit_node(host.nodes(), id, f) {
        Some(nodes) => {
            host.set_nodes(nodes);
            true
        }
        None => false,
    }
}

pub struct CanvasEditor {
    config: EditorConfig,
    viewport: ViewportController,
    interaction: Interaction,
    history: HistoryBridge,
    /// A host-side text field holds keyboard focus.
    text_focus: bool,
    surface: Option<(u32, u32)>,
}

impl Default for CanvasEditor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl CanvasEditor {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            viewport: ViewportController::new(config.zoom),
            config,
            interaction: Interaction::Idle,
            history: HistoryBridge::new(),
            text_focus: false,
            surface: None,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn history(&self) -> &HistoryBridge {
        &self.history
    }

    /// The node whose label is being edited inline.
    pub fn editing(&self) -> Option<NodeId> {
        match &self.interaction {
            Interaction::EditingText(edit) => Some(edit.id()),
            _ => None,
        }
    }

    /// Hosts report focus of their own text fields here; shortcuts are
    /// suppressed while one is focused.
    pub fn set_text_focus(&mut self, focused: bool) {
        self.text_focus = focused;
    }

    pub fn text_input_focused(&self) -> bool {
        self.text_focus || self.editing().is_some()
    }

    // ─── Sessions ────────────────────────────────────────────────────────

    fn enter_session(&mut self, next: Interaction) {
        log::debug!("session: enter {}", next.name());
        self.interaction = next;
    }

    fn exit_session(&mut self) -> Interaction {
        let prev = std::mem::replace(&mut self.interaction, Interaction::Idle);
        if prev != Interaction::Idle {
            log::debug!("session: exit {}", prev.name());
        }
        prev
    }

    // ─── Events ──────────────────────────────────────────────────────────

    /// Process one input event. Returns `true` when the event was consumed.
    pub fn handle<H: EditorHost + ?Sized>(&mut self, host: &mut H, event: &InputEvent) -> bool {
        match event {
            InputEvent::PointerDown { x, y, .. } => self.pointer_down(host, *x, *y, event),
            InputEvent::PointerMove { x, y } => self.pointer_move(host, *x, *y),
            InputEvent::PointerUp { x, y } => self.pointer_up(host, *x, *y),
            InputEvent::PointerLeave => self.pointer_leave(),
            InputEvent::Wheel { .. } => {
                log::trace!("wheel input ignored");
                false
            }
            InputEvent::Key { key, modifiers } => self.key(host, key, *modifiers),
            InputEvent::TextChanged { text } => self.text_changed(host, text),
            InputEvent::Blur => self.confirm_text_edit(host),
        }
    }

    fn pointer_down<H: EditorHost + ?Sized>(&mut self, host: &mut H, x: f32, y: f32, event: &InputEvent) -> bool {
        let (sx, sy) = self.viewport.screen_to_scene(x, y);
        let hit = hit_test(host.nodes(), sx, sy, self.config.handle_size);

        if let Some(editing) = self.editing() {
            if hit.map(|h| h.id()) == Some(editing) {
                return false;
            }
            // Pressing anywhere else takes focus from the inline editor.
            self.confirm_text_edit(host);
        } else if self.interaction.is_pointer_session() {
            log::debug!("press during {}: previous release was lost", self.interaction.name());
            self.finish_pointer_session(host, None);
        }

        match hit {
            Some(Hit::ResizeHandle(id)) => {
                host.on_select(id, event);
                let Some(node) = find_node(host.nodes(), id) else {
                    return true;
                };
                let start_size = (node.w, node.h);
                let tx = self.history.begin(host.nodes(), "resize");
                self.enter_session(Interaction::Resizing {
                    id,
                    origin: (x, y),
                    start_size,
                    tx,
                });
            }
            Some(Hit::Node(id)) => {
                let was_selected = host.selection().contains(id);
                host.on_select(id, event);
                let Some(node) = find_node(host.nodes(), id) else {
                    return true;
                };
                let start_pos = (node.x, node.y);
                // A modifier press may have just toggled the node out.
                let pending = node.is_text() && was_selected && host.selection().contains(id);
                let tx = self.history.begin(host.nodes(), "drag");
                let next = if pending {
                    Interaction::PendingTextClick {
                        id,
                        origin: (x, y),
                        start_pos,
                        tx,
                    }
                } else {
                    Interaction::Dragging {
                        id,
                        origin: (x, y),
                        start_pos,
                        tx,
                    }
                };
                self.enter_session(next);
            }
            None => {
                host.on_deselect();
                self.viewport.begin_pan(x, y);
                self.enter_session(Interaction::Panning);
            }
        }
        true
    }

    fn beyond_click_threshold(&self, origin: (f32, f32), x: f32, y: f32) -> bool {
        let t = self.config.click_threshold;
        (x - origin.0).abs() > t || (y - origin.1).abs() > t
    }

    fn pointer_move<H: EditorHost + ?Sized>(&mut self, host: &mut H, x: f32, y: f32) -> bool {
        match self.interaction {
            Interaction::PendingTextClick {
                id,
                origin,
                start_pos,
                ..
            } => {
                if !self.beyond_click_threshold(origin, x, y) {
                    return false;
                }
                if let Interaction::PendingTextClick { tx, .. } = self.exit_session() {
                    self.enter_session(Interaction::Dragging {
                        id,
                        origin,
                        start_pos,
                        tx,
                    });
                }
                self.drag_to(host, id, origin, start_pos, x, y)
            }
            Interaction::Dragging {
                id,
                origin,
                start_pos,
                ..
            } => self.drag_to(host, id, origin, start_pos, x, y),
            Interaction::Resizing {
                id,
                origin,
                start_size,
                ..
            } => self.resize_to(host, id, origin, start_size, x, y),
            Interaction::Panning => self.viewport.update_pan(x, y),
            _ => false,
        }
    }

    /// Unsnapped: start position plus the scene-space pointer delta.
    fn drag_to<H: EditorHost + ?Sized>(
        &self,
        host: &mut H,
        id: NodeId,
        origin: (f32, f32),
        start_pos: (f32, f32),
        x: f32,
        y: f32,
    ) -> bool {
        let (dx, dy) = self.viewport.screen_delta_to_scene(x - origin.0, y - origin.1);
        let (nx, ny) = (start_pos.0 + dx, start_pos.1 + dy);
        log::trace!("drag {id} -> ({nx}, {ny})");
        apply(host, id, |n| {
            n.x = nx;
            n.y = ny;
        })
    }

    /// Anchored at the top-left; size is clamped and grid-aligned on every move.
    fn resize_to<H: EditorHost + ?Sized>(
        &self,
        host: &mut H,
        id: NodeId,
        origin: (f32, f32),
        start_size: (f32, f32),
        x: f32,
        y: f32,
    ) -> bool {
        let (dw, dh) = self.viewport.screen_delta_to_scene(x - origin.0, y - origin.1);
        let (w, h) = self.config.grid.clamp_size(start_size.0 + dw, start_size.1 + dh);
        log::trace!("resize {id} -> {w}x{h}");
        apply(host, id, |n| {
            n.w = w;
            n.h = h;
        })
    }

    fn pointer_up<H: EditorHost + ?Sized>(&mut self, host: &mut H, x: f32, y: f32) -> bool {
        if !self.interaction.is_pointer_session() {
            return false;
        }
        self.finish_pointer_session(host, Some((x, y)));
        true
    }

    /// End the current pointer session. `release` is the pointer-up
    /// position, or `None` when the release was never delivered.
    fn finish_pointer_session<H: EditorHost + ?Sized>(&mut self, host: &mut H, release: Option<(f32, f32)>) {
        match self.exit_session() {
            Interaction::PendingTextClick {
                id,
                origin,
                start_pos,
                tx,
            } => match release {
                Some((x, y)) if self.beyond_click_threshold(origin, x, y) => {
                    self.drag_to(host, id, origin, start_pos, x, y);
                    self.settle_drag(host, id, tx);
                }
                Some(_) => {
                    if let Some(node) = find_node(host.nodes(), id) {
                        let edit = TextEdit::begin(node, self.history.begin(host.nodes(), "text edit"));
                        self.enter_session(Interaction::EditingText(edit));
                    }
                }
                None => {}
            },
            Interaction::Dragging {
                id,
                origin,
                start_pos,
                tx,
            } => {
                if let Some((x, y)) = release {
                    self.drag_to(host, id, origin, start_pos, x, y);
                }
                self.settle_drag(host, id, tx);
            }
            Interaction::Resizing {
                id,
                origin,
                start_size,
                tx,
            } => {
                if let Some((x, y)) = release {
                    self.resize_to(host, id, origin, start_size, x, y);
                }
                self.history.commit(host, tx);
            }
            Interaction::Panning => self.viewport.end_pan(),
            other => self.interaction = other,
        }
    }

    fn settle_drag<H: EditorHost + ?Sized>(&mut self, host: &mut H, id: NodeId, tx: Transaction) {
        let grid = self.config.grid;
        apply(host, id, |n| {
            n.x = grid.snap(n.x);
            n.y = grid.snap(n.y);
        });
        self.history.commit(host, tx);
    }

    fn pointer_leave(&mut self) -> bool {
        if self.interaction != Interaction::Panning {
            return false;
        }
        self.exit_session();
        self.viewport.end_pan();
        true
    }

    fn key<H: EditorHost + ?Sized>(&mut self, host: &mut H, key: &str, modifiers: Modifiers) -> bool {
        if self.editing().is_some() {
            return match key {
                "Escape" => self.cancel_text_edit(host),
                "Enter" if modifiers.cmd() => self.confirm_text_edit(host),
                _ => false,
            };
        }
        if self.text_focus {
            log::trace!("key {key:?} left to the focused text field");
            return false;
        }
        if self.interaction.is_pointer_session() {
            // The open transaction owns the node list until release.
            log::debug!("key {key:?} ignored during {}", self.interaction.name());
            return false;
        }

        let Some(action) = ShortcutMap::resolve(key, modifiers) else {
            return false;
        };
        log::debug!("shortcut {action:?}");
        match action {
            ShortcutAction::Delete => {
                let ids = host.selection().resolved();
                match ids.as_slice() {
                    [] => return false,
                    [id] => host.on_delete(*id),
                    many => host.on_delete_many(many),
                }
                true
            }
            ShortcutAction::Copy => match host.selection().primary() {
                Some(id) => {
                    host.on_copy(id);
                    true
                }
                None => false,
            },
            ShortcutAction::Paste => {
                host.on_paste();
                true
            }
            ShortcutAction::Undo => {
                if !host.can_undo() {
                    return false;
                }
                host.on_undo();
                true
            }
            ShortcutAction::Redo => {
                if !host.can_redo() {
                    return false;
                }
                host.on_redo();
                true
            }
        }
    }

    // ─── Text editing ────────────────────────────────────────────────────

    fn text_changed<H: EditorHost + ?Sized>(&mut self, host: &mut H, text: &str) -> bool {
        let Interaction::EditingText(edit) = &self.interaction else {
            log::warn!("text change with no open text edit");
            return false;
        };
        match edit.update(host.nodes(), text, &self.config.text_flow) {
            Some(nodes) => {
                host.set_nodes(nodes);
                true
            }
            None => false,
        }
    }

    fn confirm_text_edit<H: EditorHost + ?Sized>(&mut self, host: &mut H) -> bool {
        if self.editing().is_none() {
            return false;
        }
        let Interaction::EditingText(edit) = self.exit_session() else {
            return false;
        };
        if let Some(nodes) = edit.confirm(host.nodes(), &self.config.grid, &self.config.text_flow) {
            host.set_nodes(nodes);
        }
        self.history.commit(host, edit.into_transaction());
        true
    }

    fn cancel_text_edit<H: EditorHost + ?Sized>(&mut self, host: &mut H) -> bool {
        if self.editing().is_none() {
            return false;
        }
        let Interaction::EditingText(edit) = self.exit_session() else {
            return false;
        };
        if let Some(nodes) = edit.cancel(host.nodes()) {
            host.set_nodes(nodes);
        }
        log::debug!("text edit of {} cancelled", edit.id());
        true
    }

    // ─── Direct edits ────────────────────────────────────────────────────

    /// Replace a node with an edited copy (inspector fields and the like).
    ///
    /// The stored kind is kept. Text nodes are re-flowed to their label;
    /// geometry is grid-aligned. Commits when anything changed.
    pub fn replace_node<H: EditorHost + ?Sized>(&mut self, host: &mut H, node: Node) -> bool {
        let Some(stored) = find_node(host.nodes(), node.id) else {
            log::warn!("replace: unknown node {}", node.id);
            return false;
        };
        let is_text = stored.is_text();

        let mut node = node;
        let grid = self.config.grid;
        let flow = &self.config.text_flow;
        if is_text {
            reflow(&mut node, flow);
            (node.w, node.h) = grid.fit_text_size(node.w, node.h, flow.min_width, flow.min_height);
        } else {
            (node.w, node.h) = grid.clamp_size(node.w, node.h);
        }
        node.x = grid.snap(node.x);
        node.y = grid.snap(node.y);

        let tx = self.history.begin(host.nodes(), "replace node");
        let Some(nodes) = lp_core::model::replace_node(host.nodes(), node) else {
            return false;
        };
        host.set_nodes(nodes);
        self.history.commit(host, tx)
    }

    // ─── Viewport ────────────────────────────────────────────────────────

    pub fn zoom_in(&mut self) -> f32 {
        self.viewport.zoom_in()
    }

    pub fn zoom_out(&mut self) -> f32 {
        self.viewport.zoom_out()
    }

    pub fn reset_zoom(&mut self) -> f32 {
        self.viewport.reset_zoom()
    }

    // ─── Surface + output ────────────────────────────────────────────────

    pub fn attach_surface(&mut self, width: u32, height: u32) {
        log::debug!("surface attached: {width}x{height}");
        self.surface = Some((width, height));
    }

    pub fn detach_surface(&mut self) {
        self.surface = None;
    }

    pub fn surface(&self) -> Option<(u32, u32)> {
        self.surface
    }

    /// Live view: grid, selection, handles, pulse and busy overlay.
    pub fn render_view<H: EditorHost + ?Sized>(&self, host: &H) -> String {
        let (w, h) = self.surface.unwrap_or(DEFAULT_SURFACE);
        let busy = host.busy();
        let opts = SvgOptions {
            view_box: Rect::new(0.0, 0.0, w as f64, h as f64),
            pixel_width: w,
            pixel_height: h,
            view: self.viewport.transform(),
            decorations: true,
            handle_size: self.config.handle_size,
            background: Some(Color::WHITE),
            selection: host.selection(),
            just_added: host.just_added(),
            busy: busy.is_parsing.then_some(busy.parsing_time),
            text: self.config.text_flow,
        };
        render_svg(
            SceneView {
                nodes: host.nodes(),
                relations: host.relations(),
            },
            &opts,
        )
    }

    /// Rasterize the whole scene to PNG.
    ///
    /// The scene is captured now; the returned future owns its copy and
    /// can be awaited on any executor while editing continues.
    pub fn export_as_raster<H: EditorHost + ?Sized>(
        &self,
        host: &H,
    ) -> BoxFuture<'static, Result<RasterImage, ExportError>> {
        if self.surface.is_none() {
            log::warn!("export requested with no surface attached");
            return futures::future::ready(Err(ExportError::SurfaceUnavailable)).boxed();
        }
        let scene = SceneSnapshot::capture(host.nodes(), host.relations(), self.config.text_flow);
        export_scene(scene, self.config.export.clone()).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Busy;
    use lp_core::model::{NodeKind, Relation, Selection, Snapshot};
    use pretty_assertions::assert_eq;

    /// Host that records every callback and never changes on its own.
    #[derive(Default)]
    struct Recorder {
        nodes: Vec<Node>,
        relations: Vec<Relation>,
        selection: Selection,
        can_undo: bool,
        can_redo: bool,
        calls: Vec<String>,
        select_events: Vec<InputEvent>,
    }

    impl EditorHost for Recorder {
        fn nodes(&self) -> &[Node] {
            &self.nodes
        }
        fn relations(&self) -> &[Relation] {
            &self.relations
        }
        fn selection(&self) -> Selection {
            self.selection.clone()
        }
        fn can_undo(&self) -> bool {
            self.can_undo
        }
        fn can_redo(&self) -> bool {
            self.can_redo
        }
        fn busy(&self) -> Busy {
            Busy {
                is_parsing: true,
                parsing_time: 1.5,
            }
        }
        fn set_nodes(&mut self, nodes: Vec<Node>) {
            self.nodes = nodes;
        }
        fn on_select(&mut self, id: NodeId, event: &InputEvent) {
            self.calls.push(format!("select {id}"));
            self.select_events.push(event.clone());
        }
        fn on_deselect(&mut self) {
            self.calls.push("deselect".into());
        }
        fn on_delete(&mut self, id: NodeId) {
            self.calls.push(format!("delete {id}"));
        }
        fn on_delete_many(&mut self, ids: &[NodeId]) {
            let ids: Vec<&str> = ids.iter().map(|id| id.as_str()).collect();
            self.calls.push(format!("delete {}", ids.join(",")));
        }
        fn on_copy(&mut self, id: NodeId) {
            self.calls.push(format!("copy {id}"));
        }
        fn on_paste(&mut self) {
            self.calls.push("paste".into());
        }
        fn on_undo(&mut self) {
            self.calls.push("undo".into());
        }
        fn on_redo(&mut self) {
            self.calls.push("redo".into());
        }
        fn on_history_save(&mut self, _snapshot: &Snapshot) {
            self.calls.push("save".into());
        }
    }

    fn recorder() -> Recorder {
        Recorder {
            nodes: vec![
                Node::new(NodeId::intern("ix_box"), NodeKind::Object, 0.0, 0.0, 100.0, 100.0),
                Node::new(NodeId::intern("ix_txt"), NodeKind::Text, 200.0, 0.0, 50.0, 40.0)
                    .with_label("hi"),
            ],
            ..Default::default()
        }
    }

    fn down(x: f32, y: f32, modifiers: Modifiers) -> InputEvent {
        InputEvent::PointerDown { x, y, modifiers }
    }

    #[test]
    fn press_forwards_raw_event_to_host() {
        let mut host = recorder();
        let mut editor = CanvasEditor::default();
        let press = down(10.0, 10.0, Modifiers::SHIFT);
        editor.handle(&mut host, &press);

        assert_eq!(host.calls, vec!["select ix_box"]);
        assert_eq!(host.select_events, vec![press]);
        assert_eq!(editor.interaction().name(), "dragging");
    }

    #[test]
    fn unmoved_click_does_not_commit() {
        let mut host = recorder();
        let mut editor = CanvasEditor::default();
        editor.handle(&mut host, &down(10.0, 10.0, Modifiers::NONE));
        editor.handle(&mut host, &InputEvent::PointerUp { x: 10.0, y: 10.0 });

        assert!(!host.calls.contains(&"save".to_string()));
        assert_eq!(editor.history().skipped(), 1);
        assert_eq!(editor.interaction(), &Interaction::Idle);
    }

    #[test]
    fn text_node_needs_prior_selection_to_edit() {
        let mut host = recorder();
        let mut editor = CanvasEditor::default();
        editor.handle(&mut host, &down(210.0, 10.0, Modifiers::NONE));
        assert_eq!(editor.interaction().name(), "dragging");
        editor.handle(&mut host, &InputEvent::PointerUp { x: 210.0, y: 10.0 });

        host.selection = Selection::single(NodeId::intern("ix_txt"));
        editor.handle(&mut host, &down(210.0, 10.0, Modifiers::NONE));
        assert_eq!(editor.interaction().name(), "pending-text-click");
        editor.handle(&mut host, &InputEvent::PointerMove { x: 212.0, y: 13.0 });
        assert_eq!(editor.interaction().name(), "pending-text-click");
        editor.handle(&mut host, &InputEvent::PointerUp { x: 212.0, y: 13.0 });
        assert_eq!(editor.editing(), Some(NodeId::intern("ix_txt")));
    }

    #[test]
    fn press_on_edited_node_is_ignored() {
        let mut host = recorder();
        host.selection = Selection::single(NodeId::intern("ix_txt"));
        let mut editor = CanvasEditor::default();
        editor.handle(&mut host, &down(210.0, 10.0, Modifiers::NONE));
        editor.handle(&mut host, &InputEvent::PointerUp { x: 210.0, y: 10.0 });
        host.calls.clear();

        assert!(!editor.handle(&mut host, &down(215.0, 15.0, Modifiers::NONE)));
        assert!(host.calls.is_empty());
        assert!(editor.editing().is_some());

        // Background press confirms the edit, then deselects and pans.
        editor.handle(&mut host, &down(500.0, 500.0, Modifiers::NONE));
        assert_eq!(editor.editing(), None);
        assert_eq!(host.calls, vec!["deselect"]);
        assert_eq!(editor.interaction(), &Interaction::Panning);
    }

    #[test]
    fn shortcuts_act_on_selection() {
        let mut host = recorder();
        host.selection = Selection::many([NodeId::intern("ix_txt"), NodeId::intern("ix_box")]);
        let mut editor = CanvasEditor::default();

        editor.handle(&mut host, &InputEvent::key("c", Modifiers::CTRL));
        editor.handle(&mut host, &InputEvent::key("Delete", Modifiers::NONE));
        assert_eq!(host.calls, vec!["copy ix_txt", "delete ix_txt,ix_box"]);

        host.selection = Selection::single(NodeId::intern("ix_box"));
        host.calls.clear();
        editor.handle(&mut host, &InputEvent::key("Backspace", Modifiers::NONE));
        assert_eq!(host.calls, vec!["delete ix_box"]);
    }

    #[test]
    fn shortcuts_wait_for_pointer_release() {
        let mut host = recorder();
        host.can_undo = true;
        host.selection = Selection::single(NodeId::intern("ix_box"));
        let mut editor = CanvasEditor::default();
        editor.handle(&mut host, &down(10.0, 10.0, Modifiers::NONE));
        host.calls.clear();

        for (key, modifiers) in [("z", Modifiers::META), ("Delete", Modifiers::NONE), ("v", Modifiers::CTRL)] {
            assert!(!editor.handle(&mut host, &InputEvent::key(key, modifiers)));
        }
        assert!(host.calls.is_empty());
        assert_eq!(editor.interaction().name(), "dragging");
    }

    #[test]
    fn undo_redo_are_gated_by_availability() {
        let mut host = recorder();
        let mut editor = CanvasEditor::default();
        assert!(!editor.handle(&mut host, &InputEvent::key("z", Modifiers::META)));
        assert!(!editor.handle(&mut host, &InputEvent::key("y", Modifiers::CTRL)));
        assert!(host.calls.is_empty());

        host.can_undo = true;
        host.can_redo = true;
        editor.handle(&mut host, &InputEvent::key("z", Modifiers::META));
        let cmd_shift = Modifiers {
            shift: true,
            ..Modifiers::CTRL
        };
        editor.handle(&mut host, &InputEvent::key("z", cmd_shift));
        assert_eq!(host.calls, vec!["undo", "redo"]);
    }

    #[test]
    fn focused_text_field_suppresses_shortcuts() {
        let mut host = recorder();
        host.selection = Selection::single(NodeId::intern("ix_box"));
        let mut editor = CanvasEditor::default();
        editor.set_text_focus(true);
        assert!(!editor.handle(&mut host, &InputEvent::key("Backspace", Modifiers::NONE)));
        assert!(host.calls.is_empty());
    }

    #[test]
    fn wheel_is_ignored() {
        let mut host = recorder();
        let mut editor = CanvasEditor::default();
        assert!(!editor.handle(&mut host, &InputEvent::Wheel { dx: 0.0, dy: -120.0 }));
        assert_eq!(editor.viewport().scale(), 1.0);
        assert_eq!(editor.viewport().pan(), (0.0, 0.0));
    }

    #[test]
    fn live_view_shows_busy_overlay() {
        let host = recorder();
        let editor = CanvasEditor::default();
        let svg = editor.render_view(&host);
        assert!(svg.contains("Parsing… 1.5s"));
        assert!(svg.contains("url(#grid)"));
    }
}
