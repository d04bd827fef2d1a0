//! Integration tests: pointer sessions against the reference host.
//!
//! Drives `CanvasEditor` with raw `InputEvent`s on a `LayoutPage` and checks
//! the resulting node list, selection and history.

use futures::executor::block_on;
use lp_core::id::NodeId;
use lp_core::model::{NodeKind, RelationKind, find_node};
use lp_editor::{CanvasEditor, EditorConfig, EditorHost, InputEvent, Interaction, LayoutPage, Modifiers};
use lp_render::ExportError;
use pretty_assertions::assert_eq;

fn setup() -> (CanvasEditor, LayoutPage) {
    let config = EditorConfig::default();
    (CanvasEditor::new(config.clone()), LayoutPage::new(&config))
}

fn down(x: f32, y: f32) -> InputEvent {
    InputEvent::PointerDown {
        x,
        y,
        modifiers: Modifiers::NONE,
    }
}

fn mv(x: f32, y: f32) -> InputEvent {
    InputEvent::PointerMove { x, y }
}

fn up(x: f32, y: f32) -> InputEvent {
    InputEvent::PointerUp { x, y }
}

fn geometry(page: &LayoutPage, id: NodeId) -> (f32, f32, f32, f32) {
    let n = find_node(page.nodes(), id).unwrap();
    (n.x, n.y, n.w, n.h)
}

// ─── Drag ────────────────────────────────────────────────────────────────

#[test]
fn drag_is_unsnapped_until_release() {
    let (mut editor, mut page) = setup();
    let id = page.add_node(NodeKind::Object); // (40,40) 140x90

    editor.handle(&mut page, &down(100.0, 100.0));
    editor.handle(&mut page, &mv(107.0, 101.0));
    assert_eq!(geometry(&page, id), (47.0, 41.0, 140.0, 90.0));

    editor.handle(&mut page, &mv(113.0, 104.0));
    editor.handle(&mut page, &up(113.0, 104.0));
    assert_eq!(geometry(&page, id), (50.0, 40.0, 140.0, 90.0));
    assert_eq!(editor.interaction(), &Interaction::Idle);
}

#[test]
fn drag_delta_is_divided_by_scale() {
    let (mut editor, mut page) = setup();
    let id = page.add_node(NodeKind::Object);
    for _ in 0..10 {
        editor.zoom_in();
    }
    assert_eq!(editor.viewport().scale(), 2.0);

    // Node occupies screen (80,80)..(360,260) at 2x.
    editor.handle(&mut page, &down(100.0, 100.0));
    editor.handle(&mut page, &mv(140.0, 160.0));
    assert_eq!(geometry(&page, id), (60.0, 70.0, 140.0, 90.0));
    editor.handle(&mut page, &up(140.0, 160.0));
    assert_eq!(geometry(&page, id), (60.0, 70.0, 140.0, 90.0));
}

#[test]
fn click_without_movement_does_not_commit() {
    let (mut editor, mut page) = setup();
    page.add_node(NodeKind::Object);
    let entries = page.history().len();

    editor.handle(&mut page, &down(100.0, 100.0));
    editor.handle(&mut page, &up(100.0, 100.0));
    assert_eq!(page.history().len(), entries);

    // A wiggle that snaps back to the same cell is no change either.
    editor.handle(&mut page, &down(100.0, 100.0));
    editor.handle(&mut page, &mv(102.0, 98.0));
    editor.handle(&mut page, &up(102.0, 98.0));
    assert_eq!(page.history().len(), entries);
}

// ─── Resize ──────────────────────────────────────────────────────────────

#[test]
fn resize_is_clamped_and_grid_aligned() {
    let (mut editor, mut page) = setup();
    let id = page.add_node(NodeKind::Object);

    // Handle: bottom-right 8x8 of (40,40)..(180,130).
    editor.handle(&mut page, &down(176.0, 126.0));
    assert_eq!(editor.interaction().name(), "resizing");
    editor.handle(&mut page, &mv(209.0, 133.0));
    assert_eq!(geometry(&page, id), (40.0, 40.0, 170.0, 100.0));

    editor.handle(&mut page, &mv(-500.0, -500.0));
    assert_eq!(geometry(&page, id), (40.0, 40.0, 20.0, 20.0));
    editor.handle(&mut page, &up(-500.0, -500.0));

    let (_, _, w, h) = geometry(&page, id);
    assert!(w >= 20.0 && h >= 20.0);
    assert!(page.can_undo());
}

// ─── Pan ─────────────────────────────────────────────────────────────────

#[test]
fn background_press_deselects_and_pans() {
    let (mut editor, mut page) = setup();
    let id = page.add_node(NodeKind::Object);
    page.select(id, false);

    editor.handle(&mut page, &down(500.0, 500.0));
    assert!(page.selection().is_empty());
    editor.handle(&mut page, &mv(520.0, 510.0));
    assert_eq!(editor.viewport().pan(), (20.0, 10.0));
    assert_eq!(geometry(&page, id), (40.0, 40.0, 140.0, 90.0));

    // Leaving the canvas ends the pan.
    editor.handle(&mut page, &InputEvent::PointerLeave);
    editor.handle(&mut page, &mv(600.0, 600.0));
    assert_eq!(editor.viewport().pan(), (20.0, 10.0));

    // Hit testing follows the pan: the node is now at screen (60,50).
    editor.handle(&mut page, &down(65.0, 55.0));
    assert_eq!(page.selection().primary(), Some(id));
}

// ─── Text editing ────────────────────────────────────────────────────────

fn open_text_edit(editor: &mut CanvasEditor, page: &mut LayoutPage) -> NodeId {
    let id = page.add_node(NodeKind::Text); // (60,60) 50x40
    editor.handle(page, &down(70.0, 70.0));
    editor.handle(page, &up(70.0, 70.0));
    assert_eq!(editor.editing(), None, "first press only selects");
    editor.handle(page, &down(70.0, 70.0));
    editor.handle(page, &up(71.0, 72.0));
    assert_eq!(editor.editing(), Some(id));
    id
}

#[test]
fn second_click_on_selected_text_enters_edit() {
    let (mut editor, mut page) = setup();
    open_text_edit(&mut editor, &mut page);
    assert!(editor.text_input_focused());
}

#[test]
fn modifier_press_that_deselects_text_does_not_edit() {
    let (mut editor, mut page) = setup();
    let id = page.add_node(NodeKind::Text);
    page.select(id, false);

    let shift_press = InputEvent::PointerDown {
        x: 70.0,
        y: 70.0,
        modifiers: Modifiers::SHIFT,
    };
    editor.handle(&mut page, &shift_press);
    assert!(!page.selection().contains(id));
    assert_eq!(editor.interaction().name(), "dragging");
    editor.handle(&mut page, &up(70.0, 70.0));
    assert_eq!(editor.editing(), None);
}

#[test]
fn pending_click_becomes_drag_past_threshold() {
    let (mut editor, mut page) = setup();
    let id = page.add_node(NodeKind::Text);
    page.select(id, false);

    editor.handle(&mut page, &down(70.0, 70.0));
    assert_eq!(editor.interaction().name(), "pending-text-click");
    editor.handle(&mut page, &mv(70.0, 73.0));
    assert_eq!(editor.interaction().name(), "pending-text-click");
    editor.handle(&mut page, &mv(70.0, 74.0));
    assert_eq!(editor.interaction().name(), "dragging");
    // Delta is measured from the original press, not the threshold crossing.
    assert_eq!(geometry(&page, id), (60.0, 64.0, 50.0, 40.0));

    editor.handle(&mut page, &mv(84.0, 90.0));
    editor.handle(&mut page, &up(84.0, 90.0));
    assert_eq!(geometry(&page, id), (70.0, 80.0, 50.0, 40.0));
    assert_eq!(editor.editing(), None);
}

#[test]
fn typing_reflows_and_confirm_snaps() {
    let (mut editor, mut page) = setup();
    let id = open_text_edit(&mut editor, &mut page);
    let entries = page.history().len();

    editor.handle(
        &mut page,
        &InputEvent::TextChanged {
            text: "glue sticks and scissors".into(),
        },
    );
    let (_, _, w, h) = geometry(&page, id);
    assert!((w - 86.4).abs() < 1e-3 && (h - 92.8).abs() < 1e-3, "{w}x{h}");
    assert_eq!(page.history().len(), entries, "typing does not commit");

    editor.handle(&mut page, &InputEvent::key("Enter", Modifiers::CTRL));
    assert_eq!(editor.editing(), None);
    assert_eq!(geometry(&page, id), (60.0, 60.0, 90.0, 100.0));
    let node = find_node(page.nodes(), id).unwrap();
    assert!(node.h >= h, "confirmed box cuts into the text: {} < {h}", node.h);
    assert_eq!(node.label.as_deref(), Some("glue sticks and scissors"));
    assert_eq!(page.history().len(), entries + 1);
}

#[test]
fn escape_restores_label_and_size() {
    let (mut editor, mut page) = setup();
    let id = open_text_edit(&mut editor, &mut page);
    let entries = page.history().len();

    editor.handle(&mut page, &InputEvent::TextChanged { text: "scissors and more".into() });
    editor.handle(&mut page, &InputEvent::key("Escape", Modifiers::NONE));

    let node = find_node(page.nodes(), id).unwrap();
    assert_eq!(node.label.as_deref(), Some("text"));
    assert_eq!((node.w, node.h), (50.0, 40.0));
    assert_eq!(page.history().len(), entries);
}

#[test]
fn blur_confirms_edit() {
    let (mut editor, mut page) = setup();
    let id = open_text_edit(&mut editor, &mut page);
    editor.handle(&mut page, &InputEvent::TextChanged { text: "ok".into() });
    editor.handle(&mut page, &InputEvent::Blur);

    assert_eq!(editor.editing(), None);
    assert_eq!(find_node(page.nodes(), id).unwrap().label.as_deref(), Some("ok"));
}

#[test]
fn pressing_another_node_confirms_edit() {
    let (mut editor, mut page) = setup();
    let id = open_text_edit(&mut editor, &mut page);
    let other = page.add_node(NodeKind::Object); // painted on top at (40,40)

    editor.handle(&mut page, &InputEvent::TextChanged { text: "done".into() });
    editor.handle(&mut page, &down(150.0, 120.0));
    assert_eq!(editor.editing(), None);
    assert_eq!(find_node(page.nodes(), id).unwrap().label.as_deref(), Some("done"));
    assert_eq!(page.selection().primary(), Some(other));
}

#[test]
fn shortcuts_are_ignored_while_editing() {
    let (mut editor, mut page) = setup();
    let id = open_text_edit(&mut editor, &mut page);
    editor.handle(&mut page, &InputEvent::key("Backspace", Modifiers::NONE));
    editor.handle(&mut page, &InputEvent::key("z", Modifiers::META));
    assert!(find_node(page.nodes(), id).is_some());
    assert_eq!(editor.editing(), Some(id));
}

// ─── Direct edits ────────────────────────────────────────────────────────

#[test]
fn replace_node_keeps_kind_and_reflows_text() {
    let (mut editor, mut page) = setup();
    let id = page.add_node(NodeKind::Text);
    let mut edited = find_node(page.nodes(), id).unwrap().clone();
    edited.kind = NodeKind::Object;
    edited.label = Some("glue sticks and scissors".into());

    assert!(editor.replace_node(&mut page, edited));
    let node = find_node(page.nodes(), id).unwrap();
    assert_eq!(node.kind, NodeKind::Text);
    assert_eq!((node.w, node.h), (90.0, 100.0));

    let same = node.clone();
    assert!(!editor.replace_node(&mut page, same));
}

// ─── Shortcuts + relations ───────────────────────────────────────────────

#[test]
fn delete_shortcut_keeps_relation_undrawn() {
    let (mut editor, mut page) = setup();
    let a = page.add_node(NodeKind::Object);
    let b = page.add_node(NodeKind::Text);
    page.add_relation(a, b, Some(RelationKind::OnTopOf));
    assert!(editor.render_view(&page).contains("on-top-of"));

    page.select(b, false);
    editor.handle(&mut page, &InputEvent::key("Delete", Modifiers::NONE));
    assert!(find_node(page.nodes(), b).is_none());
    assert_eq!(page.relations().len(), 1);
    assert!(!editor.render_view(&page).contains("on-top-of"));
}

#[test]
fn copy_paste_shortcuts() {
    let (mut editor, mut page) = setup();
    let a = page.add_node(NodeKind::Object);
    page.select(a, false);
    editor.handle(&mut page, &InputEvent::key("c", Modifiers::META));
    editor.handle(&mut page, &InputEvent::key("v", Modifiers::META));

    assert_eq!(page.nodes().len(), 2);
    let pasted = page.selection().primary().unwrap();
    assert_ne!(pasted, a);
    assert_eq!(geometry(&page, pasted), (60.0, 60.0, 140.0, 90.0));
}

// ─── Export ──────────────────────────────────────────────────────────────

#[test]
fn export_requires_surface() {
    let (mut editor, mut page) = setup();
    page.add_node(NodeKind::Object);
    let err = block_on(editor.export_as_raster(&page)).unwrap_err();
    assert!(matches!(err, ExportError::SurfaceUnavailable));

    let mut config = EditorConfig::default();
    config.export.load_system_fonts = false;
    editor = CanvasEditor::new(config);
    editor.attach_surface(800, 600);
    let pending = editor.export_as_raster(&page);
    // Edits after the capture do not affect the export.
    page.clear();
    let image = block_on(pending).unwrap();
    // content (40,40)..(180,130): 140x90 plus 25% per side
    assert_eq!((image.width, image.height), (210, 135));

    editor.detach_surface();
    assert!(block_on(editor.export_as_raster(&page)).is_err());
}
