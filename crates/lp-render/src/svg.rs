//! Scene → SVG document.
//!
//! One writer serves both the live canvas (grid, selection outline, resize
//! handles, pulse on the newest node, busy overlay) and export (no
//! decoration, transparent background, view box restricted to the export
//! frame). Relations are drawn centre to centre; a relation with a missing
//! endpoint is skipped.

use kurbo::Rect;
use lp_core::config::TextFlowConfig;
use lp_core::id::NodeId;
use lp_core::model::{Color, Node, NodeKind, Relation, Selection};
use lp_core::text_flow::{LABEL_INSET, LABEL_LINE_GAP, TextFlow, wrap_label};
use std::fmt::Write;

use crate::hit::HANDLE_SIZE;

const DEFAULT_BORDER: &str = "#6b7280";
const DEFAULT_TEXT: &str = "#374151";
const RELATION_STROKE: &str = "#3b82f6";
const RELATION_TEXT: &str = "#2563eb";
const HANDLE_FILL: &str = "#4b5563";
const CORNER_RADIUS: f32 = 6.0;

/// Pan/zoom applied to the scene group of the live view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub pan_x: f32,
    pub pan_y: f32,
    pub scale: f32,
}

impl ViewTransform {
    pub const IDENTITY: ViewTransform = ViewTransform {
        pan_x: 0.0,
        pan_y: 0.0,
        scale: 1.0,
    };

    fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

/// Borrowed scene content.
#[derive(Debug, Clone, Copy)]
pub struct SceneView<'a> {
    pub nodes: &'a [Node],
    pub relations: &'a [Relation],
}

/// What to draw and where.
#[derive(Debug, Clone)]
pub struct SvgOptions {
    /// Region of the document's user space mapped onto the image.
    pub view_box: Rect,
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub view: ViewTransform,
    /// Grid, selection outlines and resize handles.
    pub decorations: bool,
    /// Side of the resize handle square, matching the hit-test size.
    pub handle_size: f32,
    /// `None` leaves the background transparent.
    pub background: Option<Color>,
    pub selection: Selection,
    pub just_added: Option<NodeId>,
    /// Seconds spent parsing; draws the busy overlay when set.
    pub busy: Option<f32>,
    pub text: TextFlowConfig,
}

impl SvgOptions {
    /// Undecorated, transparent rendering of `view_box` at one pixel per unit.
    pub fn export(view_box: Rect, pixel_width: u32, pixel_height: u32) -> Self {
        Self {
            view_box,
            pixel_width,
            pixel_height,
            view: ViewTransform::IDENTITY,
            decorations: false,
            handle_size: HANDLE_SIZE,
            background: None,
            selection: Selection::none(),
            just_added: None,
            busy: None,
            text: TextFlowConfig::default(),
        }
    }
}

/// Escape text for use in SVG character data and attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

fn color_or(c: Option<Color>, fallback: &str) -> String {
    c.map(|c| c.to_hex()).unwrap_or_else(|| fallback.to_string())
}

pub fn render_svg(scene: SceneView<'_>, opts: &SvgOptions) -> String {
    let vb = opts.view_box;
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" viewBox=\"{} {} {} {}\">",
        opts.pixel_width,
        opts.pixel_height,
        vb.x0,
        vb.y0,
        vb.width(),
        vb.height()
    );

    if opts.decorations {
        svg.push_str(concat!(
            "<defs>\n",
            "  <pattern id=\"smallGrid\" width=\"10\" height=\"10\" patternUnits=\"userSpaceOnUse\">",
            "<path d=\"M 10 0 L 0 0 0 10\" fill=\"none\" stroke=\"#eeeeee\" stroke-width=\"1\" /></pattern>\n",
            "  <pattern id=\"grid\" width=\"100\" height=\"100\" patternUnits=\"userSpaceOnUse\">",
            "<rect width=\"100\" height=\"100\" fill=\"url(#smallGrid)\" />",
            "<path d=\"M 100 0 L 0 0 0 100\" fill=\"none\" stroke=\"#dddddd\" stroke-width=\"1\" /></pattern>\n",
            "</defs>\n",
        ));
    }

    if let Some(bg) = opts.background {
        let _ = writeln!(
            svg,
            "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" />",
            vb.x0,
            vb.y0,
            vb.width(),
            vb.height(),
            bg.to_hex()
        );
    }

    let grouped = !opts.view.is_identity();
    if grouped {
        let v = opts.view;
        let _ = writeln!(
            svg,
            "<g transform=\"translate({},{}) scale({})\">",
            v.pan_x, v.pan_y, v.scale
        );
    }

    if opts.decorations {
        svg.push_str("<rect x=\"-2000\" y=\"-2000\" width=\"4000\" height=\"4000\" fill=\"url(#grid)\" />\n");
    }

    for relation in scene.relations {
        render_relation(&mut svg, scene.nodes, relation);
    }
    for node in scene.nodes {
        match node.kind {
            NodeKind::Object => render_object(&mut svg, node, opts),
            NodeKind::Text => render_text(&mut svg, node, opts),
        }
    }

    if grouped {
        svg.push_str("</g>\n");
    }

    if let Some(elapsed) = opts.busy {
        let _ = writeln!(
            svg,
            "<g class=\"busy\"><rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"#ffffff\" fill-opacity=\"0.6\" />\
             <text x=\"{}\" y=\"{}\" font-size=\"14\" text-anchor=\"middle\" fill=\"{DEFAULT_TEXT}\">Parsing… {elapsed:.1}s</text></g>",
            vb.x0,
            vb.y0,
            vb.width(),
            vb.height(),
            vb.center().x,
            vb.center().y
        );
    }

    svg.push_str("</svg>\n");
    svg
}

fn render_relation(out: &mut String, nodes: &[Node], relation: &Relation) {
    let Some((from, to)) = relation.endpoints(nodes) else {
        log::trace!("relation {} has a missing endpoint, skipped", relation.id);
        return;
    };
    let (x1, y1) = from.bounds().center();
    let (x2, y2) = to.bounds().center();
    let _ = writeln!(
        out,
        "<g class=\"relation\"><line x1=\"{x1}\" y1=\"{y1}\" x2=\"{x2}\" y2=\"{y2}\" stroke=\"{RELATION_STROKE}\" stroke-dasharray=\"4 2\" />\
         <text x=\"{}\" y=\"{}\" font-size=\"9\" fill=\"{RELATION_TEXT}\">{}</text></g>",
        (x1 + x2) / 2.0,
        (y1 + y2) / 2.0 - 4.0,
        relation.kind
    );
}

fn stroke_width(node: &Node, opts: &SvgOptions) -> f32 {
    let base = node.style.border_width.unwrap_or(1.0);
    if opts.decorations && opts.selection.contains(node.id) {
        base.max(2.0)
    } else {
        base
    }
}

fn open_node_group(out: &mut String, node: &Node, opts: &SvgOptions) {
    let _ = write!(
        out,
        "<g data-id=\"{}\" transform=\"translate({},{})\">",
        escape(node.id.as_str()),
        node.x,
        node.y
    );
    if opts.just_added == Some(node.id) {
        out.push_str(
            "<animate attributeName=\"opacity\" values=\"1;0.4;1\" dur=\"0.6s\" repeatCount=\"1\" />",
        );
    }
}

fn close_node_group(out: &mut String, node: &Node, opts: &SvgOptions) {
    if opts.decorations {
        let size = opts.handle_size;
        let _ = write!(
            out,
            "<rect class=\"handle\" x=\"{}\" y=\"{}\" width=\"{size}\" height=\"{size}\" fill=\"{HANDLE_FILL}\" />",
            node.w - size,
            node.h - size,
        );
    }
    out.push_str("</g>\n");
}

fn render_object(out: &mut String, node: &Node, opts: &SvgOptions) {
    open_node_group(out, node, opts);
    let _ = write!(
        out,
        "<rect width=\"{}\" height=\"{}\" rx=\"{CORNER_RADIUS}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\" />",
        node.w,
        node.h,
        color_or(node.style.fill, "#ffffff"),
        color_or(node.style.border, DEFAULT_BORDER),
        stroke_width(node, opts)
    );

    let content = node.display_text();
    let label = wrap_label(&content, node.w, node.h, &opts.text);
    let _ = write!(
        out,
        "<text x=\"{LABEL_INSET}\" y=\"{}\" font-size=\"{}\" fill=\"{}\">",
        label.font_size,
        label.font_size,
        color_or(node.style.text_color, DEFAULT_TEXT)
    );
    for (i, line) in label.lines.iter().enumerate() {
        let dy = if i == 0 {
            0.0
        } else {
            label.font_size + LABEL_LINE_GAP
        };
        let _ = write!(out, "<tspan x=\"{LABEL_INSET}\" dy=\"{dy}\">{}</tspan>", escape(line));
    }
    let _ = write!(out, "</text><title>{}</title>", escape(&content));
    close_node_group(out, node, opts);
}

fn render_text(out: &mut String, node: &Node, opts: &SvgOptions) {
    open_node_group(out, node, opts);
    let selected = opts.decorations && opts.selection.contains(node.id);
    let stroke = match node.style.border {
        Some(c) => c.to_hex(),
        None if selected => DEFAULT_BORDER.to_string(),
        None => "none".to_string(),
    };
    let dash = if selected && node.style.border.is_none() {
        " stroke-dasharray=\"4 2\""
    } else {
        ""
    };
    let _ = write!(
        out,
        "<rect width=\"{}\" height=\"{}\" fill=\"{}\" stroke=\"{stroke}\" stroke-width=\"{}\"{dash} />",
        node.w,
        node.h,
        color_or(node.style.fill, "none"),
        stroke_width(node, opts)
    );

    let font_size = node.font_size(&opts.text);
    let flow = TextFlow::new(&opts.text, font_size);
    let layout = flow.fixed_width(node.label.as_deref().unwrap_or(""), node.w, node.h);
    let pad = opts.text.padding;
    let _ = write!(
        out,
        "<text font-size=\"{font_size}\" fill=\"{}\">",
        color_or(node.style.text_color, DEFAULT_TEXT)
    );
    for (i, line) in layout.lines.iter().enumerate() {
        let baseline = pad + i as f32 * flow.line_height() + font_size;
        let _ = write!(out, "<tspan x=\"{pad}\" y=\"{baseline}\">{}</tspan>", escape(line));
    }
    out.push_str("</text>");
    close_node_group(out, node, opts);
}
