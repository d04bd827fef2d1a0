//! Scene → structured text prompt for the image generator.
//!
//! The generator gets the user's problem text followed by an explicit layout
//! block: one numbered line per node (name, exact count, relative position,
//! shape word), a block of count requirements, and containment relations
//! detected from node geometry.

use crate::model::Node;
use std::fmt::Write;

/// Nominal drawing surface the relative positions are expressed against.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub width: f32,
    pub height: f32,
}

impl Default for Surface {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

fn plural(n: u32) -> &'static str {
    if n == 1 { "" } else { "s" }
}

fn shape_word(node: &Node) -> Option<&'static str> {
    if node.w <= 0.0 || node.h <= 0.0 {
        return None;
    }
    Some(if node.w > node.h {
        "wide"
    } else if node.w < node.h {
        "tall"
    } else {
        "square"
    })
}

/// `inner`'s centre lies strictly inside `outer`.
fn contains_center(outer: &Node, inner: &Node) -> bool {
    let (cx, cy) = inner.bounds().center();
    cx > outer.x && cx < outer.x + outer.w && cy > outer.y && cy < outer.y + outer.h
}

/// Build the layout prompt. An empty scene returns `problem` unchanged.
pub fn build_layout_prompt(problem: &str, nodes: &[Node], surface: Surface) -> String {
    if nodes.is_empty() {
        return problem.to_string();
    }

    let mut items = Vec::with_capacity(nodes.len());
    let mut counts = Vec::new();
    for (i, n) in nodes.iter().enumerate() {
        let name = n.name();
        let mut line = format!("{}. {name}", i + 1);
        match n.count {
            Some(c) => {
                let _ = write!(line, ": EXACTLY {c} {name}{}", plural(c));
                counts.push(format!(
                    "- Show EXACTLY {c} {name}{} (not {}, not {}, precisely {c} items)",
                    plural(c),
                    c as i64 - 1,
                    c as i64 + 1,
                ));
            }
            None => {
                let _ = write!(line, ": {name}");
            }
        }
        let rel_x = (n.x / surface.width * 100.0).round();
        let rel_y = (n.y / surface.height * 100.0).round();
        let _ = write!(
            line,
            " positioned at approximately {rel_x}% from left, {rel_y}% from top"
        );
        if let Some(shape) = shape_word(n) {
            let _ = write!(line, ", {shape} shape");
        }
        items.push(line);
    }

    let mut relations = Vec::new();
    for outer in nodes {
        for inner in nodes {
            if outer.id == inner.id || !contains_center(outer, inner) {
                continue;
            }
            let inner_count = match inner.count {
                Some(c) if c > 0 => format!(" ({c} {}{})", inner.name(), plural(c)),
                _ => String::new(),
            };
            relations.push(format!(
                "{}{inner_count} is contained inside {}",
                inner.name(),
                outer.name()
            ));
        }
    }

    let mut out = format!("{problem}\n\n=== LAYOUT SPECIFICATION (MUST FOLLOW EXACTLY) ===\n\n");
    if !counts.is_empty() {
        out.push_str("CRITICAL COUNT REQUIREMENTS:\n");
        for c in &counts {
            let _ = writeln!(out, "{c}");
        }
        out.push_str("\nVERIFY: Count each object type and ensure the numbers match EXACTLY.\n\n");
    }
    out.push_str("OBJECTS IN SCENE:\n");
    for item in &items {
        let _ = writeln!(out, "{item}");
    }
    out.push('\n');
    if !relations.is_empty() {
        out.push_str("SPATIAL RELATIONSHIPS:\n");
        for r in &relations {
            let _ = writeln!(out, "- {r}");
        }
        out.push('\n');
    }
    out.push_str("=== END LAYOUT SPECIFICATION ===\n\n");
    out.push_str(
        "Generate the visualization following this layout EXACTLY. \
         Pay special attention to object counts - they must be precise.",
    );
    out
}
