//! Scene data model for layout prompts.
//!
//! A scene is a flat, ordered list of `Node`s (later entries paint on top)
//! plus a list of `Relation`s that annotate pairs of nodes. Relations hold
//! identifiers, not ownership: a relation whose endpoint is gone is simply
//! not drawn. The node list itself is owned by the host; the editor reads it
//! and hands back replacement lists.

use crate::config::{NodeDefaults, TextFlowConfig};
use crate::id::NodeId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color. Stored as 4 × f32 [0.0, 1.0]; serialized as a hex string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Value of one hex digit.
fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a hex color string: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`.
    /// The string may optionally start with `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();
        let short = |i: usize| hex_val(bytes[i]).map(|v| (v * 17) as f32 / 255.0);
        let long = |i: usize| {
            let hi = hex_val(bytes[i])?;
            let lo = hex_val(bytes[i + 1])?;
            Some((hi << 4 | lo) as f32 / 255.0)
        };

        match bytes.len() {
            3 => Some(Self::rgba(short(0)?, short(1)?, short(2)?, 1.0)),
            4 => Some(Self::rgba(short(0)?, short(1)?, short(2)?, short(3)?)),
            6 => Some(Self::rgba(long(0)?, long(2)?, long(4)?, 1.0)),
            8 => Some(Self::rgba(long(0)?, long(2)?, long(4)?, long(6)?)),
            _ => None,
        }
    }

    /// Emit as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(&self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }

    pub fn to_rgba8(&self) -> [u8; 4] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid color `{s}`")))
    }
}

// ─── Nodes ───────────────────────────────────────────────────────────────

/// The closed set of node kinds. Immutable once a node exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeKind {
    /// A labeled, countable thing: box, bag, ball.
    #[serde(alias = "box")]
    Object,
    /// A free-flowing text block that sizes itself to its content.
    Text,
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Object => "object",
            NodeKind::Text => "text",
        }
    }
}

/// Optional visual overrides. `None` means "use the renderer's default".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<Color>,
    /// Only honored for `NodeKind::Text`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
}

/// A positioned, sized, styled scene element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Only meaningful for `NodeKind::Object`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(flatten)]
    pub style: NodeStyle,
}

impl Node {
    pub fn new(id: NodeId, kind: NodeKind, x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            id,
            kind,
            x,
            y,
            w,
            h,
            label: None,
            count: None,
            style: NodeStyle::default(),
        }
    }

    /// Build a fresh node of `kind` from the add-request template.
    pub fn from_defaults(id: NodeId, kind: NodeKind, defaults: &NodeDefaults) -> Self {
        let t = match kind {
            NodeKind::Object => &defaults.object,
            NodeKind::Text => &defaults.text,
        };
        let mut node = Self::new(id, kind, t.x, t.y, t.w, t.h);
        node.label = Some(t.label.clone());
        node.style.fill = t.fill;
        node
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    pub fn is_text(&self) -> bool {
        self.kind == NodeKind::Text
    }

    pub fn bounds(&self) -> Bounds {
        Bounds {
            x: self.x,
            y: self.y,
            width: self.w,
            height: self.h,
        }
    }

    /// Label, or the kind name when the label is missing or blank.
    pub fn name(&self) -> &str {
        match self.label.as_deref() {
            Some(l) if !l.trim().is_empty() => l,
            _ => self.kind.name(),
        }
    }

    /// The string drawn inside an object box: name plus ` ×count`.
    pub fn display_text(&self) -> String {
        match self.count {
            Some(n) if n > 0 => format!("{} ×{n}", self.name()),
            _ => self.name().to_string(),
        }
    }

    /// Effective font size of a text node.
    pub fn font_size(&self, config: &TextFlowConfig) -> f32 {
        self.style.font_size.unwrap_or(config.font_size)
    }
}

/// Axis-aligned box in scene units.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Find a node by id.
pub fn find_node(nodes: &[Node], id: NodeId) -> Option<&Node> {
    nodes.iter().find(|n| n.id == id)
}

/// Copy of `nodes` with the entry whose id matches `node.id` replaced.
/// The stored kind wins over `node.kind`: kinds never change.
/// Returns `None` when no node has that id.
pub fn replace_node(nodes: &[Node], node: Node) -> Option<Vec<Node>> {
    let pos = nodes.iter().position(|n| n.id == node.id)?;
    let mut out = nodes.to_vec();
    let kind = out[pos].kind;
    out[pos] = Node { kind, ..node };
    Some(out)
}

// ─── Relations ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationKind {
    Inside,
    NextTo,
    OnTopOf,
}

impl RelationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationKind::Inside => "inside",
            RelationKind::NextTo => "next-to",
            RelationKind::OnTopOf => "on-top-of",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directional annotation between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub id: NodeId,
    pub from: NodeId,
    pub to: NodeId,
    #[serde(rename = "type")]
    pub kind: RelationKind,
}

impl Relation {
    pub fn new(from: NodeId, to: NodeId, kind: RelationKind) -> Self {
        Self {
            id: NodeId::fresh_relation(),
            from,
            to,
            kind,
        }
    }

    /// Both endpoints, or `None` when either no longer exists.
    pub fn endpoints<'a>(&self, nodes: &'a [Node]) -> Option<(&'a Node, &'a Node)> {
        Some((find_node(nodes, self.from)?, find_node(nodes, self.to)?))
    }
}

// ─── Selection ───────────────────────────────────────────────────────────

/// Host-owned selection: a single id and/or a set of ids.
/// A non-empty set is authoritative over the single id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    pub id: Option<NodeId>,
    pub ids: SmallVec<[NodeId; 4]>,
}

impl Selection {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn single(id: NodeId) -> Self {
        Self {
            id: Some(id),
            ids: SmallVec::new(),
        }
    }

    pub fn many(ids: impl IntoIterator<Item = NodeId>) -> Self {
        Self {
            id: None,
            ids: ids.into_iter().collect(),
        }
    }

    /// The reconciled list of selected ids.
    pub fn resolved(&self) -> SmallVec<[NodeId; 4]> {
        if !self.ids.is_empty() {
            self.ids.clone()
        } else {
            self.id.into_iter().collect()
        }
    }

    /// The first selected id under the reconciled view.
    pub fn primary(&self) -> Option<NodeId> {
        self.ids.first().copied().or(self.id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        if !self.ids.is_empty() {
            self.ids.contains(&id)
        } else {
            self.id == Some(id)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty() && self.id.is_none()
    }
}

// ─── Snapshots ───────────────────────────────────────────────────────────

/// Immutable copy of the full node list at one instant.
///
/// Cloning is an `Arc` bump; equality is structural over every node field.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot(Arc<[Node]>);

impl Snapshot {
    pub fn new(nodes: &[Node]) -> Self {
        Self(Arc::from(nodes))
    }

    pub fn nodes(&self) -> &[Node] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<Node> {
        self.0.to_vec()
    }

    /// Structural comparison against a live node list.
    pub fn matches(&self, nodes: &[Node]) -> bool {
        *self.0 == *nodes
    }
}

impl From<Vec<Node>> for Snapshot {
    fn from(nodes: Vec<Node>) -> Self {
        Self(Arc::from(nodes))
    }
}

impl Deref for Snapshot {
    type Target = [Node];

    fn deref(&self) -> &[Node] {
        &self.0
    }
}
