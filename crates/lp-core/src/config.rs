//! Tunable constants for grid geometry, text flow, and fresh-node defaults.
//!
//! Every struct has a `Default` matching the behavior the editor ships with;
//! hosts override individual fields (or load them from JSON via serde).

use crate::model::Color;
use serde::{Deserialize, Serialize};

// ─── Grid ─────────────────────────────────────────────────────────────────

/// Grid snapping parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Grid unit in scene units. Default: **10**.
    pub unit: f32,
    /// Smallest width/height a shape may be resized to. Default: **20**.
    pub min_size: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            unit: 10.0,
            min_size: 20.0,
        }
    }
}

// ─── Text flow ────────────────────────────────────────────────────────────

/// Parameters of the glyph-width approximation used by `TextFlow`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextFlowConfig {
    /// Average glyph width as a fraction of the font size. Default: **0.55**.
    pub glyph_ratio: f32,
    /// Line height as a fraction of the font size. Default: **1.2**.
    pub line_height_ratio: f32,
    /// Inner padding on every side of a text box. Default: **8**.
    pub padding: f32,
    /// Font size used when a text node carries none. Default: **16**.
    pub font_size: f32,
    /// Minimum width of a text node. Default: **50**.
    pub min_width: f32,
    /// Minimum height of a text node. Default: **40**.
    pub min_height: f32,
}

impl Default for TextFlowConfig {
    fn default() -> Self {
        Self {
            glyph_ratio: 0.55,
            line_height_ratio: 1.2,
            padding: 8.0,
            font_size: 16.0,
            min_width: 50.0,
            min_height: 40.0,
        }
    }
}

// ─── Fresh nodes ──────────────────────────────────────────────────────────

/// Geometry and content given to a node created by an "add" request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeTemplate {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
    pub label: String,
    pub fill: Option<Color>,
}

/// Templates for each node kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeDefaults {
    pub object: NodeTemplate,
    pub text: NodeTemplate,
}

impl Default for NodeDefaults {
    fn default() -> Self {
        Self {
            object: NodeTemplate {
                x: 40.0,
                y: 40.0,
                w: 140.0,
                h: 90.0,
                label: "object".to_string(),
                fill: Some(Color::WHITE),
            },
            text: NodeTemplate {
                x: 60.0,
                y: 60.0,
                w: 50.0,
                h: 40.0,
                label: "text".to_string(),
                fill: None,
            },
        }
    }
}
