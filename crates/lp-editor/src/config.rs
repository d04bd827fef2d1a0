//! Editor configuration.

use lp_core::config::{GridConfig, NodeDefaults, TextFlowConfig};
use lp_render::export::ExportConfig;
use serde::{Deserialize, Serialize};

/// Button-driven zoom bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    /// Default: **0.3**.
    pub min: f32,
    /// Default: **3.0**.
    pub max: f32,
    /// Default: **0.1**.
    pub step: f32,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min: 0.3,
            max: 3.0,
            step: 0.1,
        }
    }
}

/// Everything the canvas editor and the reference host can be tuned with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Screen-unit movement that turns a pending text click into a drag.
    /// Default: **3**.
    pub click_threshold: f32,
    pub zoom: ZoomConfig,
    /// Side of the resize handle in scene units. Default: **8**.
    pub handle_size: f32,
    pub grid: GridConfig,
    pub text_flow: TextFlowConfig,
    pub defaults: NodeDefaults,
    /// Offset of a pasted node from its source. Default: **20**.
    pub paste_offset: f32,
    /// Maximum number of history entries kept by the reference host.
    /// Default: **100**.
    pub history_depth: usize,
    pub export: ExportConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            click_threshold: 3.0,
            zoom: ZoomConfig::default(),
            handle_size: lp_render::hit::HANDLE_SIZE,
            grid: GridConfig::default(),
            text_flow: TextFlowConfig::default(),
            defaults: NodeDefaults::default(),
            paste_offset: 20.0,
            history_depth: 100,
            export: ExportConfig::default(),
        }
    }
}
