pub mod config;
pub mod grid;
pub mod id;
pub mod model;
pub mod prompt;
pub mod text_flow;

pub use config::{GridConfig, NodeDefaults, NodeTemplate, TextFlowConfig};
pub use grid::{clamp_size, snap};
pub use id::NodeId;
pub use model::*;
pub use prompt::{Surface, build_layout_prompt};
pub use text_flow::{LabelLayout, TextFlow, TextLayout, wrap_label, wrap_text};
