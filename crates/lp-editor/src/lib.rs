pub mod commands;
pub mod config;
pub mod history;
pub mod host;
pub mod input;
pub mod interaction;
pub mod shortcuts;
pub mod text_edit;
pub mod viewport;

pub use commands::CommandStack;
pub use config::{EditorConfig, ZoomConfig};
pub use history::{HistoryBridge, Transaction};
pub use host::{Busy, EditorHost, LayoutPage};
pub use input::{InputEvent, Modifiers};
pub use interaction::{CanvasEditor, Interaction};
pub use shortcuts::{ShortcutAction, ShortcutMap};
pub use text_edit::TextEdit;
pub use viewport::ViewportController;
