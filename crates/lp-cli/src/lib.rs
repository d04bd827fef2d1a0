//! CLI logic for the `lp` tool.
//!
//! A scene file is loaded into the reference host exactly as a parser result
//! would be, then rendered through the same editor the canvas uses.

mod args;

pub use args::{Args, Command};

use std::fs;
use std::path::Path;

use anyhow::Context;
use futures::executor::block_on;
use log::info;
use lp_core::model::{Node, Relation};
use lp_core::prompt::{Surface, build_layout_prompt};
use lp_editor::{CanvasEditor, EditorConfig, LayoutPage};
use serde::{Deserialize, Serialize};

/// Scene file contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub relations: Vec<Relation>,
}

pub fn load_config(path: Option<&str>) -> anyhow::Result<EditorConfig> {
    let Some(path) = path else {
        return Ok(EditorConfig::default());
    };
    let text = fs::read_to_string(path).with_context(|| format!("reading config {path}"))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {path}"))
}

pub fn load_scene(path: impl AsRef<Path>) -> anyhow::Result<Scene> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).with_context(|| format!("reading scene {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing scene {}", path.display()))
}

fn open(scene: Scene, config: EditorConfig) -> (CanvasEditor, LayoutPage) {
    let surface = Surface::default();
    let mut page = LayoutPage::new(&config);
    page.load_parsed(scene.nodes, scene.relations);
    let mut editor = CanvasEditor::new(config);
    editor.attach_surface(surface.width as u32, surface.height as u32);
    (editor, page)
}

/// Run one `lp` command.
pub fn run(args: &Args) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;

    match &args.command {
        Command::Export { input, output } => {
            let (editor, page) = open(load_scene(input)?, config);
            let image = block_on(editor.export_as_raster(&page)).context("exporting scene")?;
            fs::write(output, &image.png).with_context(|| format!("writing {output}"))?;
            info!("wrote {output} ({}x{})", image.width, image.height);
        }
        Command::Svg { input, output } => {
            let (editor, page) = open(load_scene(input)?, config);
            fs::write(output, editor.render_view(&page)).with_context(|| format!("writing {output}"))?;
            info!("wrote {output}");
        }
        Command::Prompt { input, problem } => {
            let scene = load_scene(input)?;
            println!("{}", build_layout_prompt(problem, &scene.nodes, Surface::default()));
        }
    }
    Ok(())
}
