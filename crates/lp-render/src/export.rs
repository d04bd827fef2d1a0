//! Scene export: frame computation and SVG → PNG rasterization.
//!
//! The pipeline is pure: `rasterize` takes a captured `SceneSnapshot` and a
//! `RenderTarget` and has no access to editor state, so an export can run
//! while the user keeps editing and concurrent exports never share buffers.

use std::sync::Arc;

use base64::Engine as _;
use kurbo::Rect;
use lp_core::config::TextFlowConfig;
use lp_core::model::{Node, Relation, Snapshot};
use serde::{Deserialize, Serialize};

use crate::svg::{SceneView, SvgOptions, render_svg};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("no drawing surface is attached")]
    SurfaceUnavailable,
    #[error("failed to decode the rendered scene: {0}")]
    Decode(String),
    #[error("failed to allocate a {width}x{height} pixmap")]
    PixmapAlloc { width: u32, height: u32 },
    #[error("failed to encode PNG: {0}")]
    PngEncode(String),
}

pub type Result<T> = std::result::Result<T, ExportError>;

// ─── Config ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Margin on each side, as a fraction of the content width/height.
    /// Default: **0.25**.
    pub margin_ratio: f64,
    /// Content box used when the scene is empty. Default: **800×600 at origin**.
    pub default_width: f64,
    pub default_height: f64,
    /// Load the host's fonts so labels render. Default: **true**.
    pub load_system_fonts: bool,
    pub font_family: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            margin_ratio: 0.25,
            default_width: 800.0,
            default_height: 600.0,
            load_system_fonts: true,
            font_family: "Arial".to_string(),
        }
    }
}

// ─── Frame ───────────────────────────────────────────────────────────────

/// Region of the scene an export covers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportFrame {
    /// Union of all node bounds (or the default box).
    pub content: Rect,
    /// Content plus the margin on every side.
    pub padded: Rect,
    /// `padded` with its lower bound clamped at 0.
    pub clamped: Rect,
}

impl ExportFrame {
    pub fn of(nodes: &[Node], config: &ExportConfig) -> Self {
        let content = content_bounds(nodes, config);
        let padded = content.inflate(
            content.width() * config.margin_ratio,
            content.height() * config.margin_ratio,
        );
        let clamped = Rect::new(padded.x0.max(0.0), padded.y0.max(0.0), padded.x1, padded.y1);
        Self {
            content,
            padded,
            clamped,
        }
    }

    /// Output size in pixels: the full padded extent, one pixel per unit.
    pub fn pixel_size(&self) -> (u32, u32) {
        let px = |v: f64| v.ceil().max(1.0) as u32;
        (px(self.padded.width()), px(self.padded.height()))
    }
}

/// Union of node bounds, or the default box when there are no nodes.
pub fn content_bounds(nodes: &[Node], config: &ExportConfig) -> Rect {
    let rect_of = |n: &Node| {
        Rect::new(
            n.x as f64,
            n.y as f64,
            (n.x + n.w) as f64,
            (n.y + n.h) as f64,
        )
    };
    let mut iter = nodes.iter();
    match iter.next() {
        Some(first) => iter.fold(rect_of(first), |acc, n| acc.union(rect_of(n))),
        None => Rect::new(0.0, 0.0, config.default_width, config.default_height),
    }
}

// ─── Snapshot + target ───────────────────────────────────────────────────

/// Everything `rasterize` needs, captured at export start.
#[derive(Debug, Clone)]
pub struct SceneSnapshot {
    pub nodes: Snapshot,
    pub relations: Arc<[Relation]>,
    pub text: TextFlowConfig,
}

impl SceneSnapshot {
    pub fn capture(nodes: &[Node], relations: &[Relation], text: TextFlowConfig) -> Self {
        Self {
            nodes: Snapshot::new(nodes),
            relations: Arc::from(relations),
            text,
        }
    }

    pub fn view(&self) -> SceneView<'_> {
        SceneView {
            nodes: self.nodes.nodes(),
            relations: &self.relations,
        }
    }
}

/// Where and how large to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderTarget {
    /// Scene region mapped onto the image.
    pub view_box: Rect,
    pub width: u32,
    pub height: u32,
}

impl RenderTarget {
    /// Viewed from the clamped origin, sized to the padded extent.
    pub fn for_frame(frame: &ExportFrame) -> Self {
        let (width, height) = frame.pixel_size();
        let origin = frame.clamped.origin();
        Self {
            view_box: Rect::new(
                origin.x,
                origin.y,
                origin.x + frame.padded.width(),
                origin.y + frame.padded.height(),
            ),
            width,
            height,
        }
    }
}

// ─── Raster ──────────────────────────────────────────────────────────────

/// Encoded PNG plus its dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

impl RasterImage {
    pub fn data_url(&self) -> String {
        format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(&self.png)
        )
    }
}

/// Undecorated SVG of the scene for `target`.
pub fn export_svg(scene: &SceneSnapshot, target: &RenderTarget) -> String {
    let mut opts = SvgOptions::export(target.view_box, target.width, target.height);
    opts.text = scene.text;
    render_svg(scene.view(), &opts)
}

/// Render `scene` into a PNG of `target`'s size.
pub fn rasterize(scene: &SceneSnapshot, target: &RenderTarget, config: &ExportConfig) -> Result<RasterImage> {
    let svg = export_svg(scene, target);
    rasterize_svg(&svg, target.width, target.height, config)
}

/// Decode an SVG document and rasterize it at one pixel per user unit.
pub fn rasterize_svg(svg: &str, width: u32, height: u32, config: &ExportConfig) -> Result<RasterImage> {
    let mut opt = usvg::Options::default();
    if config.load_system_fonts {
        opt.fontdb_mut().load_system_fonts();
    }
    opt.font_family = config.font_family.clone();

    let tree = usvg::Tree::from_str(svg, &opt).map_err(|e| ExportError::Decode(e.to_string()))?;

    let mut pixmap =
        tiny_skia::Pixmap::new(width, height).ok_or(ExportError::PixmapAlloc { width, height })?;
    // The document's own width/height/viewBox map the frame onto the pixmap.
    resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());

    let png = pixmap
        .encode_png()
        .map_err(|e| ExportError::PngEncode(e.to_string()))?;
    log::debug!("rasterized {width}x{height} ({} bytes)", png.len());
    Ok(RasterImage { width, height, png })
}

/// Frame the scene, render it, and encode it.
///
/// Runtime-agnostic: the returned future does its work when polled and
/// holds no borrow of the caller's state.
pub async fn export_scene(scene: SceneSnapshot, config: ExportConfig) -> Result<RasterImage> {
    let frame = ExportFrame::of(scene.nodes.nodes(), &config);
    let target = RenderTarget::for_frame(&frame);
    log::debug!(
        "export: {} nodes, frame {:?}, {}x{} px",
        scene.nodes.len(),
        frame.clamped,
        target.width,
        target.height
    );
    rasterize(&scene, &target, &config)
}
