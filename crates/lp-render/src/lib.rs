pub mod export;
pub mod hit;
pub mod svg;

pub use export::{
    ExportConfig, ExportError, ExportFrame, RasterImage, RenderTarget, SceneSnapshot,
    export_scene, rasterize,
};
pub use hit::{HANDLE_SIZE, Hit, hit_test};
pub use svg::{SceneView, SvgOptions, ViewTransform, render_svg};
