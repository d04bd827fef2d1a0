//! Viewport: pan/zoom and screen ↔ scene mapping.
//!
//! The viewport never touches node coordinates. Zoom is button-driven and
//! always lands on one decimal so repeated steps cannot drift.

use crate::config::ZoomConfig;
use lp_render::svg::ViewTransform;

#[derive(Debug, Clone)]
pub struct ViewportController {
    zoom: ZoomConfig,
    scale: f32,
    pan_x: f32,
    pan_y: f32,
    /// `pointer − pan` captured when a pan starts.
    pan_anchor: Option<(f32, f32)>,
}

fn one_decimal(v: f32) -> f32 {
    (v * 10.0).round() / 10.0
}

impl ViewportController {
    pub fn new(zoom: ZoomConfig) -> Self {
        Self {
            zoom,
            scale: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            pan_anchor: None,
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn pan(&self) -> (f32, f32) {
        (self.pan_x, self.pan_y)
    }

    pub fn transform(&self) -> ViewTransform {
        ViewTransform {
            pan_x: self.pan_x,
            pan_y: self.pan_y,
            scale: self.scale,
        }
    }

    pub fn screen_delta_to_scene(&self, dx: f32, dy: f32) -> (f32, f32) {
        (dx / self.scale, dy / self.scale)
    }

    pub fn screen_to_scene(&self, x: f32, y: f32) -> (f32, f32) {
        ((x - self.pan_x) / self.scale, (y - self.pan_y) / self.scale)
    }

    pub fn scene_to_screen(&self, x: f32, y: f32) -> (f32, f32) {
        (x * self.scale + self.pan_x, y * self.scale + self.pan_y)
    }

    // ─── Zoom ────────────────────────────────────────────────────────────

    pub fn set_scale(&mut self, scale: f32) -> f32 {
        self.scale = one_decimal(scale.clamp(self.zoom.min, self.zoom.max));
        self.scale
    }

    pub fn zoom_in(&mut self) -> f32 {
        self.set_scale(self.scale + self.zoom.step)
    }

    pub fn zoom_out(&mut self) -> f32 {
        self.set_scale(self.scale - self.zoom.step)
    }

    pub fn reset_zoom(&mut self) -> f32 {
        self.set_scale(1.0)
    }

    // ─── Pan ─────────────────────────────────────────────────────────────

    pub fn begin_pan(&mut self, x: f32, y: f32) {
        self.pan_anchor = Some((x - self.pan_x, y - self.pan_y));
    }

    /// Returns `false` when no pan is in progress.
    pub fn update_pan(&mut self, x: f32, y: f32) -> bool {
        let Some((ax, ay)) = self.pan_anchor else {
            return false;
        };
        self.pan_x = x - ax;
        self.pan_y = y - ay;
        log::trace!("pan -> ({}, {})", self.pan_x, self.pan_y);
        true
    }

    pub fn end_pan(&mut self) {
        self.pan_anchor = None;
    }

    pub fn is_panning(&self) -> bool {
        self.pan_anchor.is_some()
    }
}

impl Default for ViewportController {
    fn default() -> Self {
        Self::new(ZoomConfig::default())
    }
}
