//! Grid snapping and size clamping.
//!
//! Every geometry mutation that ends a session funnels through `snap` and
//! `clamp_size`, so stored geometry is always grid-aligned and never smaller
//! than the minimum shape size. Intermediate pointer-move positions are left
//! unsnapped for smooth feedback.

use crate::config::GridConfig;

/// Grid unit with the default configuration.
pub const GRID_UNIT: f32 = 10.0;

/// Minimum shape width/height with the default configuration.
pub const MIN_SIZE: f32 = 20.0;

/// `round(v / 10) * 10`.
pub fn snap(v: f32) -> f32 {
    GridConfig::default().snap(v)
}

/// `(max(20, snap(w)), max(20, snap(h)))`.
pub fn clamp_size(w: f32, h: f32) -> (f32, f32) {
    GridConfig::default().clamp_size(w, h)
}

impl GridConfig {
    pub fn snap(&self, v: f32) -> f32 {
        (v / self.unit).round() * self.unit
    }

    pub fn clamp_size(&self, w: f32, h: f32) -> (f32, f32) {
        (
            self.snap(w).max(self.min_size),
            self.snap(h).max(self.min_size),
        )
    }

    /// Round up to the next grid line. Values within float noise of a
    /// line stay on it.
    pub fn snap_up(&self, v: f32) -> f32 {
        (v / self.unit - 1e-4).ceil() * self.unit
    }

    /// Grid-align a text box without cutting into its content: both sides
    /// round up, then the text floor applies.
    pub fn fit_text_size(&self, w: f32, h: f32, min_w: f32, min_h: f32) -> (f32, f32) {
        (
            self.snap_up(w).max(self.min_size).max(min_w),
            self.snap_up(h).max(self.min_size).max(min_h),
        )
    }

    pub fn is_aligned(&self, v: f32) -> bool {
        (v / self.unit).fract() == 0.0
    }
}
