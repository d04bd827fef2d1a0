//! Text flow: wrap text into lines and size a box around it.
//!
//! Exact glyph metrics are not available at layout time, so every glyph is
//! assumed to be `font_size × glyph_ratio` wide. Sizing is a two-pass
//! fixed point: wrap against the current width, derive the width from the
//! longest resulting line, wrap once more against that width. It is never
//! iterated to convergence, so width and wrap count cannot oscillate.

use crate::config::TextFlowConfig;

/// Result of flowing a string into a box.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    pub lines: Vec<String>,
    pub width: f32,
    pub height: f32,
}

/// Text measurement with a fixed font size.
#[derive(Debug, Clone, Copy)]
pub struct TextFlow<'a> {
    config: &'a TextFlowConfig,
    font_size: f32,
}

impl<'a> TextFlow<'a> {
    pub fn new(config: &'a TextFlowConfig, font_size: f32) -> Self {
        Self { config, font_size }
    }

    pub fn glyph_width(&self) -> f32 {
        self.font_size * self.config.glyph_ratio
    }

    pub fn line_height(&self) -> f32 {
        self.font_size * self.config.line_height_ratio
    }

    /// How many characters fit on one line of a box `width` wide.
    pub fn capacity(&self, width: f32) -> usize {
        let inner = width - 2.0 * self.config.padding;
        // Widths derived from a line length must fit that same line again.
        ((inner / self.glyph_width() + 1e-3).floor() as isize).max(1) as usize
    }

    /// Two-pass sizing for a live text box.
    ///
    /// `current_width` is the box's width before this keystroke; the result
    /// never goes below `min_width` × `min_height`.
    pub fn fit(&self, text: &str, current_width: f32, min_width: f32, min_height: f32) -> TextLayout {
        let first = wrap_text(text, self.capacity(current_width.max(min_width)));
        let longest = longest_line(&first);
        let width = (longest as f32 * self.glyph_width() + 2.0 * self.config.padding).max(min_width);

        let lines = wrap_text(text, self.capacity(width));
        let height = self.height_for(lines.len(), min_height);
        log::trace!(
            "text flow: {} chars -> {} lines, {width:.1}x{height:.1}",
            text.chars().count(),
            lines.len()
        );
        TextLayout {
            lines,
            width,
            height,
        }
    }

    /// Wrap against a width that is not allowed to change.
    pub fn fixed_width(&self, text: &str, width: f32, min_height: f32) -> TextLayout {
        let lines = wrap_text(text, self.capacity(width));
        let height = self.height_for(lines.len(), min_height);
        TextLayout {
            lines,
            width,
            height,
        }
    }

    fn height_for(&self, line_count: usize, min_height: f32) -> f32 {
        (line_count as f32 * self.line_height() + 2.0 * self.config.padding).max(min_height)
    }
}

/// Greedy word wrap.
///
/// Hard line breaks are kept. Within a hard line, words are packed while the
/// line's character count stays within `capacity`; a word longer than
/// `capacity` is placed on a line of its own rather than split. Blank hard
/// lines survive as empty strings.
pub fn wrap_text(text: &str, capacity: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for hard in text.split('\n') {
        let mut current = String::new();
        let mut current_len = 0;
        for word in hard.split_whitespace() {
            let word_len = word.chars().count();
            if current_len == 0 {
                current.push_str(word);
                current_len = word_len;
            } else if current_len + 1 + word_len <= capacity {
                current.push(' ');
                current.push_str(word);
                current_len += 1 + word_len;
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_len = word_len;
            }
        }
        lines.push(current);
    }
    lines
}

fn longest_line(lines: &[String]) -> usize {
    lines.iter().map(|l| l.chars().count()).max().unwrap_or(0)
}

// ─── Object labels ────────────────────────────────────────────────────────

/// Wrapped label of an object box. Object boxes never resize to their label:
/// the font shrinks with the box and overflow lines are dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelLayout {
    pub font_size: f32,
    pub lines: Vec<String>,
}

/// Horizontal inset of an object label.
pub const LABEL_INSET: f32 = 6.0;

/// Extra spacing between object label lines.
pub const LABEL_LINE_GAP: f32 = 2.0;

/// Lay out `content` inside an object box of `w` × `h`.
pub fn wrap_label(content: &str, w: f32, h: f32, config: &TextFlowConfig) -> LabelLayout {
    let font_size = (h / 4.0).floor().clamp(10.0, 24.0);
    let glyph = font_size * config.glyph_ratio;
    let capacity = (((w - 2.0 * LABEL_INSET) / glyph).floor() as isize).max(4) as usize;
    let max_lines = (((h - 8.0) / (font_size + LABEL_LINE_GAP)).floor() as isize).max(1) as usize;

    // Labels flow as one paragraph.
    let flat = content.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut lines = wrap_text(&flat, capacity);
    lines.truncate(max_lines);
    LabelLayout { font_size, lines }
}
