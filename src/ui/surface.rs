//! Presentation state of the editing area.
//!
//! [`EditorSurface`] owns everything about how the buffer is shown, nothing
//! about what it contains: the scroll window, the horizontal pan, the
//! line-number gutter geometry and the zoom level. The controller drives it;
//! rendering only reads it.

use unicode_width::UnicodeWidthChar;

use crate::settings::{MAX_FONT_SIZE, MIN_FONT_SIZE};
use crate::ui::viewport::Viewport;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSurface {
    pub viewport: Viewport,
    /// Horizontal pan, in display columns.
    col_offset: usize,
    font_size: u16,
    base_font_size: u16,
}

impl EditorSurface {
    pub const fn new(width: u16, height: u16, total_lines: usize, font_size: u16) -> Self {
        Self {
            viewport: Viewport::new(width, height, total_lines),
            col_offset: 0,
            font_size,
            base_font_size: font_size,
        }
    }

    pub const fn col_offset(&self) -> usize {
        self.col_offset
    }

    /// Width of the line-number gutter for the current buffer, including a
    /// single space of separation.
    pub fn gutter_width(&self, total_lines: usize) -> u16 {
        let mut digits: u16 = 1;
        let mut max = total_lines.max(1);
        while max >= 10 {
            max /= 10;
            digits += 1;
        }
        digits + 1
    }

    /// Columns left for text once the gutter is taken out.
    pub fn text_width(&self, total_lines: usize) -> u16 {
        self.viewport
            .width()
            .saturating_sub(self.gutter_width(total_lines))
            .max(1)
    }

    /// Scroll both axes so the cursor stays in view.
    pub fn ensure_cursor_visible(&mut self, line: usize, display_col: usize, total_lines: usize) {
        self.viewport.ensure_visible(line);
        let text_width = self.text_width(total_lines) as usize;
        if display_col < self.col_offset {
            self.col_offset = display_col;
        } else if display_col >= self.col_offset + text_width {
            self.col_offset = display_col + 1 - text_width;
        }
    }

    /// Reset scrolling to the origin (fresh document).
    pub const fn reset_scroll(&mut self) {
        self.viewport.go_to_top();
        self.col_offset = 0;
    }

    // --- Zoom ---

    pub const fn font_size(&self) -> u16 {
        self.font_size
    }

    pub const fn is_zoomed(&self) -> bool {
        self.font_size != self.base_font_size
    }

    pub fn zoom_in(&mut self) {
        if self.font_size < MAX_FONT_SIZE {
            self.font_size += 1;
        }
    }

    pub fn zoom_out(&mut self) {
        if self.font_size > MIN_FONT_SIZE {
            self.font_size -= 1;
        }
    }

    pub const fn reset_zoom(&mut self) {
        self.font_size = self.base_font_size;
    }

    /// Adopt a new preferred font size (settings change), dropping any zoom.
    pub const fn set_base_font_size(&mut self, size: u16) {
        self.base_font_size = size;
        self.font_size = size;
    }
}

/// Display-column position of a byte offset within a line.
pub fn display_col(line: &str, byte_col: usize) -> usize {
    let byte_col = byte_col.min(line.len());
    line[..byte_col]
        .chars()
        .map(|c| c.width().unwrap_or(0))
        .sum()
}
