//! Cursor position tracking and navigation for the focused entry.
//!
//! `CursorState` owns the cursor byte offset and the entry's internal scroll.
//! All methods take the entry text explicitly; the text itself lives in the
//! core `App`.

use super::text_wrap::{
    LEFT_OFFSET, MAX_VISIBLE_LINES, TOP_OFFSET, floor_char_boundary, inner_width, line_index,
    line_spans,
};
use ratatui::layout::Rect;
use unicode_width::UnicodeWidthStr;

pub(super) struct CursorState {
    /// Cursor position as byte offset in the entry (0..=text.len())
    pub pos: usize,
    /// First visible wrapped line when the entry is taller than its box
    pub scroll_offset: u16,
}

impl CursorState {
    pub fn new() -> Self {
        Self {
            pos: 0,
            scroll_offset: 0,
        }
    }

    /// Place the cursor at the end of `text` (used when focus moves).
    pub fn move_to_end(&mut self, text: &str) {
        self.pos = text.len();
        self.scroll_offset = 0;
    }

    /// Keep the cursor on a valid char boundary after the text changed elsewhere.
    pub fn clamp(&mut self, text: &str) {
        self.pos = floor_char_boundary(text, self.pos);
    }

    /// Move cursor one wrapped line up (`direction < 0`) or down, keeping the
    /// display column where possible.
    ///
    /// Returns `false` if already on the first/last line.
    pub fn move_vertically(&mut self, text: &str, direction: i16, area_width: u16) -> bool {
        let spans = line_spans(text, inner_width(area_width));
        let current = line_index(&spans, self.pos);

        let target = if direction < 0 {
            match current.checked_sub(1) {
                Some(t) => t,
                None => return false,
            }
        } else if current + 1 < spans.len() {
            current + 1
        } else {
            return false;
        };

        let column = self.pos - spans[current].start;
        let target_span = spans[target];
        self.pos = floor_char_boundary(text, target_span.start + column.min(target_span.len));
        true
    }

    /// Wrapped line (0-based) the cursor is on.
    pub fn calculate_line(&self, text: &str, area_width: u16) -> u16 {
        let spans = line_spans(text, inner_width(area_width));
        line_index(&spans, self.pos) as u16
    }

    /// Update scroll offset to keep the cursor visible inside the entry box.
    pub fn update_scroll_offset(&mut self, text: &str, area_width: u16) {
        let cursor_line = self.calculate_line(text, area_width);

        if cursor_line < self.scroll_offset {
            self.scroll_offset = cursor_line;
        } else if cursor_line >= self.scroll_offset + MAX_VISIBLE_LINES {
            self.scroll_offset = cursor_line.saturating_sub(MAX_VISIBLE_LINES - 1);
        }
    }

    /// Screen position (column, row) of the cursor inside an entry box at `area`.
    pub fn screen_pos(&self, text: &str, area: Rect) -> (u16, u16) {
        let spans = line_spans(text, inner_width(area.width));
        let line = line_index(&spans, self.pos);

        let line_start = spans[line].start.min(self.pos);
        let column = text[line_start..self.pos].width() as u16;
        let visible_line = (line as u16).saturating_sub(self.scroll_offset);

        (
            area.x + LEFT_OFFSET + column,
            area.y + TOP_OFFSET + visible_line,
        )
    }
}
