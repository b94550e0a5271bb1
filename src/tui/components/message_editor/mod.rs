//! # MessageEditor Component
//!
//! Ordered list of editable customer messages.
//!
//! ## Responsibilities
//!
//! - Render one bordered box per entry, focused entry highlighted
//! - Edit the focused entry (typing, paste, backspace/delete, cursor movement)
//! - Move focus between entries (Tab / Shift+Tab, or Up/Down at an edge)
//! - Request add (Ctrl+N), remove (Ctrl+D) and submit (Enter)
//!
//! ## State Management
//!
//! Entry text is owned by the core `App`; this component never mutates it.
//! Edits are emitted as `EditorEvent::Edit` with the full new text and the
//! parent routes them through `update()`. Focus, cursor and list scroll are
//! presentation state in `MessageEditorState`.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `MessageEditorState` lives in `TuiState`
//! - `MessageEditor` is created per frame/event with borrowed props

mod cursor;
mod text_wrap;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use cursor::CursorState;
use text_wrap::{
    MAX_VISIBLE_LINES, VERTICAL_OVERHEAD, inner_width, line_spans, next_char_boundary,
    prev_char_boundary, wrap_line_count,
};

const PLACEHOLDER: &str = "Customer message...";

/// High-level events emitted by the editor
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// Entry `index` now reads `text`.
    Edit { index: usize, text: String },
    Add,
    Remove(usize),
    Submit,
    /// Focus or cursor moved; nothing for the core to do.
    Navigated,
}

/// Persistent editor presentation state.
pub struct MessageEditorState {
    /// Index of the focused entry
    pub focused: usize,
    /// First entry drawn at the top of the editor area
    pub list_offset: usize,
    cursor: CursorState,
    /// Width of the last rendered entry box (used for vertical cursor movement)
    last_width: u16,
}

impl Default for MessageEditorState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageEditorState {
    const DEFAULT_WIDTH: u16 = 80;

    pub fn new() -> Self {
        Self {
            focused: 0,
            list_offset: 0,
            cursor: CursorState::new(),
            last_width: Self::DEFAULT_WIDTH,
        }
    }

    /// Re-validate focus and cursor against the current entries.
    /// Call after any change the editor didn't originate (e.g. a removal).
    pub fn sync(&mut self, entries: &[String]) {
        if entries.is_empty() {
            self.focused = 0;
            self.cursor.pos = 0;
            return;
        }
        if self.focused >= entries.len() {
            self.focus(entries, entries.len() - 1);
        }
        self.cursor.clamp(&entries[self.focused]);
    }

    /// Move focus to `index`, with the cursor at the end of that entry.
    pub fn focus(&mut self, entries: &[String], index: usize) {
        let Some(text) = entries.get(index) else {
            return;
        };
        self.focused = index;
        self.cursor.move_to_end(text);
    }

    /// Byte offset of the cursor inside the focused entry.
    #[cfg(test)]
    pub fn cursor_pos(&self) -> usize {
        self.cursor.pos
    }
}

/// Transient wrapper pairing the editor state with its props.
pub struct MessageEditor<'a> {
    state: &'a mut MessageEditorState,
    entries: &'a [String],
    /// Whether the remove control is offered (more than one entry)
    can_remove: bool,
    /// Request in flight: submit control disabled
    submitting: bool,
}

impl<'a> MessageEditor<'a> {
    pub fn new(
        state: &'a mut MessageEditorState,
        entries: &'a [String],
        can_remove: bool,
        submitting: bool,
    ) -> Self {
        Self {
            state,
            entries,
            can_remove,
            submitting,
        }
    }

    /// Box height for an entry: wrapped lines clamped to the visible maximum, plus borders.
    fn entry_height(text: &str, width: u16) -> u16 {
        wrap_line_count(text, inner_width(width)).min(MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    /// Adjust `list_offset` so the focused entry is fully inside an area of `height` rows.
    fn scroll_to_focused(&mut self, heights: &[u16], height: u16) {
        let focused = self.state.focused.min(heights.len().saturating_sub(1));
        if focused < self.state.list_offset {
            self.state.list_offset = focused;
        }
        while self.state.list_offset < focused {
            let span: u16 = heights[self.state.list_offset..=focused].iter().sum();
            if span <= height {
                break;
            }
            self.state.list_offset += 1;
        }
    }

    fn edited(&self, text: String) -> Option<EditorEvent> {
        Some(EditorEvent::Edit {
            index: self.state.focused,
            text,
        })
    }

    fn focused_text(&self) -> Option<&'a str> {
        self.entries.get(self.state.focused).map(String::as_str)
    }

    fn visible_text(&self, text: &str, width: u16, scroll_offset: u16) -> String {
        let spans = line_spans(text, inner_width(width));
        let start = (scroll_offset as usize).min(spans.len().saturating_sub(1));
        let end = (start + MAX_VISIBLE_LINES as usize).min(spans.len());
        spans[start..end]
            .iter()
            .map(|span| &text[span.start..span.start + span.len])
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_entry(&mut self, frame: &mut Frame, index: usize, area: Rect) {
        let entries = self.entries;
        let text = &entries[index];
        let is_focused = index == self.state.focused;

        let border_style = if is_focused {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let mut block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .padding(Padding::horizontal(1))
            .title(format!(" Message {} ", index + 1));
        if is_focused {
            block = block.title_style(border_style.add_modifier(Modifier::BOLD));
        }
        if self.can_remove {
            block = block.title(Line::from(" × ").right_aligned());
        }

        let paragraph = if text.is_empty() {
            Paragraph::new(PLACEHOLDER).style(Style::default().fg(Color::DarkGray))
        } else {
            let scroll = if is_focused {
                self.state.cursor.scroll_offset
            } else {
                0
            };
            let style = if is_focused {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::Gray)
            };
            Paragraph::new(self.visible_text(text, area.width, scroll)).style(style)
        };

        frame.render_widget(paragraph.block(block), area);

        if is_focused {
            let (x, y) = self.state.cursor.screen_pos(text, area);
            if x < area.right() && y < area.bottom() {
                frame.set_cursor_position((x, y));
            }
        }
    }
}

impl Component for MessageEditor<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.entries.is_empty() || area.height == 0 {
            return;
        }

        self.state.last_width = area.width;
        if let Some(text) = self.focused_text() {
            self.state.cursor.update_scroll_offset(text, area.width);
        }

        let heights: Vec<u16> = self
            .entries
            .iter()
            .map(|text| Self::entry_height(text, area.width))
            .collect();
        self.scroll_to_focused(&heights, area.height);

        let mut y = area.y;
        for index in self.state.list_offset..self.entries.len() {
            let remaining = area.bottom().saturating_sub(y);
            if remaining <= VERTICAL_OVERHEAD {
                break;
            }
            let height = heights[index].min(remaining);
            self.render_entry(frame, index, Rect::new(area.x, y, area.width, height));
            y += height;
        }
    }
}

impl EventHandler for MessageEditor<'_> {
    type Event = EditorEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        let text = self.focused_text()?;
        let pos = self.state.cursor.pos.min(text.len());

        match event {
            TuiEvent::InputChar(c) => {
                let mut next = text.to_string();
                next.insert(pos, *c);
                self.state.cursor.pos = pos + c.len_utf8();
                self.edited(next)
            }
            TuiEvent::Paste(pasted) => {
                let mut next = text.to_string();
                next.insert_str(pos, pasted);
                self.state.cursor.pos = pos + pasted.len();
                self.edited(next)
            }
            TuiEvent::Backspace => {
                if pos == 0 {
                    return None;
                }
                let prev = prev_char_boundary(text, pos);
                let mut next = text.to_string();
                next.drain(prev..pos);
                self.state.cursor.pos = prev;
                self.edited(next)
            }
            TuiEvent::Delete => {
                if pos >= text.len() {
                    return None;
                }
                let end = next_char_boundary(text, pos);
                let mut next = text.to_string();
                next.drain(pos..end);
                self.edited(next)
            }
            TuiEvent::CursorLeft => (pos > 0).then(|| {
                self.state.cursor.pos = prev_char_boundary(text, pos);
                EditorEvent::Navigated
            }),
            TuiEvent::CursorRight => (pos < text.len()).then(|| {
                self.state.cursor.pos = next_char_boundary(text, pos);
                EditorEvent::Navigated
            }),
            TuiEvent::CursorHome => {
                let line_start = text[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0);
                (pos != line_start).then(|| {
                    self.state.cursor.pos = line_start;
                    EditorEvent::Navigated
                })
            }
            TuiEvent::CursorEnd => {
                let line_end = text[pos..].find('\n').map(|i| pos + i).unwrap_or(text.len());
                (pos != line_end).then(|| {
                    self.state.cursor.pos = line_end;
                    EditorEvent::Navigated
                })
            }
            TuiEvent::CursorUp => {
                let width = self.state.last_width;
                if self.state.cursor.move_vertically(text, -1, width) {
                    Some(EditorEvent::Navigated)
                } else {
                    self.focus_step(-1)
                }
            }
            TuiEvent::CursorDown => {
                let width = self.state.last_width;
                if self.state.cursor.move_vertically(text, 1, width) {
                    Some(EditorEvent::Navigated)
                } else {
                    self.focus_step(1)
                }
            }
            TuiEvent::FocusNext => self.focus_step(1),
            TuiEvent::FocusPrev => self.focus_step(-1),
            TuiEvent::AddEntry => Some(EditorEvent::Add),
            TuiEvent::RemoveEntry => self
                .can_remove
                .then_some(EditorEvent::Remove(self.state.focused)),
            TuiEvent::Submit => (!self.submitting).then_some(EditorEvent::Submit),
            _ => None,
        }
    }
}

impl MessageEditor<'_> {
    fn focus_step(&mut self, direction: i8) -> Option<EditorEvent> {
        let target = if direction < 0 {
            self.state.focused.checked_sub(1)?
        } else {
            let next = self.state.focused + 1;
            if next >= self.entries.len() {
                return None;
            }
            next
        };
        self.state.focus(self.entries, target);
        Some(EditorEvent::Navigated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn entries(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|t| t.to_string()).collect()
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_typing_emits_edit_for_focused_entry() {
        let list = entries(&["ab", "cd"]);
        let mut state = MessageEditorState::new();
        state.focus(&list, 1);

        let mut editor = MessageEditor::new(&mut state, &list, true, false);
        let event = editor.handle_event(&TuiEvent::InputChar('e'));
        assert_eq!(
            event,
            Some(EditorEvent::Edit {
                index: 1,
                text: "cde".to_string()
            })
        );
        assert_eq!(state.cursor_pos(), 3);
    }

    #[test]
    fn test_backspace_and_delete() {
        let list = entries(&["héllo"]);
        let mut state = MessageEditorState::new();
        state.focus(&list, 0);
        state.cursor.pos = 3; // after 'é'

        let mut editor = MessageEditor::new(&mut state, &list, false, false);
        assert_eq!(
            editor.handle_event(&TuiEvent::Backspace),
            Some(EditorEvent::Edit {
                index: 0,
                text: "hllo".to_string()
            })
        );

        state.cursor.pos = 0;
        let mut editor = MessageEditor::new(&mut state, &list, false, false);
        assert_eq!(
            editor.handle_event(&TuiEvent::Delete),
            Some(EditorEvent::Edit {
                index: 0,
                text: "éllo".to_string()
            })
        );
        assert_eq!(state.cursor_pos(), 0);
    }

    #[test]
    fn test_paste_inserts_at_cursor() {
        let list = entries(&["ad"]);
        let mut state = MessageEditorState::new();
        state.cursor.pos = 1;

        let mut editor = MessageEditor::new(&mut state, &list, false, false);
        let event = editor.handle_event(&TuiEvent::Paste("bc".to_string()));
        assert_eq!(
            event,
            Some(EditorEvent::Edit {
                index: 0,
                text: "abcd".to_string()
            })
        );
        assert_eq!(state.cursor_pos(), 3);
    }

    #[test]
    fn test_remove_only_offered_with_multiple_entries() {
        let list = entries(&["only"]);
        let mut state = MessageEditorState::new();
        let mut editor = MessageEditor::new(&mut state, &list, false, false);
        assert_eq!(editor.handle_event(&TuiEvent::RemoveEntry), None);

        let list = entries(&["a", "b"]);
        let mut state = MessageEditorState::new();
        state.focus(&list, 1);
        let mut editor = MessageEditor::new(&mut state, &list, true, false);
        assert_eq!(
            editor.handle_event(&TuiEvent::RemoveEntry),
            Some(EditorEvent::Remove(1))
        );
    }

    #[test]
    fn test_submit_disabled_while_submitting() {
        let list = entries(&["a"]);
        let mut state = MessageEditorState::new();
        let mut editor = MessageEditor::new(&mut state, &list, false, true);
        assert_eq!(editor.handle_event(&TuiEvent::Submit), None);

        let mut editor = MessageEditor::new(&mut state, &list, false, false);
        assert_eq!(editor.handle_event(&TuiEvent::Submit), Some(EditorEvent::Submit));
    }

    #[test]
    fn test_focus_moves_between_entries() {
        let list = entries(&["a", "bb", "ccc"]);
        let mut state = MessageEditorState::new();
        state.focus(&list, 0);

        let mut editor = MessageEditor::new(&mut state, &list, true, false);
        assert_eq!(editor.handle_event(&TuiEvent::FocusNext), Some(EditorEvent::Navigated));
        assert_eq!(state.focused, 1);
        assert_eq!(state.cursor_pos(), 2);

        let mut editor = MessageEditor::new(&mut state, &list, true, false);
        editor.handle_event(&TuiEvent::CursorDown);
        assert_eq!(state.focused, 2);

        let mut editor = MessageEditor::new(&mut state, &list, true, false);
        assert_eq!(editor.handle_event(&TuiEvent::FocusNext), None);
        assert_eq!(state.focused, 2);
    }

    #[test]
    fn test_sync_clamps_focus_after_removal() {
        let mut list = entries(&["a", "b", "c"]);
        let mut state = MessageEditorState::new();
        state.focus(&list, 2);
        list.pop();
        state.sync(&list);
        assert_eq!(state.focused, 1);
        assert_eq!(state.cursor_pos(), 1);
    }

    #[test]
    fn test_render_shows_entries_placeholder_and_remove_marker() {
        let backend = TestBackend::new(50, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        let list = entries(&["Where is my order?", ""]);
        let mut state = MessageEditorState::new();

        terminal
            .draw(|f| {
                MessageEditor::new(&mut state, &list, true, false).render(f, f.area());
            })
            .unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Message 1"));
        assert!(text.contains("Where is my order?"));
        assert!(text.contains("Message 2"));
        assert!(text.contains(PLACEHOLDER));
        assert!(text.contains('×'));
    }

    #[test]
    fn test_render_single_entry_has_no_remove_marker() {
        let backend = TestBackend::new(50, 6);
        let mut terminal = Terminal::new(backend).unwrap();
        let list = entries(&["hello"]);
        let mut state = MessageEditorState::new();

        terminal
            .draw(|f| {
                MessageEditor::new(&mut state, &list, false, false).render(f, f.area());
            })
            .unwrap();

        assert!(!screen_text(&terminal).contains('×'));
    }

    #[test]
    fn test_render_scrolls_to_focused_entry() {
        let backend = TestBackend::new(40, 6);
        let mut terminal = Terminal::new(backend).unwrap();
        let list = entries(&["first", "second", "third"]);
        let mut state = MessageEditorState::new();
        state.focus(&list, 2);

        terminal
            .draw(|f| {
                MessageEditor::new(&mut state, &list, true, false).render(f, f.area());
            })
            .unwrap();

        // Each entry is 3 rows; only two fit, so the list starts at the second.
        assert_eq!(state.list_offset, 1);
        let text = screen_text(&terminal);
        assert!(text.contains("third"));
        assert!(!text.contains("first"));
    }
}
