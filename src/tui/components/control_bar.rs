//! # ControlBar Component
//!
//! Single-line row of key hints below the editor. The submit hint doubles as
//! the submit control's label: it reads "Calling Gemini…" and is dimmed while
//! a request is in flight, and the remove hint is only offered when more than
//! one entry exists.

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

pub struct ControlBar {
    pub submitting: bool,
    pub can_remove: bool,
}

impl ControlBar {
    pub fn new(submitting: bool, can_remove: bool) -> Self {
        Self {
            submitting,
            can_remove,
        }
    }

    /// Label of the submit control.
    pub fn submit_label(&self) -> &'static str {
        if self.submitting {
            "Calling Gemini…"
        } else {
            "[Enter] Triage with Gemini"
        }
    }

    fn spans(&self) -> Vec<Span<'static>> {
        let key = Style::default().fg(Color::Cyan);
        let hint = Style::default().fg(Color::DarkGray);
        let separator = Span::styled("  ", hint);

        let submit_style = if self.submitting {
            Style::default().fg(Color::Gray).add_modifier(Modifier::DIM)
        } else {
            key.add_modifier(Modifier::BOLD)
        };

        let mut spans = vec![
            Span::styled(self.submit_label(), submit_style),
            separator.clone(),
            Span::styled("[Ctrl+N] Add message", key),
        ];
        if self.can_remove {
            spans.push(separator.clone());
            spans.push(Span::styled("[Ctrl+D] Remove", key));
        }
        spans.push(separator.clone());
        spans.push(Span::styled("[Tab] Next", hint));
        spans.push(separator);
        spans.push(Span::styled("[Esc] Quit", hint));
        spans
    }
}

impl Component for ControlBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Line::from(self.spans()), area);
    }
}
