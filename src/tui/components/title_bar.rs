//! # TitleBar Component
//!
//! Single-line header showing the configured endpoint and the latest status.
//!
//! Purely presentational: all data arrives as props and the bar holds no
//! state of its own.
//!
//! 1. **Configured**: `"Support Copilot (endpoint: http://...) | Ready"`
//! 2. **Not configured**: `"Support Copilot (not configured) | Ready"`
//! 3. **No status**: the `| ...` suffix is omitted

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

/// Top status bar component.
pub struct TitleBar<'a> {
    /// Triage service base URL, `None` when unset
    pub endpoint: Option<&'a str>,
    /// Status message (e.g. "Ready", "Calling Gemini…")
    pub status_message: &'a str,
}

impl<'a> TitleBar<'a> {
    pub fn new(endpoint: Option<&'a str>, status_message: &'a str) -> Self {
        Self {
            endpoint,
            status_message,
        }
    }

    fn title_text(&self) -> String {
        let target = match self.endpoint {
            Some(url) => format!("(endpoint: {})", url),
            None => String::from("(not configured)"),
        };
        if self.status_message.is_empty() {
            format!("Support Copilot {}", target)
        } else {
            format!("Support Copilot {} | {}", target, self.status_message)
        }
    }
}

impl Component for TitleBar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(Span::styled(
            self.title_text(),
            Style::default().add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(line, area);
    }
}
