//! # ConfigNotice Component
//!
//! Persistent banner shown while no triage service URL is configured.
//! Missing configuration is a normal, visible state: the rest of the panel
//! keeps working and submitting reports the same message as an error.

use crate::triage::TriageError;
use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Wrap};

/// Rows needed to draw the notice (borders + two text lines).
pub const NOTICE_HEIGHT: u16 = 4;

pub struct ConfigNotice;

impl Component for ConfigNotice {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let yellow = Style::default().fg(Color::Yellow);
        let lines = vec![
            Line::from(Span::styled(
                TriageError::ConfigurationMissing.to_string(),
                yellow.add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Use the environment (or .env), --url, or base_url in ~/.support-copilot/config.toml.",
                Style::default().fg(Color::Gray),
            )),
        ];
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(yellow)
            .padding(Padding::horizontal(1))
            .title(" Not configured ");
        frame.render_widget(
            Paragraph::new(lines).wrap(Wrap { trim: true }).block(block),
            area,
        );
    }
}
