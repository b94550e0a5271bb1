//! # TriagePanel Component
//!
//! Lower half of the screen: the outcome of the latest submission.
//!
//! Exactly one of these is shown, in priority order:
//!
//! 1. **Error**: red bordered block with the user-facing error line
//! 2. **Result**: heading, a 2×2 tile grid (Intent, Sentiment, Priority,
//!    Confidence), Summary, Suggested reply, Tags and Recommended actions
//! 3. **In flight**: "Calling Gemini…"
//! 4. **Idle**: a short hint
//!
//! The result and the error are laid out on a virtual canvas inside a
//! `ScrollView`, so long replies and error bodies scroll with PageUp/PageDown.
//! Each text block is capped at `MAX_SECTION_HEIGHT` rows, which keeps the
//! canvas within `u16` whatever the service sends back.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `TriagePanelState` lives in `TuiState` (scroll offset)
//! - `TriagePanel` is created per frame with borrowed props

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::triage::TriageResult;
use crate::tui::component::Component;
use crate::tui::event::TuiEvent;

const HEADING_HEIGHT: u16 = 2;
const TILE_HEIGHT: u16 = 4;
/// Rows a single text block may occupy on the canvas; anything past this is clipped.
const MAX_SECTION_HEIGHT: u16 = 2000;
const IDLE_HINT: &str = "Add the customer's messages above and press Enter to triage.";

/// Persistent scroll state for the result canvas.
#[derive(Default)]
pub struct TriagePanelState {
    pub scroll_state: ScrollViewState,
}

impl TriagePanelState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scroll on PageUp/PageDown. Returns `true` if the event was consumed.
    pub fn handle_event(&mut self, event: &TuiEvent) -> bool {
        match event {
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                true
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                true
            }
            _ => false,
        }
    }

    /// Jump back to the top (a new result arrived).
    pub fn reset(&mut self) {
        self.scroll_state.scroll_to_top();
    }

    fn clamp_scroll(&mut self, content_height: u16, viewport_height: u16) {
        let max = content_height.saturating_sub(viewport_height);
        let offset = self.scroll_state.offset();
        if offset.y > max {
            self.scroll_state.set_offset(Position { x: 0, y: max });
        }
    }
}

/// Transient wrapper pairing the panel state with its props.
pub struct TriagePanel<'a> {
    state: &'a mut TriagePanelState,
    error: Option<&'a str>,
    result: Option<&'a TriageResult>,
    submitting: bool,
}

impl<'a> TriagePanel<'a> {
    pub fn new(
        state: &'a mut TriagePanelState,
        error: Option<&'a str>,
        result: Option<&'a TriageResult>,
        submitting: bool,
    ) -> Self {
        Self {
            state,
            error,
            result,
            submitting,
        }
    }

    fn render_error(&mut self, frame: &mut Frame, area: Rect, message: &str) {
        let red = Style::default().fg(Color::Red);
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(red)
            .title(" Error ")
            .title_style(red.add_modifier(Modifier::BOLD))
            .padding(Padding::horizontal(1));
        let paragraph = Paragraph::new(message)
            .style(red)
            .wrap(Wrap { trim: true })
            .block(block);

        // One column is reserved for the scrollbar.
        let width = area.width.saturating_sub(1);
        let height = section_height(&paragraph, width);
        self.state.clamp_scroll(height, area.height);

        let mut scroll_view = ScrollView::new(Size::new(width, height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(paragraph, Rect::new(0, 0, width, height));
        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }

    fn render_placeholder(frame: &mut Frame, area: Rect, text: &str) {
        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::DarkGray))
            .wrap(Wrap { trim: true })
            .block(Block::default().padding(Padding::uniform(1)));
        frame.render_widget(paragraph, area);
    }

    fn render_result(&mut self, frame: &mut Frame, area: Rect, result: &TriageResult) {
        // One column is reserved for the scrollbar.
        let width = area.width.saturating_sub(1);
        let sections = text_sections(result);
        let section_heights: Vec<u16> = sections
            .iter()
            .map(|p| section_height(p, width))
            .collect();
        let total_height = section_heights
            .iter()
            .fold(HEADING_HEIGHT + 2 * TILE_HEIGHT, |acc, h| acc.saturating_add(*h));

        self.state.clamp_scroll(total_height, area.height);

        let mut scroll_view = ScrollView::new(Size::new(width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let heading = Paragraph::new(Line::from(Span::styled(
            "Triage Summary",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        scroll_view.render_widget(heading, Rect::new(0, 0, width, 1));

        let confidence = result.confidence_label();
        let tiles = [
            ("Intent", result.intent.as_str()),
            ("Sentiment", result.sentiment.as_str()),
            ("Priority", result.priority.as_str()),
            ("Confidence", confidence.as_str()),
        ];
        for (i, (label, value)) in tiles.iter().enumerate() {
            let rect = tile_rect(i, width, HEADING_HEIGHT);
            scroll_view.render_widget(tile(label, value), rect);
        }

        let mut y = HEADING_HEIGHT + 2 * TILE_HEIGHT;
        for (paragraph, height) in sections.into_iter().zip(section_heights) {
            scroll_view.render_widget(paragraph, Rect::new(0, y, width, height));
            y = y.saturating_add(height);
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

impl Component for TriagePanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        if let Some(message) = self.error {
            self.render_error(frame, area, message);
        } else if let Some(result) = self.result {
            self.render_result(frame, area, result);
        } else if self.submitting {
            Self::render_placeholder(frame, area, "Calling Gemini…");
        } else {
            Self::render_placeholder(frame, area, IDLE_HINT);
        }
    }
}

/// Rendered height of a block at `width`, capped at `MAX_SECTION_HEIGHT`.
fn section_height(paragraph: &Paragraph, width: u16) -> u16 {
    u16::try_from(paragraph.line_count(width))
        .unwrap_or(u16::MAX)
        .min(MAX_SECTION_HEIGHT)
}

/// Rect of tile `index` in a two-column grid starting at row `top`.
fn tile_rect(index: usize, width: u16, top: u16) -> Rect {
    let half = width / 2;
    let column = (index % 2) as u16;
    let row = (index / 2) as u16;
    let x = column * half;
    let w = if column == 0 { half } else { width - half };
    Rect::new(x, top + row * TILE_HEIGHT, w, TILE_HEIGHT)
}

fn tile<'a>(label: &'a str, value: &'a str) -> Paragraph<'a> {
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray))
        .padding(Padding::horizontal(1))
        .title(Span::styled(label, Style::default().fg(Color::Gray)));
    Paragraph::new(Line::from(Span::styled(
        value,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )))
    .wrap(Wrap { trim: true })
    .block(block)
}

fn section<'a>(title: &'a str, lines: Vec<Line<'a>>) -> Paragraph<'a> {
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray))
        .padding(Padding::horizontal(1))
        .title(Span::styled(
            format!(" {title} "),
            Style::default().add_modifier(Modifier::BOLD),
        ));
    Paragraph::new(lines).wrap(Wrap { trim: false }).block(block)
}

/// Text blocks below the tiles, in display order. Optional lists only
/// appear when they have at least one item.
fn text_sections(result: &TriageResult) -> Vec<Paragraph<'_>> {
    let mut sections = vec![
        section("Summary", result.summary.lines().map(Line::from).collect()),
        section(
            "Suggested reply",
            result.suggested_reply.lines().map(Line::from).collect(),
        ),
    ];

    if let Some(tags) = result.listed_tags() {
        sections.push(section("Tags", vec![Line::from(tags.join(", "))]));
    }

    if let Some(actions) = result.listed_actions() {
        let bullets = actions
            .iter()
            .map(|action| Line::from(format!("• {action}")))
            .collect();
        sections.push(section("Recommended actions", bullets));
    }

    sections
}
