use ratatui::Frame;
use ratatui::layout::Rect;

use super::event::TuiEvent;

/// Something that can draw itself into a region of the frame.
///
/// Props are struct fields; stateful components borrow their persistent
/// state (`&mut FooState`) so `render` can update scroll offsets and
/// cursor placement while drawing.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that turns raw `TuiEvent`s into its own higher-level events.
pub trait EventHandler {
    type Event;

    /// `None` means the event was not for this component.
    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event>;
}
