use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{
    ConfigNotice, ControlBar, MessageEditor, NOTICE_HEIGHT, TitleBar, TriagePanel,
};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

/// Screen regions, top to bottom. `notice` is only present while the
/// service URL is unset.
struct Regions {
    title: Rect,
    notice: Option<Rect>,
    editor: Rect,
    controls: Rect,
    panel: Rect,
}

fn layout(area: Rect, configured: bool) -> Regions {
    use Constraint::{Length, Min, Percentage};

    if configured {
        let [title, editor, controls, panel] =
            Layout::vertical([Length(1), Percentage(45), Length(1), Min(5)]).areas(area);
        Regions {
            title,
            notice: None,
            editor,
            controls,
            panel,
        }
    } else {
        let [title, notice, editor, controls, panel] = Layout::vertical([
            Length(1),
            Length(NOTICE_HEIGHT),
            Percentage(40),
            Length(1),
            Min(5),
        ])
        .areas(area);
        Regions {
            title,
            notice: Some(notice),
            editor,
            controls,
            panel,
        }
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    let regions = layout(frame.area(), app.is_configured());

    let endpoint = app.base_url.as_deref().filter(|_| app.is_configured());
    TitleBar::new(endpoint, &app.status_message).render(frame, regions.title);

    if let Some(area) = regions.notice {
        ConfigNotice.render(frame, area);
    }

    MessageEditor::new(
        &mut tui.editor,
        &app.messages,
        app.can_remove(),
        app.is_submitting,
    )
    .render(frame, regions.editor);

    ControlBar::new(app.is_submitting, app.can_remove()).render(frame, regions.controls);

    TriagePanel::new(
        &mut tui.triage_panel,
        app.error.as_deref(),
        app.result.as_ref(),
        app.is_submitting,
    )
    .render(frame, regions.panel);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_result, test_app};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(app: &App) -> String {
        let mut tui = TuiState::new();
        let mut terminal = Terminal::new(TestBackend::new(100, 50)).unwrap();
        terminal.draw(|f| draw_ui(f, app, &mut tui)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_configured_panel_has_no_notice() {
        let app = test_app();
        let text = draw(&app);

        assert!(text.contains("endpoint: http://triage.test"));
        assert!(text.contains("Message 1"));
        assert!(text.contains("Message 2"));
        assert!(text.contains("Triage with Gemini"));
        assert!(!text.contains("SUPPORT_COPILOT_URL"));
    }

    #[test]
    fn test_unconfigured_panel_shows_notice() {
        let app = App::new(None, vec![String::new()]);
        let text = draw(&app);

        assert!(text.contains("(not configured)"));
        assert!(text.contains("Set SUPPORT_COPILOT_URL before using the demo."));
        assert!(text.contains("Customer message..."));
    }

    #[test]
    fn test_result_is_drawn_below_editor() {
        let mut app = test_app();
        app.result = Some(sample_result());
        let text = draw(&app);

        assert!(text.contains("Triage Summary"));
        assert!(text.contains("87%"));
    }

    #[test]
    fn test_layout_regions_stack_vertically() {
        let regions = layout(Rect::new(0, 0, 80, 40), false);
        let notice = regions.notice.unwrap();

        assert_eq!(regions.title.y, 0);
        assert_eq!(notice.y, 1);
        assert_eq!(notice.height, NOTICE_HEIGHT);
        assert!(regions.editor.y > notice.y);
        assert!(regions.controls.y > regions.editor.y);
        assert!(regions.panel.y > regions.controls.y);
    }
}
