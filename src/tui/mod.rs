//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the panel,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Flow
//!
//! ```text
//! crossterm ─▶ TuiEvent ─▶ component ─▶ Action ─▶ update() ─▶ Effect
//!                                                               │
//!        mpsc::Receiver ◀── tokio task (HTTP) ◀── SpawnTriage ──┘
//! ```
//!
//! The loop sleeps up to 250ms waiting for input, drains every pending event
//! before drawing, then applies completions that background tasks sent
//! through the channel.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use tokio::task::AbortHandle;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::triage::{HttpTriageClient, TicketPayload, TriageError, TriageService};
use crate::tui::component::EventHandler;
use crate::tui::components::{EditorEvent, MessageEditor, MessageEditorState, TriagePanelState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const POLL_TIMEOUT: Duration = Duration::from_millis(250);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub editor: MessageEditorState,
    pub triage_panel: TriagePanelState,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            editor: MessageEditorState::new(),
            triage_panel: TriagePanelState::new(),
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol allows Shift+Enter detection; terminals
        // without support ignore it
        execute!(
            stdout(),
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Build the HTTP client for a configured base URL.
pub fn build_service(config: &ResolvedConfig) -> Option<Arc<dyn TriageService>> {
    config
        .base_url
        .as_deref()
        .filter(|url| !url.is_empty())
        .map(|url| Arc::new(HttpTriageClient::new(url)) as Arc<dyn TriageService>)
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let service = build_service(&config);
    let mut app = App::from_config(&config);
    let mut tui = TuiState::new();
    tui.editor.sync(&app.messages);

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Completions from background tasks
    let (tx, rx) = mpsc::channel();
    let mut in_flight: Option<AbortHandle> = None;
    let mut needs_redraw = true;

    loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let first_event = poll_event_timeout(POLL_TIMEOUT);
        if first_event.is_some() {
            needs_redraw = true;
        }

        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match dispatch_event(&mut app, &mut tui, &event) {
                Effect::Quit => {
                    should_quit = true;
                    break;
                }
                Effect::SpawnTriage { attempt, payload } => match &service {
                    Some(service) => {
                        in_flight = Some(spawn_triage(
                            service.clone(),
                            attempt,
                            payload,
                            tx.clone(),
                        ));
                    }
                    None => {
                        warn!("Submit accepted without a configured service");
                        update(
                            &mut app,
                            Action::TriageFailed {
                                attempt,
                                error: TriageError::ConfigurationMissing,
                            },
                        );
                    }
                },
                Effect::None => {}
            }
        }

        if should_quit {
            break;
        }

        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            apply_completion(&mut app, &mut tui, action);
            if !app.is_submitting {
                in_flight = None;
            }
        }
    }

    if let Some(handle) = in_flight.take() {
        info!("Aborting in-flight triage request on exit");
        handle.abort();
    }

    ratatui::restore();
    Ok(())
}

/// Route one terminal event: quits go to the core, page keys scroll the
/// result, everything else goes through the editor.
fn dispatch_event(app: &mut App, tui: &mut TuiState, event: &TuiEvent) -> Effect {
    match event {
        TuiEvent::ForceQuit | TuiEvent::Quit => update(app, Action::Quit),
        TuiEvent::Resize => Effect::None,
        TuiEvent::ScrollPageUp | TuiEvent::ScrollPageDown => {
            tui.triage_panel.handle_event(event);
            Effect::None
        }
        _ => {
            let editor_event = MessageEditor::new(
                &mut tui.editor,
                &app.messages,
                app.can_remove(),
                app.is_submitting,
            )
            .handle_event(event);

            match editor_event {
                Some(EditorEvent::Edit { index, text }) => {
                    update(app, Action::UpdateMessage { index, text })
                }
                Some(EditorEvent::Add) => {
                    let effect = update(app, Action::AddMessage);
                    tui.editor.focus(&app.messages, app.messages.len() - 1);
                    effect
                }
                Some(EditorEvent::Remove(index)) => {
                    let effect = update(app, Action::RemoveMessage(index));
                    tui.editor.sync(&app.messages);
                    effect
                }
                Some(EditorEvent::Submit) => update(app, Action::Submit),
                Some(EditorEvent::Navigated) | None => Effect::None,
            }
        }
    }
}

/// Apply a completion from a background task. The result panel scrolls back
/// to the top only when `update` accepted a new result.
fn apply_completion(app: &mut App, tui: &mut TuiState, action: Action) {
    let is_success = matches!(action, Action::TriageSucceeded { .. });
    let was_in_flight = app.is_submitting;
    update(app, action);
    if is_success && was_in_flight && !app.is_submitting {
        tui.triage_panel.reset();
    }
}

fn spawn_triage(
    service: Arc<dyn TriageService>,
    attempt: u64,
    payload: TicketPayload,
    tx: mpsc::Sender<Action>,
) -> AbortHandle {
    info!(
        "Spawning triage request #{} ({} messages) to {}",
        attempt,
        payload.messages.len(),
        service.endpoint()
    );

    let handle = tokio::spawn(async move {
        let action = match service.triage(&payload).await {
            Ok(result) => {
                info!("Triage #{} succeeded: intent={}", attempt, result.intent);
                Action::TriageSucceeded { attempt, result }
            }
            Err(error) => {
                warn!("Triage #{} failed: {}", attempt, error);
                Action::TriageFailed { attempt, error }
            }
        };
        if tx.send(action).is_err() {
            warn!("Failed to deliver triage #{} result: receiver dropped", attempt);
        }
    });

    handle.abort_handle()
}
