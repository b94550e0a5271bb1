//! # Actions
//!
//! Everything that can happen in the panel becomes an `Action`.
//! User presses Enter? That's `Action::Submit`.
//! Service responds? That's `Action::TriageSucceeded { .. }`.
//!
//! The `update()` function applies an action to the state and returns the
//! `Effect` the adapter must carry out. No I/O here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::{debug, info, warn};

use crate::core::state::App;
use crate::triage::{TicketPayload, TriageError, TriageResult, sanitize_messages};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Append an empty entry.
    AddMessage,
    /// Replace the entry at `index`.
    UpdateMessage { index: usize, text: String },
    /// Remove the entry at `index`, shifting later entries down.
    RemoveMessage(usize),
    Submit,
    TriageSucceeded { attempt: u64, result: TriageResult },
    TriageFailed { attempt: u64, error: TriageError },
    Quit,
}

/// Side effects requested by `update`, executed by the adapter.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Dispatch exactly one triage request tagged with `attempt`.
    SpawnTriage { attempt: u64, payload: TicketPayload },
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::AddMessage => {
            app.messages.push(String::new());
            Effect::None
        }
        Action::UpdateMessage { index, text } => {
            match app.messages.get_mut(index) {
                Some(entry) => *entry = text,
                None => warn!("Ignoring edit for out-of-range entry {}", index),
            }
            Effect::None
        }
        Action::RemoveMessage(index) => {
            if index < app.messages.len() {
                app.messages.remove(index);
            } else {
                warn!("Ignoring removal of out-of-range entry {}", index);
            }
            Effect::None
        }
        Action::Submit => submit(app),
        Action::TriageSucceeded { attempt, result } => {
            if !accepts_completion(app, attempt) {
                return Effect::None;
            }
            app.is_submitting = false;
            app.error = None;
            app.status_message = format!(
                "Triaged at {}",
                chrono::Local::now().format("%H:%M:%S")
            );
            app.result = Some(result);
            Effect::None
        }
        Action::TriageFailed { attempt, error } => {
            if !accepts_completion(app, attempt) {
                return Effect::None;
            }
            app.is_submitting = false;
            app.result = None;
            app.status_message = String::from("Request failed");
            app.error = Some(error.to_string());
            Effect::None
        }
        Action::Quit => {
            // Anything still in flight resolves into a disposed panel.
            app.is_submitting = false;
            Effect::Quit
        }
    }
}

fn submit(app: &mut App) -> Effect {
    if app.is_submitting {
        debug!("Submit ignored: attempt {} still in flight", app.attempt);
        return Effect::None;
    }

    app.error = None;
    app.result = None;

    if !app.is_configured() {
        return reject(app, TriageError::ConfigurationMissing);
    }

    let sanitized = sanitize_messages(&app.messages);
    if sanitized.is_empty() {
        return reject(app, TriageError::ValidationFailed);
    }

    app.is_submitting = true;
    app.attempt += 1;
    app.status_message = String::from("Calling Gemini…");
    info!(
        "Dispatching triage attempt {} with {} message(s)",
        app.attempt,
        sanitized.len()
    );

    Effect::SpawnTriage {
        attempt: app.attempt,
        payload: TicketPayload::new(&app.ticket, sanitized),
    }
}

/// Local failure: surfaced like any other error, no request is made.
fn reject(app: &mut App, error: TriageError) -> Effect {
    info!("Submission rejected: {}", error);
    app.status_message = String::from("Not submitted");
    app.error = Some(error.to_string());
    Effect::None
}

fn accepts_completion(app: &App, attempt: u64) -> bool {
    if app.is_submitting && attempt == app.attempt {
        return true;
    }
    warn!(
        "Dropping late completion for attempt {} (current {}, in flight: {})",
        attempt, app.attempt, app.is_submitting
    );
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::App;
    use crate::test_support::{sample_result, test_app};
    use crate::triage::Role;

    fn dispatch(app: &mut App) -> (u64, TicketPayload) {
        match update(app, Action::Submit) {
            Effect::SpawnTriage { attempt, payload } => (attempt, payload),
            other => panic!("Expected SpawnTriage, got {other:?}"),
        }
    }

    #[test]
    fn test_add_appends_empty_entry() {
        let mut app = test_app();
        update(&mut app, Action::AddMessage);
        assert_eq!(app.messages.len(), 3);
        assert_eq!(app.messages[2], "");
    }

    #[test]
    fn test_update_replaces_entry() {
        let mut app = test_app();
        update(
            &mut app,
            Action::UpdateMessage {
                index: 1,
                text: String::new(),
            },
        );
        assert_eq!(app.messages[1], "");
        assert_eq!(app.messages.len(), 2);
    }

    #[test]
    fn test_update_out_of_range_is_ignored() {
        let mut app = test_app();
        let before = app.messages.clone();
        update(
            &mut app,
            Action::UpdateMessage {
                index: 9,
                text: "x".to_string(),
            },
        );
        assert_eq!(app.messages, before);
    }

    #[test]
    fn test_remove_shifts_later_entries() {
        let mut app = App::new(
            None,
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
        );
        update(&mut app, Action::RemoveMessage(0));
        assert_eq!(app.messages, vec!["b", "c"]);
    }

    #[test]
    fn test_add_then_remove_last_restores_sequence() {
        let mut app = test_app();
        let before = app.messages.clone();
        update(&mut app, Action::AddMessage);
        let last = app.messages.len() - 1;
        update(&mut app, Action::RemoveMessage(last));
        assert_eq!(app.messages, before);
    }

    #[test]
    fn test_remove_has_no_internal_guard() {
        let mut app = App::new(None, vec!["only".to_string()]);
        assert!(!app.can_remove());
        update(&mut app, Action::RemoveMessage(0));
        assert!(app.messages.is_empty());
    }

    #[test]
    fn test_submit_without_base_url_reports_missing_configuration() {
        let mut app = App::new(None, vec!["hello".to_string()]);
        let effect = update(&mut app, Action::Submit);
        assert_eq!(effect, Effect::None);
        assert!(!app.is_submitting);
        assert_eq!(
            app.error.as_deref(),
            Some("Set SUPPORT_COPILOT_URL before using the demo.")
        );
    }

    #[test]
    fn test_submit_with_blank_entries_fails_validation() {
        let mut app = test_app();
        app.messages = vec!["   ".to_string(), String::new(), "\n".to_string()];
        let effect = update(&mut app, Action::Submit);
        assert_eq!(effect, Effect::None);
        assert!(!app.is_submitting);
        assert_eq!(
            app.error.as_deref(),
            Some("Please provide at least one customer message.")
        );
    }

    #[test]
    fn test_configuration_checked_before_validation() {
        let mut app = App::new(None, vec![String::new()]);
        update(&mut app, Action::Submit);
        assert_eq!(
            app.error.as_deref(),
            Some("Set SUPPORT_COPILOT_URL before using the demo.")
        );
    }

    #[test]
    fn test_submit_builds_sanitized_payload() {
        let mut app = test_app();
        app.messages = vec!["  a  ".to_string(), String::new(), "b".to_string()];
        let (attempt, payload) = dispatch(&mut app);

        assert_eq!(attempt, 1);
        assert!(app.is_submitting);
        assert_eq!(payload.ticket_id, "demo-ticket");
        assert_eq!(payload.language, "en");
        assert_eq!(payload.channel.as_deref(), Some("email"));
        let texts: Vec<&str> = payload.messages.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b"]);
        assert!(payload.messages.iter().all(|m| m.role == Role::Customer));
        // Entries themselves are left as typed.
        assert_eq!(app.messages[0], "  a  ");
    }

    #[test]
    fn test_submit_while_in_flight_is_ignored() {
        let mut app = test_app();
        let (attempt, _) = dispatch(&mut app);
        let effect = update(&mut app, Action::Submit);
        assert_eq!(effect, Effect::None);
        assert_eq!(app.attempt, attempt);
        assert!(app.is_submitting);
    }

    #[test]
    fn test_editing_allowed_while_in_flight() {
        let mut app = test_app();
        dispatch(&mut app);
        update(&mut app, Action::AddMessage);
        assert_eq!(app.messages.len(), 3);
        assert!(app.is_submitting);
    }

    #[test]
    fn test_success_stores_result_and_clears_flag() {
        let mut app = test_app();
        let (attempt, _) = dispatch(&mut app);
        update(
            &mut app,
            Action::TriageSucceeded {
                attempt,
                result: sample_result(),
            },
        );
        assert!(!app.is_submitting);
        assert!(app.error.is_none());
        assert_eq!(app.result, Some(sample_result()));
        assert!(app.status_message.starts_with("Triaged at"));
    }

    #[test]
    fn test_failure_sets_error_and_clears_flag() {
        let mut app = test_app();
        let (attempt, _) = dispatch(&mut app);
        update(
            &mut app,
            Action::TriageFailed {
                attempt,
                error: TriageError::request_failed(503, String::new()),
            },
        );
        assert!(!app.is_submitting);
        assert!(app.result.is_none());
        assert_eq!(app.error.as_deref(), Some("Request failed with status 503"));
    }

    #[test]
    fn test_new_attempt_clears_previous_result_and_error() {
        let mut app = test_app();
        let (attempt, _) = dispatch(&mut app);
        update(
            &mut app,
            Action::TriageSucceeded {
                attempt,
                result: sample_result(),
            },
        );

        // A failing local check still wipes the old result.
        app.messages = vec![String::new()];
        update(&mut app, Action::Submit);
        assert!(app.result.is_none());
        assert!(app.error.is_some());

        // And a fresh dispatch wipes the old error.
        app.messages = vec!["again".to_string()];
        dispatch(&mut app);
        assert!(app.error.is_none());
        assert!(app.result.is_none());
    }

    #[test]
    fn test_result_and_error_are_exclusive_after_each_attempt() {
        let mut app = test_app();
        let outcomes = [
            Action::TriageFailed {
                attempt: 0,
                error: TriageError::Transport("connection refused".to_string()),
            },
            Action::TriageSucceeded {
                attempt: 0,
                result: sample_result(),
            },
            Action::TriageFailed {
                attempt: 0,
                error: TriageError::Parse("expected value".to_string()),
            },
        ];
        for outcome in outcomes {
            let (attempt, _) = dispatch(&mut app);
            let outcome = match outcome {
                Action::TriageFailed { error, .. } => Action::TriageFailed { attempt, error },
                Action::TriageSucceeded { result, .. } => {
                    Action::TriageSucceeded { attempt, result }
                }
                other => other,
            };
            update(&mut app, outcome);
            assert!(!app.is_submitting);
            assert!(app.error.is_some() != app.result.is_some());
        }
    }

    #[test]
    fn test_stale_completion_is_dropped() {
        let mut app = test_app();
        let (first, _) = dispatch(&mut app);
        update(
            &mut app,
            Action::TriageFailed {
                attempt: first,
                error: TriageError::Transport("reset".to_string()),
            },
        );
        let (second, _) = dispatch(&mut app);
        assert_eq!(second, first + 1);

        // A duplicate completion for the first attempt must not resolve the second.
        update(
            &mut app,
            Action::TriageSucceeded {
                attempt: first,
                result: sample_result(),
            },
        );
        assert!(app.is_submitting);
        assert!(app.result.is_none());
    }

    #[test]
    fn test_completion_after_quit_is_dropped() {
        let mut app = test_app();
        let (attempt, _) = dispatch(&mut app);
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
        update(
            &mut app,
            Action::TriageSucceeded {
                attempt,
                result: sample_result(),
            },
        );
        assert!(app.result.is_none());
        assert!(!app.is_submitting);
    }
}
