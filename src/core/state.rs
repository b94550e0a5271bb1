//! # Application State
//!
//! Core business state for the triage panel. Domain logic only, no
//! TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── base_url: Option<String>      // triage service, None = not configured
//! ├── ticket: TicketSettings        // fields copied into every payload
//! ├── messages: Vec<String>         // editor entries, identity = index
//! ├── is_submitting: bool           // request in flight
//! ├── attempt: u64                  // id of the latest dispatched request
//! ├── error: Option<String>         // user-facing error line
//! ├── result: Option<TriageResult>  // latest successful triage
//! └── status_message: String        // title bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::core::config::ResolvedConfig;
use crate::triage::{TicketSettings, TriageResult};

pub struct App {
    pub base_url: Option<String>,
    pub ticket: TicketSettings,
    pub messages: Vec<String>,
    pub is_submitting: bool,
    /// Incremented on every dispatch. Completions for older attempts are dropped.
    pub attempt: u64,
    pub error: Option<String>,
    pub result: Option<TriageResult>,
    pub status_message: String,
}

impl App {
    pub fn new(base_url: Option<String>, messages: Vec<String>) -> Self {
        Self {
            base_url,
            ticket: TicketSettings::default(),
            messages,
            is_submitting: false,
            attempt: 0,
            error: None,
            result: None,
            status_message: String::from("Ready"),
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        let mut app = Self::new(config.base_url.clone(), config.initial_messages.clone());
        app.ticket = config.ticket.clone();
        app
    }

    /// Whether a service URL is configured. Absence is a visible state, not an error.
    pub fn is_configured(&self) -> bool {
        self.base_url.as_deref().is_some_and(|url| !url.is_empty())
    }

    /// Removal is only offered while more than one entry exists.
    pub fn can_remove(&self) -> bool {
        self.messages.len() > 1
    }
}
