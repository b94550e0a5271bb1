//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use async_trait::async_trait;

use crate::core::state::App;
use crate::triage::{TicketPayload, TriageError, TriageResult, TriageService};

/// A service that answers every request with the same canned outcome.
pub struct StaticService {
    pub outcome: Result<TriageResult, TriageError>,
}

#[async_trait]
impl TriageService for StaticService {
    fn endpoint(&self) -> &str {
        "static"
    }

    async fn triage(&self, _payload: &TicketPayload) -> Result<TriageResult, TriageError> {
        self.outcome.clone()
    }

    async fn health(&self) -> Result<(), TriageError> {
        Ok(())
    }
}

pub fn sample_result() -> TriageResult {
    TriageResult {
        ticket_id: "demo-ticket".to_string(),
        intent: "refund_request".to_string(),
        sentiment: "frustrated".to_string(),
        priority: "high".to_string(),
        confidence: 0.873,
        summary: "Customer wants order 9283 cancelled and refunded.".to_string(),
        suggested_reply: "I'm sorry for the delay, I've started your refund.".to_string(),
        actions: Some(vec![
            "Cancel order 9283".to_string(),
            "Issue refund".to_string(),
        ]),
        tags: None,
        language: Some("en".to_string()),
    }
}

/// Creates a configured test App with the two sample messages.
pub fn test_app() -> App {
    App::new(
        Some("http://triage.test".to_string()),
        vec![
            "My order 9283 still shows processing after 10 days.".to_string(),
            "Please cancel it and refund me ASAP.".to_string(),
        ],
    )
}
