use std::fmt;

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Deserialize;

use super::types::{TicketPayload, TriageResult};

/// Errors surfaced to the user as a single line of text.
///
/// `Display` renders exactly the text shown in the panel, so callers can
/// store `err.to_string()` without further formatting.
#[derive(Debug, Clone, PartialEq)]
pub enum TriageError {
    /// No service base URL configured. Checked before any network activity.
    ConfigurationMissing,
    /// Every message was blank after trimming.
    ValidationFailed,
    /// Service answered with a non-success status.
    RequestFailed { status: u16, message: String },
    /// Connection-level failure (DNS, refused, reset).
    Transport(String),
    /// The response body was not a valid triage result.
    Parse(String),
}

impl TriageError {
    /// Builds a `RequestFailed` from a status and raw body, falling back to a
    /// generated message when the body is empty.
    pub fn request_failed(status: u16, body: String) -> Self {
        let message = if body.is_empty() {
            format!("Request failed with status {status}")
        } else {
            body
        };
        TriageError::RequestFailed { status, message }
    }
}

impl fmt::Display for TriageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriageError::ConfigurationMissing => {
                write!(f, "Set SUPPORT_COPILOT_URL before using the demo.")
            }
            TriageError::ValidationFailed => {
                write!(f, "Please provide at least one customer message.")
            }
            TriageError::RequestFailed { message, .. } => write!(f, "{message}"),
            TriageError::Transport(msg) => write!(f, "{msg}"),
            TriageError::Parse(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for TriageError {}

#[async_trait]
pub trait TriageService: Send + Sync {
    /// Human-readable target, shown in the title bar.
    fn endpoint(&self) -> &str;

    /// Submits one ticket for triage.
    async fn triage(&self, payload: &TicketPayload) -> Result<TriageResult, TriageError>;

    /// Checks that the service is reachable and healthy.
    async fn health(&self) -> Result<(), TriageError>;
}

#[derive(Deserialize, Debug)]
struct HealthResponse {
    #[serde(default)]
    ok: bool,
}

/// Strips a single trailing slash so `{base}/triage` never doubles up.
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.strip_suffix('/').unwrap_or(base_url).to_string()
}

/// Triage service reached over HTTP.
pub struct HttpTriageClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTriageClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: normalize_base_url(base_url),
            client: reqwest::Client::new(),
        }
    }

    pub fn triage_url(&self) -> String {
        format!("{}/triage", self.base_url)
    }

    /// Turns a non-success response into `RequestFailed`, passing successes through.
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, TriageError> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TriageError::Transport(e.to_string()))?;
        warn!("Triage service error: {} - {}", status, body);
        Err(TriageError::request_failed(status, body))
    }
}

#[async_trait]
impl TriageService for HttpTriageClient {
    fn endpoint(&self) -> &str {
        &self.base_url
    }

    async fn triage(&self, payload: &TicketPayload) -> Result<TriageResult, TriageError> {
        let json_body = serde_json::to_string(payload)
            .map_err(|e| TriageError::Parse(format!("Request serialization failed: {e}")))?;
        info!(
            "Triage request: ticket_id={}, message_count={}",
            payload.ticket_id,
            payload.messages.len()
        );
        debug!("Raw triage request: {}", json_body);

        let response = self
            .client
            .post(self.triage_url())
            .header("Content-Type", "application/json")
            .body(json_body)
            .send()
            .await
            .map_err(|e| TriageError::Transport(e.to_string()))?;

        debug!("Triage response status: {}", response.status());
        let response = Self::check_status(response).await?;

        let body = response
            .text()
            .await
            .map_err(|e| TriageError::Transport(e.to_string()))?;
        debug!("Raw triage response: {}", body);

        let result: TriageResult =
            serde_json::from_str(&body).map_err(|e| TriageError::Parse(e.to_string()))?;
        info!(
            "Triage complete: intent={}, priority={}, confidence={}",
            result.intent, result.priority, result.confidence
        );
        Ok(result)
    }

    async fn health(&self) -> Result<(), TriageError> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await
            .map_err(|e| TriageError::Transport(e.to_string()))?;
        let response = Self::check_status(response).await?;
        let status = response.status().as_u16();

        let health: HealthResponse = response
            .json()
            .await
            .map_err(|e| TriageError::Parse(e.to_string()))?;
        if health.ok {
            Ok(())
        } else {
            warn!("Health endpoint answered {} with ok=false", status);
            Err(TriageError::RequestFailed {
                status,
                message: String::from("Service reported it is not healthy"),
            })
        }
    }
}
