use serde::{Deserialize, Serialize};

pub const DEFAULT_TICKET_ID: &str = "demo-ticket";
pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_CHANNEL: &str = "email";

/// Author of a transcript message. The demo only ever sends customer text.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Agent,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TicketMessage {
    pub role: Role,
    pub text: String,
}

impl TicketMessage {
    pub fn customer(text: impl Into<String>) -> Self {
        Self {
            role: Role::Customer,
            text: text.into(),
        }
    }
}

/// Request body for `POST /triage`.
///
/// Optional fields are omitted from the JSON when unset, so the default
/// payload is exactly `{ticket_id, messages, language, channel}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TicketPayload {
    pub ticket_id: String,
    pub messages: Vec<TicketMessage>,
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_tier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub knowledge_snippets: Option<Vec<String>>,
}

/// Ticket-level settings that are copied into every payload.
#[derive(Debug, Clone, PartialEq)]
pub struct TicketSettings {
    pub ticket_id: String,
    pub language: String,
    pub channel: Option<String>,
    pub customer_tier: Option<String>,
    pub knowledge_snippets: Option<Vec<String>>,
}

impl Default for TicketSettings {
    fn default() -> Self {
        Self {
            ticket_id: DEFAULT_TICKET_ID.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            channel: Some(DEFAULT_CHANNEL.to_string()),
            customer_tier: None,
            knowledge_snippets: None,
        }
    }
}

impl TicketPayload {
    /// Builds a payload from already-sanitized customer texts, keeping their order.
    pub fn new(settings: &TicketSettings, texts: Vec<String>) -> Self {
        Self {
            ticket_id: settings.ticket_id.clone(),
            messages: texts.into_iter().map(TicketMessage::customer).collect(),
            language: settings.language.clone(),
            channel: settings.channel.clone(),
            customer_tier: settings.customer_tier.clone(),
            knowledge_snippets: settings.knowledge_snippets.clone(),
        }
    }
}

/// Trims every entry and drops the ones that end up empty.
pub fn sanitize_messages(entries: &[String]) -> Vec<String> {
    entries
        .iter()
        .map(|entry| entry.trim())
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Structured triage returned by the service.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TriageResult {
    pub ticket_id: String,
    pub intent: String,
    pub sentiment: String,
    pub priority: String,
    /// Between 0 and 1.
    pub confidence: f64,
    pub summary: String,
    pub suggested_reply: String,
    #[serde(default)]
    pub actions: Option<Vec<String>>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub language: Option<String>,
}

impl TriageResult {
    /// Confidence as a whole percentage, e.g. `0.873` → `"87%"`.
    pub fn confidence_label(&self) -> String {
        format_confidence(self.confidence)
    }

    /// Actions to list, or `None` when the list is absent or empty.
    pub fn listed_actions(&self) -> Option<&[String]> {
        non_empty_list(self.actions.as_deref())
    }

    pub fn listed_tags(&self) -> Option<&[String]> {
        non_empty_list(self.tags.as_deref())
    }
}

fn non_empty_list(list: Option<&[String]>) -> Option<&[String]> {
    list.filter(|items| !items.is_empty())
}

pub fn format_confidence(confidence: f64) -> String {
    format!("{}%", (confidence * 100.0).round() as i64)
}
