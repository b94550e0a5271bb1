pub mod client;
pub mod types;

pub use client::{HttpTriageClient, TriageError, TriageService, normalize_base_url};
pub use types::{
    Role, TicketMessage, TicketPayload, TicketSettings, TriageResult, format_confidence,
    sanitize_messages,
};
