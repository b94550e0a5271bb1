//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.support-copilot/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::triage::TicketSettings;
use crate::triage::types::{DEFAULT_CHANNEL, DEFAULT_LANGUAGE, DEFAULT_TICKET_ID};

/// Env var holding the triage service base URL.
pub const BASE_URL_ENV: &str = "SUPPORT_COPILOT_URL";

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CopilotConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub ticket: TicketConfig,
    #[serde(default)]
    pub editor: EditorConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TicketConfig {
    pub ticket_id: Option<String>,
    pub language: Option<String>,
    pub channel: Option<String>,
    pub customer_tier: Option<String>,
    pub knowledge_snippets: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct EditorConfig {
    pub initial_messages: Option<Vec<String>>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const SAMPLE_MESSAGES: [&str; 2] = [
    "My order 9283 still shows processing after 10 days.",
    "Please cancel it and refund me ASAP.",
];

// ============================================================================
// Resolved Config (concrete values)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// `None` when unset or blank; the UI shows a notice instead of calling out.
    pub base_url: Option<String>,
    pub ticket: TicketSettings,
    /// Never empty.
    pub initial_messages: Vec<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.support-copilot/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".support-copilot").join("config.toml"))
}

/// Load config from `~/.support-copilot/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `CopilotConfig::default()`.
pub fn load_config() -> Result<CopilotConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(CopilotConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(CopilotConfig::default());
    }

    load_config_from(&path)
}

/// Parse a config file at an explicit path.
pub fn load_config_from(path: &Path) -> Result<CopilotConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: CopilotConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# Support Copilot Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# base_url = "http://localhost:9000"   # Or set SUPPORT_COPILOT_URL / pass --url

# [ticket]
# ticket_id = "demo-ticket"
# language = "en"
# channel = "email"
# customer_tier = "gold"
# knowledge_snippets = ["Refunds are processed within 5 business days."]

# [editor]
# initial_messages = ["My order 9283 still shows processing after 10 days."]
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_url` comes from `--url` (None = not specified). Blank values at any
/// level count as unset.
pub fn resolve(config: &CopilotConfig, cli_url: Option<&str>) -> ResolvedConfig {
    let env_url = std::env::var(BASE_URL_ENV).ok();
    resolve_with_env(config, cli_url, env_url.as_deref())
}

fn resolve_with_env(
    config: &CopilotConfig,
    cli_url: Option<&str>,
    env_url: Option<&str>,
) -> ResolvedConfig {
    // Base URL: CLI → env → config
    let base_url = non_blank(cli_url)
        .or_else(|| non_blank(env_url))
        .or_else(|| non_blank(config.general.base_url.as_deref()));

    let ticket = TicketSettings {
        ticket_id: config
            .ticket
            .ticket_id
            .clone()
            .unwrap_or_else(|| DEFAULT_TICKET_ID.to_string()),
        language: config
            .ticket
            .language
            .clone()
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
        channel: Some(
            config
                .ticket
                .channel
                .clone()
                .unwrap_or_else(|| DEFAULT_CHANNEL.to_string()),
        ),
        customer_tier: config.ticket.customer_tier.clone(),
        knowledge_snippets: config
            .ticket
            .knowledge_snippets
            .clone()
            .filter(|snippets| !snippets.is_empty()),
    };

    let initial_messages = match &config.editor.initial_messages {
        Some(messages) if !messages.is_empty() => messages.clone(),
        Some(_) => vec![String::new()],
        None => SAMPLE_MESSAGES.iter().map(|m| m.to_string()).collect(),
    };

    ResolvedConfig {
        base_url,
        ticket,
        initial_messages,
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
