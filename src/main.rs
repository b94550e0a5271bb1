use clap::Parser;
use log::{info, warn};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

use support_copilot::core::config::{self, CopilotConfig, ResolvedConfig};
use support_copilot::triage::{HttpTriageClient, TriageError, TriageService};
use support_copilot::tui;

#[derive(Parser)]
#[command(name = "support-copilot", about = "Terminal demo for the Support Copilot triage API")]
struct Args {
    /// Triage service base URL (overrides SUPPORT_COPILOT_URL and the config file)
    #[arg(short, long)]
    url: Option<String>,

    /// Call the service health endpoint and exit
    #[arg(long)]
    check: bool,

    /// Where to write the debug log
    #[arg(long, default_value = "support-copilot.log")]
    log_file: PathBuf,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // The TUI owns the terminal, so logs go to a file only
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        warn!("Ignoring config file: {}", e);
        CopilotConfig::default()
    });
    let resolved = config::resolve(&file_config, args.url.as_deref());

    info!(
        "Support Copilot starting up (endpoint: {})",
        resolved.base_url.as_deref().unwrap_or("<unset>")
    );

    if args.check {
        return check_health(&resolved).await;
    }

    tui::run(resolved)
}

async fn check_health(config: &ResolvedConfig) -> std::io::Result<()> {
    let Some(base_url) = config.base_url.as_deref() else {
        return Err(std::io::Error::other(TriageError::ConfigurationMissing));
    };

    let client = HttpTriageClient::new(base_url);
    match client.health().await {
        Ok(()) => {
            println!("{} is healthy", client.endpoint());
            Ok(())
        }
        Err(e) => {
            warn!("Health check failed: {}", e);
            Err(std::io::Error::other(format!(
                "{} health check failed: {e}",
                client.endpoint()
            )))
        }
    }
}
