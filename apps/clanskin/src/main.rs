//! # clanskin
//!
//! Clan and team skin profiles for a survival game server.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  apps/clanskin (THE BINARY)              │
//! │                                                          │
//! │  ┌─────────────┐    ┌─────────────┐    ┌──────────────┐  │
//! │  │    CLI      │    │  HTTP API   │    │  autosave    │  │
//! │  │   (clap)    │    │   (axum)    │    │  (tokio)     │  │
//! │  └──────┬──────┘    └──────┬──────┘    └──────┬───────┘  │
//! │         └──────────────────┼──────────────────┘          │
//! │                            ▼                             │
//! │                    ┌───────────────┐                     │
//! │                    │ clanskin-core │                     │
//! │                    │  (THE LOGIC)  │                     │
//! │                    └───────────────┘                     │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the host bridge
//! clanskin server --port 8080
//!
//! # Offline maintenance
//! clanskin status
//! clanskin show --group WOLF
//! clanskin export -o backup.cskn
//! ```

use clap::Parser;
use clanskin::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // CLANSKIN_LOG_FORMAT=json switches to machine-parseable output.
    let log_format = std::env::var("CLANSKIN_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "clanskin=info,tower_http=debug".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    let cli = cli::Cli::parse();

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}
