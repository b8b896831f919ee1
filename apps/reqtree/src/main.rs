//! # reqtree - Requirement Criteria Inspector
//!
//! The main binary for the reqtree requirement-criteria engine.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │            apps/reqtree (THE BINARY)         │
//! │                                              │
//! │  ┌─────────────┐  ┌────────────────────────┐ │
//! │  │   CLI       │  │  Input / Names Config  │ │
//! │  │  (clap)     │  │  (serde_json, toml)    │ │
//! │  └──────┬──────┘  └───────────┬────────────┘ │
//! │         └───────────┬─────────┘              │
//! │                     ▼                        │
//! │             ┌───────────────┐                │
//! │             │ reqtree-core  │                │
//! │             │ (THE LOGIC)   │                │
//! │             └───────────────┘                │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! reqtree describe -c criteria.json
//! reqtree tree -c criteria.txt -t text -s stats.json
//! reqtree --names names.toml check -c criteria.json -s stats.json
//! reqtree --json-mode format -c criteria.json --postfix
//! ```

use clap::Parser;
use reqtree::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // Parse CLI arguments first: --verbose/--quiet pick the default filter.
    let cli = cli::Cli::parse();

    // REQTREE_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("REQTREE_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| cli.default_log_filter().into());

    // Logs go to stderr; stdout carries command output only.
    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    // Execute command
    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}
