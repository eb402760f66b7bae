//! # Folio - Portfolio Catalogue Server
//!
//! The main binary for Folio.
//!
//! This application provides:
//! - HTTP JSON API and static site server (axum-based)
//! - CLI interface for browsing the catalogue
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │              apps/folio (THE BINARY)            │
//! │                                                 │
//! │   ┌─────────────┐          ┌─────────────┐      │
//! │   │    CLI      │          │  HTTP API   │      │
//! │   │   (clap)    │          │   (axum)    │      │
//! │   └──────┬──────┘          └──────┬──────┘      │
//! │          └───────────┬────────────┘             │
//! │                      ▼                          │
//! │              ┌───────────────┐                  │
//! │              │  folio-core   │                  │
//! │              │ (THE ENGINE)  │                  │
//! │              └───────────────┘                  │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server
//! folio serve --host 0.0.0.0 --port 8080 --site-dir site
//!
//! # CLI operations
//! folio projects --skill Excel --industry Retail
//! folio table 1 cash-flow --sort "Revenue ($B)" --desc
//! folio check --data portfolio.toml
//! ```

use clap::Parser;
use folio::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // FOLIO_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("FOLIO_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "folio=info,tower_http=debug".into());

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

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the Folio startup banner.
fn print_banner() {
    println!(
        r#"
  ███████╗ ██████╗ ██╗     ██╗ ██████╗
  ██╔════╝██╔═══██╗██║     ██║██╔═══██╗
  █████╗  ██║   ██║██║     ██║██║   ██║
  ██╔══╝  ██║   ██║██║     ██║██║   ██║
  ██║     ╚██████╔╝███████╗██║╚██████╔╝
  ╚═╝      ╚═════╝ ╚══════╝╚═╝ ╚═════╝

  Portfolio Catalogue v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
