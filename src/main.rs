//! Application entry point for the `whoop-digest` service.
//!
//! This binary orchestrates the full startup sequence:
//! - Loading configuration from environment variables or `.env`
//! - Initializing structured logging/tracing
//! - Building the WHOOP client over a shared access token
//! - Mounting all API routes via the `routes` gateway (EMBP pattern)
//! - Binding the Axum HTTP server and serving requests
//!
//! # Environment Variables
//! - `WHOOP_ACCESS_TOKEN` (**required**) – bearer token for the WHOOP API
//! - `WHOOP_LOG_LEVEL` (optional) – log verbosity (default: `debug`)
//! - `WHOOP_SPAN_EVENTS` (optional) – span event mode for tracing
//!
//! See `config.rs` for the remaining settings.
use std::{env, sync::Arc};

use anyhow::Result;
use dotenvy::dotenv;
use is_terminal::IsTerminal;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

use whoop_digest::whoop::{AccessToken, ReqwestTransport, WhoopClient};
use whoop_digest::{config, routes};

// ---

#[tokio::main]
async fn main() -> Result<()> {
    // ---
    dotenv().ok();
    init_tracing();

    let cfg = config::load_from_env()?;
    cfg.log_config();

    // The token handle is shared with whatever refreshes it; requests read
    // the current value when they are issued.
    let token = AccessToken::new(cfg.access_token.clone());
    let transport = ReqwestTransport::new(cfg.api_url.clone(), token);
    let client = WhoopClient::new(Arc::new(transport), cfg.retry_policy());

    let addr = cfg.bind_addr;
    let app = routes::router(client, cfg);

    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ---

/// Initialize the global tracing subscriber for structured logging.
///
/// This function configures the [`tracing_subscriber`] with:
/// - Log target, file, and line number output enabled
/// - Color output controlled by TTY detection and `FORCE_COLOR` env var:
///   - `FORCE_COLOR=1|true|yes`: force colors on
///   - `FORCE_COLOR=0|false|no`: force colors off
///   - unset or other values: auto-detect TTY
/// - Span event emission mode controlled by the `WHOOP_SPAN_EVENTS` env var:
///   - `"full"`       : emit ENTER, EXIT, and CLOSE events with timing
///   - `"enter_exit"` : emit ENTER and EXIT only
///   - unset or other values: emit CLOSE events only (default)
/// - Log level controlled by the `WHOOP_LOG_LEVEL` env var
///
/// Call once at startup, before any logging macro runs.
fn init_tracing() {
    // ---
    let span_events = match env::var("WHOOP_SPAN_EVENTS").as_deref() {
        Ok("full") => FmtSpan::FULL,
        Ok("enter_exit") => FmtSpan::ENTER | FmtSpan::EXIT,
        _ => FmtSpan::CLOSE,
    };

    let use_color = match env::var("FORCE_COLOR").as_deref() {
        Ok("1") | Ok("true") | Ok("yes") => true,
        Ok("0") | Ok("false") | Ok("no") => false,
        _ => std::io::stdout().is_terminal(),
    };

    // Use RUST_LOG if available, otherwise fall back to WHOOP_LOG_LEVEL
    let env_filter = if env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match env::var("WHOOP_LOG_LEVEL").ok().as_deref() {
            Some("trace") => "trace",
            Some("debug") => "debug",
            Some("info") => "info",
            Some("warn") => "warn",
            Some("error") => "error",
            _ => "debug",
        };
        EnvFilter::new(format!("{level},hyper=info,reqwest=info"))
    };

    tracing_subscriber::fmt()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(span_events)
        .with_env_filter(env_filter)
        .with_ansi(use_color)
        .compact()
        .init();
}
