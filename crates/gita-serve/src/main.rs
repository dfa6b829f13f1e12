//! Gita Serve - HTTP server for verse lookups.
//!
//! Connects to the verse database, then serves verses with their commentaries
//! as JSON.

use std::sync::Arc;

use axum::http::Request;
use clap::Parser;
use tower_http::trace::TraceLayer;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use gita_core::metrics::{init_metrics, start_metrics_server};
use gita_serve::{AppState, Config, PgVerseStore, VerseRepository, router};

/// Bhagavad Gita verse API server.
#[derive(Parser, Debug)]
#[command(name = "gita-serve")]
#[command(about = "HTTP API server for Bhagavad Gita verses and commentaries", long_about = None)]
struct Args {
    /// Path to .env file (optional, ignored when RENDER_SERVICE_ID is set).
    #[arg(long, env = "DOTENV_PATH", default_value = ".env")]
    dotenv: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load .env file if it exists. Hosted deployments (Render) inject the
    // environment directly.
    if std::env::var_os("RENDER_SERVICE_ID").is_none()
        && std::path::Path::new(&args.dotenv).exists()
    {
        dotenvy::from_path(&args.dotenv)?;
        eprintln!("Loaded environment from {}", args.dotenv);
    }

    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;
    let bind_addr = config.bind_addr.clone();

    // Connect to database
    let store = PgVerseStore::connect(&config.database).await?;

    // Start metrics exporter if configured
    if let Some(port) = config.metrics_port {
        let handle = init_metrics()?;
        start_metrics_server(port, handle).await?;
    }

    // Create application state
    let state = AppState::new(config, VerseRepository::new(Arc::new(store)));

    // Build router with middleware
    let app = router(state).layer(TraceLayer::new_for_http().make_span_with(
        |request: &Request<_>| {
            tracing::span!(
                Level::INFO,
                "http_request",
                method = %request.method(),
                path = %request.uri().path(),
            )
        },
    ));

    // Start server
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "starting server");

    axum::serve(listener, app).await?;

    Ok(())
}
