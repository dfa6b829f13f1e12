//! Prometheus metrics helpers for the Gita services.
//!
//! # Usage
//!
//! ```rust,ignore
//! use gita_core::metrics::{init_metrics, start_metrics_server};
//!
//! let handle = init_metrics()?;
//! start_metrics_server(9091, handle).await?;
//!
//! metrics::counter!(gita_core::metrics::VERSE_FETCH_TOTAL, "outcome" => "found").increment(1);
//! ```
//!
//! # Metric Naming Conventions
//!
//! - Prefix: the thing being measured (`verse_`)
//! - Suffix: unit or type (`_total`, `_seconds`)
//! - Labels: only low-cardinality values (never the verse id)

use axum::{Router, routing::get};
use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use std::net::SocketAddr;

/// Verse fetches by outcome (label `outcome`: found, absent, error).
pub const VERSE_FETCH_TOTAL: &str = "verse_fetch_total";

/// Wall time of one repository fetch, both queries included.
pub const VERSE_FETCH_DURATION_SECONDS: &str = "verse_fetch_duration_seconds";

/// Number of commentaries attached to each returned verse.
pub const VERSE_COMMENTARIES_RETURNED: &str = "verse_commentaries_returned";

/// Initialize the Prometheus metrics recorder.
///
/// Must be called once at startup before any metrics are recorded. Fails if a
/// global recorder is already installed.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    register_metrics();
    Ok(handle)
}

/// Start the Prometheus metrics HTTP server.
///
/// Binds `0.0.0.0:{port}` before returning, then serves `/metrics` from a
/// background task.
pub async fn start_metrics_server(
    port: u16,
    handle: PrometheusHandle,
) -> Result<(), std::io::Error> {
    let app = Router::new().route(
        "/metrics",
        get(move || {
            let handle = handle.clone();
            async move { handle.render() }
        }),
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Metrics server listening on http://{}/metrics", addr);

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "metrics server stopped");
        }
    });

    Ok(())
}

fn register_metrics() {
    describe_counter!(
        VERSE_FETCH_TOTAL,
        "Verse fetches by outcome (found, absent, error)"
    );
    describe_histogram!(
        VERSE_FETCH_DURATION_SECONDS,
        metrics::Unit::Seconds,
        "Time to fetch a verse and its commentaries"
    );
    describe_histogram!(
        VERSE_COMMENTARIES_RETURNED,
        metrics::Unit::Count,
        "Commentaries attached to each returned verse"
    );
}
