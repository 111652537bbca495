//! astrochart HTTP server binary.
//!
//! # Environment Variables
//!
//! - `PORT` — HTTP port (default: 8080)
//! - `ASTRO_EPHE_PATH` — Directory with the provider's ephemeris data files
//!   (unset or unreadable: positions use built-in tables, houses unavailable)
//! - `RUST_LOG` — Tracing filter (default: "info")
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin server
//! # with the native ephemeris library:
//! cargo run --bin server --features swisseph
//! ```

use std::sync::Arc;

use anyhow::Context;
use astrochart::ephemeris::EphemerisSource;
use astrochart::server::{app_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,astrochart=debug".into()),
        )
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let bind_addr = format!("0.0.0.0:{}", port);

    #[cfg(feature = "swisseph")]
    let source: Arc<dyn EphemerisSource> = {
        let config = astrochart::ephemeris::EphemerisConfig::from_env();
        Arc::new(astrochart::ephemeris::SweSource::new(&config))
    };

    #[cfg(not(feature = "swisseph"))]
    let source: Arc<dyn EphemerisSource> = {
        tracing::warn!("built without the swisseph feature; serving canned sample positions");
        Arc::new(astrochart::ephemeris::SampleSource::new())
    };

    let state = AppState::new(source).context("ephemeris source failed startup verification")?;
    let app = app_router(state);

    tracing::info!("astrochart server starting on {}", bind_addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health    — liveness probe");
    tracing::info!("  GET  /positions — planetary/house positions");
    tracing::info!("  POST /chat      — keyword-routed advisory reply");

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    axum::serve(listener, app).await.context("server failed")?;
    Ok(())
}
