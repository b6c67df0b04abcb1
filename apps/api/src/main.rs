mod config;
mod errors;
mod extraction;
mod ingest;
mod models;
mod ner_client;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::extraction::CandidateRecordBuilder;
use crate::ner_client::{EntityRecognizer, HttpEntityRecognizer};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Screener v{}", env!("CARGO_PKG_VERSION"));

    // The recognizer must be reachable before any document is processed.
    let recognizer = HttpEntityRecognizer::new(&config.ner_service_url, config.ner_model.clone())?;
    recognizer.ensure_available().await.with_context(|| {
        format!(
            "Entity recognition service at {} is not available",
            config.ner_service_url
        )
    })?;
    info!(
        "Entity recognizer initialized (model: {})",
        recognizer.model()
    );

    let builder = CandidateRecordBuilder::new(
        Arc::new(recognizer),
        config.person_labels.clone(),
        &config.keywords,
    )
    .context("Invalid extraction keyword configuration")?;
    info!(
        "Extraction keywords: {} experience phrases, {} AI keywords",
        config.keywords.experience_phrases.len(),
        config.keywords.ai_keywords.len()
    );

    let state = AppState {
        config: config.clone(),
        builder: Arc::new(builder),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
