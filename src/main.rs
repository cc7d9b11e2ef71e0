mod agent;
mod config;
mod errors;
mod models;
mod routes;
mod service;

use anyhow::Context;
use tracing::info;

use crate::agent::GeminiAgentService;
use crate::config::Config;
use crate::service::generation_service::GenerationService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (development convenience)
    dotenvy::dotenv().ok();

    // Initialise tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gemini_chat=debug,tower_http=debug".into()),
        )
        .init();

    // ── Configuration ────────────────────────────────────────────────────────
    let config = Config::from_env().context("invalid configuration (copy .env.example to .env)")?;
    info!(
        text_model = %config.gemini.text_model,
        image_model = %config.gemini.image_model,
        max_output_tokens = config.gemini.max_output_tokens,
        "Gemini provider configured"
    );

    // ── Dependency wiring ────────────────────────────────────────────────────
    let provider = GeminiAgentService::new(&config.gemini)?;
    let app = routes::app(GenerationService::new(provider));

    // ── Listen ───────────────────────────────────────────────────────────────
    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Listening on http://{addr}/");

    axum::serve(listener, app).await?;
    Ok(())
}
