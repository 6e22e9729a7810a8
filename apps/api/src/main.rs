mod config;
mod errors;
mod llm_client;
mod models;
mod render;
mod report;
mod routes;
mod state;
mod store;

#[cfg(test)]
mod test_support;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::render::renderer_from_config;
use crate::report::aggregate::CompletionPolicy;
use crate::report::pipeline::ReportPipeline;
use crate::routes::{build_router, cors_layer};
use crate::state::AppState;
use crate::store::SupabaseStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Team Report API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize task store
    let store = SupabaseStore::new(
        &config.supabase_url,
        config.supabase_service_key.clone(),
        config.http_timeout,
    )?;
    info!("Task store client initialized");

    // Initialize LLM client
    let llm = LlmClient::new(
        config.openai_api_key.clone(),
        &config.openai_base_url,
        config.http_timeout,
    )?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize PDF renderer
    let renderer = renderer_from_config(&config);
    info!("PDF engine: {:?}", config.pdf_engine);

    let policy = CompletionPolicy::new(config.done_status.clone());
    info!("Tasks with status '{}' count as completed", policy.done_status());

    let pipeline = ReportPipeline::new(
        Arc::new(store),
        Arc::new(llm),
        renderer,
        policy,
        config.report_output_dir.clone(),
    );

    // Build app state
    let state = AppState {
        pipeline: Arc::new(pipeline),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_allowed_origins)?);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
