use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use analyzer::analysis::scorer::GeminiScorer;
use analyzer::config::Config;
use analyzer::llm_client::GeminiClient;
use analyzer::routes::build_router;
use analyzer::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (exits non-zero if GEMINI_API_KEY is missing)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Analyzer v{}", env!("CARGO_PKG_VERSION"));

    let gemini = GeminiClient::from_config(&config);
    info!("Gemini client initialized (model: {})", gemini.model());

    let state = AppState {
        config: Arc::new(config.clone()),
        model: Arc::new(GeminiScorer(gemini)),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
