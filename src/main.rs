use clap::Parser;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bravor::{
    Config,
    backend::ApiClient,
    handlers::{AppState, create_router},
    store::{MemoryFeedbackStore, MemoryUserStore},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let api = Arc::new(ApiClient::new(config.api_url.clone())?);

    let state = AppState {
        api,
        users: Arc::new(MemoryUserStore::new()),
        feedback: Arc::new(MemoryFeedbackStore::new()),
        sessions: config.session_config(),
    };

    let app = create_router(state);
    let app = if config.cors {
        app.layer(CorsLayer::permissive())
    } else {
        app
    };

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Starting bravor server on {}", addr);
    tracing::info!("Data API: {}", config.api_url);
    if config.session_config().is_none() {
        tracing::info!("Sessions disabled; all routes are public");
    }

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
