use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use profile_api::api::{self, AppState};
use profile_api::config;
use profile_api::store::ProfileStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up PROFILE_API_PORT, APP_ENV, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("profile_api=info,tower_http=info")),
        )
        .init();

    let config = config::config();
    tracing::info!("Starting Profile API in {:?} mode", config.environment);
    if profile_api::is_development!() {
        tracing::warn!("development mode: CORS accepts any origin");
    }

    let store = Arc::new(ProfileStore::new());
    let app = api::app(AppState::new(store), config);

    let bind_addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Profile API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
