// ============================
// crates/backend-bin/src/main.rs
// ============================
//! FundFlow API server entry point.
use backend_lib::{config::Settings, router, AppState};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(settings.log_level.clone())),
        )
        .init();

    let state = Arc::new(AppState::from_settings(settings.clone())?);
    let app = router::create_router(state);

    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!(addr = %settings.bind_addr, "FundFlow API listening");

    axum::serve(listener, app).await?;

    Ok(())
}
