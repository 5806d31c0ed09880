use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use marquee_api::{
    api::{create_router, AppState},
    config::Config,
    services::{FuzzyResolver, RecommendationService},
    store::SimilarityStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("marquee_api=info,tower_http=info")),
        )
        .init();

    // No model, no service: refuse to start rather than serve empty answers
    let store = SimilarityStore::load(&config.model_path).map_err(|e| {
        tracing::error!(error = %e, path = %config.model_path.display(), "Failed to load model");
        e
    })?;

    let service = RecommendationService::new(
        Arc::new(store),
        FuzzyResolver::new(config.match_threshold),
    );
    let state = AppState::new(Arc::new(service), config.default_top_n);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(address = %config.bind_addr(), "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
