use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::Result;
use crate::predictor::ModelRegistry;
use crate::server::config::ServeConfig;
use crate::server::handlers;

/// Shared handler state. The registry never changes after startup, so it
/// is shared without locking.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ModelRegistry>,
}

pub fn build_router(registry: Arc<ModelRegistry>) -> Router {
    let state = AppState { registry };

    Router::new()
        .route("/", get(handlers::home))
        .route("/health", get(handlers::health))
        .route("/model_info", get(handlers::model_info))
        .route("/predict", post(handlers::predict))
        .route("/batch_predict", post(handlers::batch_predict))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds the configured address and serves until the process stops.
pub async fn serve(config: &ServeConfig, registry: ModelRegistry) -> Result<()> {
    let router = build_router(Arc::new(registry));
    let address = config.bind_address();

    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!(%address, "vayuraksha backend listening");

    axum::serve(listener, router).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_router_with_empty_registry() {
        let router = build_router(Arc::new(ModelRegistry::new()));
        // Routing is wired statically; an empty registry must not panic.
        drop(router);
    }
}
