pub mod routes;
pub mod state;

use std::sync::Arc;

use axum::Router;
use pmm_core::config::AppConfig;
use pmm_core::orchestrator::TurnOrchestrator;
use pmm_core::store::SessionStore;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use state::AppState;

/// Build the axum Router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = state.config.server.cors;

    let mut app = Router::new()
        .merge(routes::chat_routes())
        .merge(routes::session_routes())
        .merge(routes::health_routes())
        .with_state(state);

    app = app.layer(TraceLayer::new_for_http());

    // Local tool with no auth surface; CORS is permissive when enabled.
    if cors {
        app = app.layer(CorsLayer::permissive());
    }

    app
}

/// Start the HTTP server.
pub async fn serve(
    config: AppConfig,
    store: Arc<dyn SessionStore>,
    orchestrator: Arc<TurnOrchestrator>,
) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, store, orchestrator);
    let router = build_router(state);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
