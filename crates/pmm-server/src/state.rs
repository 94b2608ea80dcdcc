use std::sync::Arc;

use pmm_core::config::AppConfig;
use pmm_core::orchestrator::TurnOrchestrator;
use pmm_core::store::SessionStore;

/// Shared application state for the server.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<dyn SessionStore>,
    pub orchestrator: Arc<TurnOrchestrator>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        store: Arc<dyn SessionStore>,
        orchestrator: Arc<TurnOrchestrator>,
    ) -> Self {
        Self {
            config,
            store,
            orchestrator,
        }
    }
}
