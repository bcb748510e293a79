use std::sync::Arc;

use crate::config::AppConfig;
use crate::gateway::DarajaGateway;

/// Shared application state, cloned into every handler.
#[derive(Debug, Clone, axum::extract::FromRef)]
pub struct AppState {
    pub gateway: DarajaGateway,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let config = Arc::new(config);
        Self {
            gateway: DarajaGateway::new(config.clone()),
            config,
        }
    }
}
