use std::sync::Arc;
use std::time::Duration;

use crate::config::AppConfig;

pub mod auth;
pub mod error;
pub mod mask;
pub mod phone;
pub mod stk;

pub use error::{ErrorCode, GatewayError};

pub type Result<T> = std::result::Result<T, GatewayError>;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the Daraja payment gateway.
///
/// Holds the shared http client and configuration. Cloning is cheap; all
/// request state lives on the individual calls.
#[derive(Debug, Clone)]
pub struct DarajaGateway {
    client: reqwest::Client,
    config: Arc<AppConfig>,
}

impl DarajaGateway {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self::with_request_timeout(config, REQUEST_TIMEOUT)
    }

    pub fn with_request_timeout(config: Arc<AppConfig>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("http client construction only fails on malformed builder input");
        Self { client, config }
    }
}
