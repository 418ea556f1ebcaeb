//! Driver configuration

use crate::error::{Result, SoftLayerError};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://api.service.softlayer.com/xmlrpc/v3";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Connection settings for the SoftLayer API
#[derive(Debug, Clone)]
pub struct SoftLayerConfig {
    /// API username (e.g. `SL12345`)
    pub username: String,
    pub api_key: String,
    /// XML-RPC base URL; the service name is appended per call
    pub endpoint: String,
    pub timeout: Duration,
}

impl SoftLayerConfig {
    pub fn new(username: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            api_key: api_key.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Create SoftLayerConfig from environment variables
    pub fn from_env() -> Result<Self> {
        let username = std::env::var("SOFTLAYER_USERNAME")
            .map_err(|_| SoftLayerError::MissingEnvVar("SOFTLAYER_USERNAME".to_string()))?;
        let api_key = std::env::var("SOFTLAYER_API_KEY")
            .map_err(|_| SoftLayerError::MissingEnvVar("SOFTLAYER_API_KEY".to_string()))?;

        let mut config = Self::new(username, api_key);

        if let Ok(endpoint) = std::env::var("SOFTLAYER_API_ENDPOINT") {
            config.endpoint = endpoint;
        }

        if let Ok(secs) = std::env::var("SOFTLAYER_TIMEOUT_SECS") {
            let secs = secs.trim().parse::<u64>().map_err(|_| {
                SoftLayerError::InvalidConfig(format!("SOFTLAYER_TIMEOUT_SECS: {}", secs))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}
