//! Q&A service configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Q&A resolver configuration
#[derive(Debug, Clone, Deserialize)]
pub struct QnaConfig {
    /// Full `generateAnswer` URL of the knowledge base
    pub endpoint: String,

    /// Value of the `Authorization` header
    endpoint_key: Secret<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Number of answers requested
    #[serde(default = "default_top")]
    pub top: u32,
}

impl QnaConfig {
    pub fn new(endpoint: impl Into<String>, endpoint_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            endpoint_key: Secret::new(endpoint_key.into()),
            timeout_secs: default_timeout(),
            top: default_top(),
        }
    }

    pub fn endpoint_key(&self) -> &str {
        self.endpoint_key.expose_secret()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.endpoint.is_empty() {
            return Err(ValidationError::MissingRequired("QNA_ENDPOINT"));
        }
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(ValidationError::InvalidEndpoint("qna"));
        }
        if self.endpoint_key().is_empty() {
            return Err(ValidationError::MissingRequired("QNA_ENDPOINT_KEY"));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

fn default_timeout() -> u64 {
    10
}

fn default_top() -> u32 {
    1
}
