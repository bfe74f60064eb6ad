//! Language understanding service configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Classifier configuration
#[derive(Debug, Clone, Deserialize)]
pub struct NluConfig {
    /// Prediction endpoint up to the app id, e.g. `https://.../luis/v2.0/apps/`
    pub endpoint: String,

    pub app_id: String,

    subscription_key: Secret<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl NluConfig {
    pub fn new(
        endpoint: impl Into<String>,
        app_id: impl Into<String>,
        subscription_key: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            app_id: app_id.into(),
            subscription_key: Secret::new(subscription_key.into()),
            timeout_secs: default_timeout(),
        }
    }

    pub fn subscription_key(&self) -> &str {
        self.subscription_key.expose_secret()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.endpoint.is_empty() {
            return Err(ValidationError::MissingRequired("NLU_ENDPOINT"));
        }
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(ValidationError::InvalidEndpoint("nlu"));
        }
        if self.app_id.is_empty() {
            return Err(ValidationError::MissingRequired("NLU_APP_ID"));
        }
        if self.subscription_key().is_empty() {
            return Err(ValidationError::MissingRequired("NLU_SUBSCRIPTION_KEY"));
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
