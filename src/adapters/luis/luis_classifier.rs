//! LUIS Classifier - Implementation of NluClassifier for a LUIS v2 endpoint.
//!
//! # Configuration
//!
//! ```ignore
//! let config = LuisConfig::new("https://westeurope.api.cognitive.microsoft.com/luis/v2.0/apps/", app_id, key)
//!     .with_timeout(Duration::from_secs(5));
//!
//! let classifier = LuisClassifier::new(config)?;
//! ```
//!
//! The prediction endpoint is `GET {endpoint}{app_id}` with the utterance in
//! the `q` query parameter.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use crate::domain::nlu::{ClassificationResult, Entity, EntityResolution};
use crate::ports::{ClassifierError, NluClassifier};

/// Configuration for the LUIS classifier.
#[derive(Debug, Clone)]
pub struct LuisConfig {
    /// Prediction endpoint up to and including `/apps/`.
    pub endpoint: String,
    pub app_id: String,
    subscription_key: Secret<String>,
    pub timeout: Duration,
}

impl LuisConfig {
    pub fn new(
        endpoint: impl Into<String>,
        app_id: impl Into<String>,
        subscription_key: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            app_id: app_id.into(),
            subscription_key: Secret::new(subscription_key.into()),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn subscription_key(&self) -> &str {
        self.subscription_key.expose_secret()
    }

    fn prediction_url(&self) -> String {
        format!("{}{}", self.endpoint, self.app_id)
    }
}

pub struct LuisClassifier {
    config: LuisConfig,
    client: Client,
}

impl LuisClassifier {
    /// Creates a classifier with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `Unavailable` if the HTTP client cannot be built.
    pub fn new(config: LuisConfig) -> Result<Self, ClassifierError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClassifierError::Unavailable(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { config, client })
    }
}

#[async_trait]
impl NluClassifier for LuisClassifier {
    async fn classify(&self, text: &str) -> Result<ClassificationResult, ClassifierError> {
        let response = self
            .client
            .get(self.config.prediction_url())
            .query(&[
                ("verbose", "true"),
                ("subscription-key", self.config.subscription_key()),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ClassifierError::Unavailable(format!(
                        "Timed out after {}s",
                        self.config.timeout.as_secs()
                    ))
                } else if e.is_connect() {
                    ClassifierError::Unavailable(format!("Connection failed: {}", e))
                } else {
                    ClassifierError::Unavailable(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClassifierError::BadStatus(status.as_u16()));
        }

        let body: LuisResponse = response
            .json()
            .await
            .map_err(|e| ClassifierError::InvalidResponse(e.to_string()))?;
        body.into_result()
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// LUIS API Types
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LuisResponse {
    top_scoring_intent: Option<LuisIntent>,
    #[serde(default)]
    entities: Vec<LuisEntity>,
}

#[derive(Debug, Deserialize)]
struct LuisIntent {
    intent: String,
}

#[derive(Debug, Deserialize)]
struct LuisEntity {
    #[serde(rename = "type")]
    entity_type: String,
    #[serde(default)]
    resolution: Option<serde_json::Value>,
}

impl LuisResponse {
    fn into_result(self) -> Result<ClassificationResult, ClassifierError> {
        let intent = self
            .top_scoring_intent
            .ok_or_else(|| ClassifierError::InvalidResponse("missing topScoringIntent".to_string()))?;

        let entities = self
            .entities
            .into_iter()
            .map(|e| Entity {
                entity_type: e.entity_type,
                resolution: e.resolution.as_ref().map(resolution_from_json).unwrap_or_default(),
            })
            .collect();

        Ok(ClassificationResult {
            top_intent: intent.intent,
            entities,
        })
    }
}

/// LUIS resolutions vary by entity type; only the fields we read are kept.
fn resolution_from_json(value: &serde_json::Value) -> EntityResolution {
    let as_text = |v: &serde_json::Value| match v {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    };
    EntityResolution {
        subtype: value.get("subtype").and_then(as_text),
        value: value.get("value").and_then(as_text),
        values: value
            .get("values")
            .and_then(|v| v.as_array())
            .map(|items| items.iter().filter_map(as_text).collect())
            .unwrap_or_default(),
    }
}
