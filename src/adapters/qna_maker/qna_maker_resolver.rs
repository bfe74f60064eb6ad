//! QnA Maker Resolver - Implementation of QnaResolver for a QnA Maker
//! `generateAnswer` endpoint.
//!
//! Multi-turn follow-ups are sent back with the previous answer's id and the
//! previous user query as context, plus the id of the picked prompt.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::domain::nlu::{FollowUp, QnaAnswer, QnaQuery};
use crate::ports::{QnaError, QnaResolver};

#[derive(Debug, Clone)]
pub struct QnaMakerConfig {
    /// Full `generateAnswer` URL of the knowledge base.
    pub endpoint: String,
    /// Sent verbatim as the `Authorization` header (`EndpointKey ...`).
    endpoint_key: Secret<String>,
    pub timeout: Duration,
    /// Number of answers to ask for; only the first is used.
    pub top: u32,
}

impl QnaMakerConfig {
    pub fn new(endpoint: impl Into<String>, endpoint_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            endpoint_key: Secret::new(endpoint_key.into()),
            timeout: Duration::from_secs(10),
            top: 1,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_top(mut self, top: u32) -> Self {
        self.top = top.max(1);
        self
    }

    fn endpoint_key(&self) -> &str {
        self.endpoint_key.expose_secret()
    }
}

pub struct QnaMakerResolver {
    config: QnaMakerConfig,
    client: Client,
}

impl QnaMakerResolver {
    /// # Errors
    ///
    /// Returns `Unavailable` if the HTTP client cannot be built.
    pub fn new(config: QnaMakerConfig) -> Result<Self, QnaError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| QnaError::Unavailable(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { config, client })
    }

    fn to_request(&self, query: &QnaQuery) -> GenerateAnswerRequest {
        GenerateAnswerRequest {
            question: query.question.clone(),
            top: self.config.top,
            context: query.context.as_ref().map(|c| RequestContext {
                previous_qna_id: id_value(&c.previous_qna_id),
                previous_user_query: c.previous_user_query.clone(),
            }),
            qna_id: query.qna_id.as_deref().map(id_value),
        }
    }
}

#[async_trait]
impl QnaResolver for QnaMakerResolver {
    async fn resolve_answer(&self, query: &QnaQuery) -> Result<QnaAnswer, QnaError> {
        let response = self
            .client
            .post(&self.config.endpoint)
            .header("Authorization", self.config.endpoint_key())
            .json(&self.to_request(query))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    QnaError::Unavailable(format!("Timed out after {}s", self.config.timeout.as_secs()))
                } else if e.is_connect() {
                    QnaError::Unavailable(format!("Connection failed: {}", e))
                } else {
                    QnaError::Unavailable(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(QnaError::BadStatus(status.as_u16()));
        }

        let body: GenerateAnswerResponse = response
            .json()
            .await
            .map_err(|e| QnaError::Unavailable(format!("Invalid response: {}", e)))?;
        body.into_answer()
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// QnA Maker API Types
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateAnswerRequest {
    question: String,
    top: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    context: Option<RequestContext>,
    #[serde(skip_serializing_if = "Option::is_none")]
    qna_id: Option<Value>,
}

#[derive(Debug, Serialize)]
struct RequestContext {
    #[serde(rename = "previousQnAId")]
    previous_qna_id: Value,
    #[serde(rename = "previousUserQuery")]
    previous_user_query: String,
}

#[derive(Debug, Deserialize)]
struct GenerateAnswerResponse {
    #[serde(default)]
    answers: Vec<ResponseAnswer>,
}

#[derive(Debug, Deserialize)]
struct ResponseAnswer {
    answer: String,
    id: Value,
    #[serde(default)]
    context: Option<ResponseContext>,
}

#[derive(Debug, Deserialize)]
struct ResponseContext {
    #[serde(default)]
    prompts: Vec<ResponsePrompt>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePrompt {
    qna_id: Value,
    display_text: String,
}

impl GenerateAnswerResponse {
    fn into_answer(self) -> Result<QnaAnswer, QnaError> {
        let top = self.answers.into_iter().next().ok_or(QnaError::NoAnswer)?;
        let follow_ups = top
            .context
            .map(|c| c.prompts)
            .unwrap_or_default()
            .into_iter()
            .map(|p| FollowUp {
                id: id_text(&p.qna_id),
                text: p.display_text,
            })
            .collect();

        Ok(QnaAnswer {
            answer: top.answer,
            answer_id: id_text(&top.id),
            follow_ups,
        })
    }
}

/// QnA Maker ids are numeric; keep them numeric on the wire when they are.
fn id_value(id: &str) -> Value {
    id.parse::<i64>()
        .map(Value::from)
        .unwrap_or_else(|_| Value::String(id.to_string()))
}

fn id_text(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
