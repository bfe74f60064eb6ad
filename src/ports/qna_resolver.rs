//! Q&A Resolver Port - Interface for question answering.
//!
//! Resolves a free-text question, optionally continuing a multi-turn
//! exchange, to the knowledge base's top answer.

use async_trait::async_trait;

use crate::domain::nlu::{QnaAnswer, QnaQuery};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QnaError {
    #[error("Q&A service unavailable: {0}")]
    Unavailable(String),

    #[error("Q&A service returned status {0}")]
    BadStatus(u16),

    #[error("Q&A service returned no answer")]
    NoAnswer,
}

#[async_trait]
pub trait QnaResolver: Send + Sync {
    /// Returns the top answer for the query.
    async fn resolve_answer(&self, query: &QnaQuery) -> Result<QnaAnswer, QnaError>;
}
