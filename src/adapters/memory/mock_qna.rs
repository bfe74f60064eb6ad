//! Scripted Q&A resolver for tests and local runs.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::domain::nlu::{QnaAnswer, QnaQuery};
use crate::ports::{QnaError, QnaResolver};

use super::mock_classifier::lock;

/// Returns queued answers in order, then `QnaError::NoAnswer`.
#[derive(Debug, Clone, Default)]
pub struct MockQnaResolver {
    responses: Arc<Mutex<VecDeque<Result<QnaAnswer, QnaError>>>>,
    queries: Arc<Mutex<Vec<QnaQuery>>>,
}

impl MockQnaResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_answer(self, answer: QnaAnswer) -> Self {
        lock(&self.responses).push_back(Ok(answer));
        self
    }

    pub fn with_error(self, error: QnaError) -> Self {
        lock(&self.responses).push_back(Err(error));
        self
    }

    /// Queries received so far.
    pub fn queries(&self) -> Vec<QnaQuery> {
        lock(&self.queries).clone()
    }
}

#[async_trait]
impl QnaResolver for MockQnaResolver {
    async fn resolve_answer(&self, query: &QnaQuery) -> Result<QnaAnswer, QnaError> {
        lock(&self.queries).push(query.clone());
        lock(&self.responses)
            .pop_front()
            .unwrap_or(Err(QnaError::NoAnswer))
    }
}
