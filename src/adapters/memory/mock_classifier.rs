//! Scripted classifier for tests and local runs.
//!
//! Responses are consumed in order. Once the script runs out every utterance
//! classifies as the `None` intent.
//!
//! # Example
//!
//! ```ignore
//! let classifier = MockClassifier::new()
//!     .with_intent("pizzaDelivery")
//!     .with_error(ClassifierError::Unavailable("down".into()));
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::domain::nlu::{ClassificationResult, Entity};
use crate::ports::{ClassifierError, NluClassifier};

#[derive(Debug, Clone, Default)]
pub struct MockClassifier {
    responses: Arc<Mutex<VecDeque<Result<ClassificationResult, ClassifierError>>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a full classification result.
    pub fn with_result(self, result: ClassificationResult) -> Self {
        lock(&self.responses).push_back(Ok(result));
        self
    }

    /// Queues a result with only a top intent.
    pub fn with_intent(self, intent: &str) -> Self {
        self.with_result(ClassificationResult::new(intent))
    }

    /// Queues a result carrying one integer entity.
    pub fn with_number(self, intent: &str, value: u32) -> Self {
        self.with_result(ClassificationResult::new(intent).with_entity(Entity::number(value.to_string())))
    }

    /// Queues a failure.
    pub fn with_error(self, error: ClassifierError) -> Self {
        lock(&self.responses).push_back(Err(error));
        self
    }

    /// Utterances classified so far.
    pub fn calls(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }

    pub fn remaining(&self) -> usize {
        lock(&self.responses).len()
    }
}

#[async_trait]
impl NluClassifier for MockClassifier {
    async fn classify(&self, text: &str) -> Result<ClassificationResult, ClassifierError> {
        lock(&self.calls).push(text.to_string());
        lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| Ok(ClassificationResult::new("None")))
    }
}

pub(super) fn lock<T>(m: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
