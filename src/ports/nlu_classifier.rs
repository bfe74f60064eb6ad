//! NLU Classifier Port - Interface for intent classification.
//!
//! Maps a free-text utterance to its top intent and the typed entities found
//! in it. Implementations talk to a hosted language-understanding service.

use async_trait::async_trait;

use crate::domain::nlu::ClassificationResult;

/// Errors from the classification service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassifierError {
    /// The service could not be reached or did not answer in time.
    #[error("Classifier unavailable: {0}")]
    Unavailable(String),

    #[error("Classifier returned status {0}")]
    BadStatus(u16),

    #[error("Classifier response could not be parsed: {0}")]
    InvalidResponse(String),
}

#[async_trait]
pub trait NluClassifier: Send + Sync {
    /// Classifies one utterance.
    async fn classify(&self, text: &str) -> Result<ClassificationResult, ClassifierError>;
}
