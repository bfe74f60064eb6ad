//! Order Store Port - Where completed orders go.

use async_trait::async_trait;

use crate::domain::order::OrderRecord;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderStoreError {
    #[error("Order store unavailable: {0}")]
    Unavailable(String),

    #[error("Order rejected: {0}")]
    Rejected(String),
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persists a new order.
    async fn submit_order(&self, record: &OrderRecord) -> Result<(), OrderStoreError>;
}
