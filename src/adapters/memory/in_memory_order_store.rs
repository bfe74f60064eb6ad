//! In-memory order store with failure injection.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::order::OrderRecord;
use crate::ports::{OrderStore, OrderStoreError};

#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<Vec<OrderRecord>>>,
    failing: Arc<AtomicBool>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every submission fail until switched back.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub async fn orders(&self) -> Vec<OrderRecord> {
        self.orders.read().await.clone()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn submit_order(&self, record: &OrderRecord) -> Result<(), OrderStoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(OrderStoreError::Unavailable("order store disabled".to_string()));
        }
        self.orders.write().await.push(record.clone());
        Ok(())
    }
}
