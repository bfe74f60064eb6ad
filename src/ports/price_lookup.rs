//! Price Lookup Port - Unit prices from the price cache.

use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PriceLookupError {
    #[error("Price cache unavailable: {0}")]
    Unavailable(String),

    #[error("No price for item: {0}")]
    Missing(String),

    #[error("Invalid price for item {item}: {value}")]
    Invalid { item: String, value: String },
}

#[async_trait]
pub trait PriceLookup: Send + Sync {
    /// Returns the current unit price of `item` (e.g. `pizza`, `topping`).
    async fn lookup_price(&self, item: &str) -> Result<u32, PriceLookupError>;
}
