//! Fixed price table.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use crate::domain::order::{PIZZA_ITEM, TOPPING_ITEM};
use crate::ports::{PriceLookup, PriceLookupError};

/// Serves prices from a fixed table. Can be switched to fail every lookup.
#[derive(Debug, Clone)]
pub struct FixedPriceLookup {
    prices: HashMap<String, u32>,
    unavailable: Arc<AtomicBool>,
    lookups: Arc<AtomicUsize>,
}

impl FixedPriceLookup {
    /// Prices for a pizza and a single topping.
    pub fn new(pizza: u32, topping: u32) -> Self {
        let mut prices = HashMap::new();
        prices.insert(PIZZA_ITEM.to_string(), pizza);
        prices.insert(TOPPING_ITEM.to_string(), topping);
        Self {
            prices,
            unavailable: Arc::new(AtomicBool::new(false)),
            lookups: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PriceLookup for FixedPriceLookup {
    async fn lookup_price(&self, item: &str) -> Result<u32, PriceLookupError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(PriceLookupError::Unavailable("price table disabled".to_string()));
        }
        self.prices
            .get(item)
            .copied()
            .ok_or_else(|| PriceLookupError::Missing(item.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serves_configured_prices() {
        let prices = FixedPriceLookup::new(50, 5);
        assert_eq!(prices.lookup_price("pizza").await, Ok(50));
        assert_eq!(prices.lookup_price("topping").await, Ok(5));
        assert!(matches!(
            prices.lookup_price("drink").await,
            Err(PriceLookupError::Missing(_))
        ));
        assert_eq!(prices.lookup_count(), 3);
    }
}
