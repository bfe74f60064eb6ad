//! OrderFinalizer - Prices and submits a confirmed order.

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::order::{
    ConversationProfile, OrderReceipt, OrderRecord, OrderSlots, OrderStatus, UnitPrices,
    PIZZA_ITEM, TOPPING_ITEM,
};
use crate::ports::{OrderStore, PriceLookup, PriceLookupError};

pub struct OrderFinalizer {
    prices: Arc<dyn PriceLookup>,
    orders: Arc<dyn OrderStore>,
}

impl OrderFinalizer {
    pub fn new(prices: Arc<dyn PriceLookup>, orders: Arc<dyn OrderStore>) -> Self {
        Self { prices, orders }
    }

    async fn unit_prices(&self) -> Result<UnitPrices, PriceLookupError> {
        let pizza = self.prices.lookup_price(PIZZA_ITEM).await?;
        let topping = self.prices.lookup_price(TOPPING_ITEM).await?;
        Ok(UnitPrices::new(pizza, topping))
    }

    /// Prices the order at today's unit prices.
    pub async fn quote(&self, slots: &OrderSlots) -> Result<u32, PriceLookupError> {
        let (Some(quantity), Some(toppings)) = (slots.quantity(), slots.toppings()) else {
            return Err(PriceLookupError::Missing("order".to_string()));
        };
        Ok(self.unit_prices().await?.total(quantity, toppings))
    }

    /// Submits the profile's order and records the outcome.
    ///
    /// The returned profile has empty slots whatever the outcome; only the
    /// outcome status is set. A failed price lookup or submission is a
    /// failed order, not an error.
    ///
    /// # Errors
    ///
    /// Returns `IncompleteOrder` if the slots do not describe an order.
    pub async fn finalize(
        &self,
        profile: ConversationProfile,
    ) -> Result<(ConversationProfile, OrderReceipt), DomainError> {
        let conversation_id = profile.identity.conversation_id.clone();
        let order_type = profile.slots.order_type().ok_or_else(|| {
            DomainError::new(ErrorCode::IncompleteOrder, "Cannot finalize order without a type")
        })?;

        let status = match self.quote(&profile.slots).await {
            Ok(price) => {
                let record = OrderRecord::from_slots(&profile.slots, &profile.identity.user_id, price)?;
                match self.orders.submit_order(&record).await {
                    Ok(()) => {
                        info!(
                            conversation_id = %conversation_id,
                            order_id = %record.id,
                            price = record.price,
                            "Order submitted"
                        );
                        OrderStatus::Success
                    }
                    Err(err) => {
                        error!(conversation_id = %conversation_id, error = %err, "Order submission failed");
                        OrderStatus::Failure
                    }
                }
            }
            Err(err) => {
                warn!(conversation_id = %conversation_id, error = %err, "Price lookup failed at checkout");
                OrderStatus::Failure
            }
        };

        let profile = profile.reset().with_outcome(status);
        Ok((profile, OrderReceipt { status, order_type }))
    }
}
