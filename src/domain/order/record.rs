//! Order records submitted to the order store.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode, OrderId, Timestamp, UserId};

use super::{OrderSlots, OrderStatus, OrderType};

/// Status every freshly submitted order starts in.
pub const NEW_ORDER_STATUS: &str = "new order";

/// A completed order as stored by the order store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: OrderId,
    pub order_type: OrderType,
    pub quantity: u32,
    /// Comma-joined topping names, empty when none.
    pub toppings: String,
    pub price: u32,
    pub status: String,
    pub username: String,
    /// Empty for pickup orders.
    pub user_address: String,
    pub created_at: Timestamp,
}

impl OrderRecord {
    /// Builds a record from filled slots.
    ///
    /// # Errors
    ///
    /// Returns `IncompleteOrder` if a required slot is missing, including the
    /// address of a delivery order.
    pub fn from_slots(slots: &OrderSlots, user: &UserId, price: u32) -> Result<Self, DomainError> {
        let missing = |slot: &str| {
            DomainError::new(ErrorCode::IncompleteOrder, "Order is missing a required slot")
                .with_detail("slot", slot)
        };

        let order_type = slots.order_type().ok_or_else(|| missing("order_type"))?;
        let quantity = slots.quantity().ok_or_else(|| missing("quantity"))?;
        let toppings = slots.toppings().ok_or_else(|| missing("toppings"))?;
        let user_address = match (order_type.requires_address(), slots.address()) {
            (true, Some(address)) => address.to_string(),
            (true, None) => return Err(missing("address")),
            (false, _) => String::new(),
        };

        Ok(Self {
            id: OrderId::new(),
            order_type,
            quantity: quantity.value(),
            toppings: toppings.joined(),
            price,
            status: NEW_ORDER_STATUS.to_string(),
            username: user.as_str().to_string(),
            user_address,
            created_at: Timestamp::now(),
        })
    }
}

/// What the conversation learns about a finalized order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReceipt {
    pub status: OrderStatus,
    pub order_type: OrderType,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::{Quantity, Toppings};

    fn user() -> UserId {
        UserId::new("dana").unwrap()
    }

    fn base(order_type: OrderType) -> OrderSlots {
        OrderSlots::empty()
            .with_order_type(order_type)
            .with_quantity(Quantity::new(2).unwrap())
            .with_toppings(Toppings::new(vec!["olives".into(), "corn".into()]))
    }

    #[test]
    fn delivery_record_carries_address() {
        let slots = base(OrderType::Delivery).with_address("Herzl 1");
        let record = OrderRecord::from_slots(&slots, &user(), 120).unwrap();

        assert_eq!(record.user_address, "Herzl 1");
        assert_eq!(record.toppings, "olives, corn");
        assert_eq!(record.status, NEW_ORDER_STATUS);
        assert_eq!(record.username, "dana");
        assert_eq!(record.price, 120);
    }

    #[test]
    fn pickup_record_has_empty_address() {
        let record = OrderRecord::from_slots(&base(OrderType::Pickup), &user(), 10).unwrap();
        assert_eq!(record.user_address, "");
    }

    #[test]
    fn delivery_without_address_is_incomplete() {
        let err = OrderRecord::from_slots(&base(OrderType::Delivery), &user(), 10).unwrap_err();
        assert_eq!(err.code, ErrorCode::IncompleteOrder);
        assert_eq!(err.details.get("slot"), Some(&"address".to_string()));
    }

    #[test]
    fn plain_pizza_has_empty_toppings_column() {
        let slots = base(OrderType::Pickup).with_toppings(Toppings::none());
        let record = OrderRecord::from_slots(&slots, &user(), 10).unwrap();
        assert_eq!(record.toppings, "");
    }
}
