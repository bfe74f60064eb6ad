//! Order slot values.
//!
//! `OrderSlots` is an immutable value: every `with_*` method consumes the
//! current slots and returns the next ones. Filling any of the priced slots
//! drops a previously quoted price, so a price can only exist alongside a
//! complete order type, quantity and toppings selection.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// How the customer receives the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    Delivery,
    Pickup,
}

impl OrderType {
    /// Returns the wire label for this order type.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Delivery => "delivery",
            OrderType::Pickup => "pickup",
        }
    }

    /// Returns true if an address must be collected for this order type.
    pub fn requires_address(&self) -> bool {
        matches!(self, OrderType::Delivery)
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Number of pizzas in an order. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// Creates a quantity, rejecting zero.
    pub fn new(value: u32) -> Result<Self, ValidationError> {
        if value == 0 {
            return Err(ValidationError::out_of_range(
                "quantity",
                1,
                i64::from(u32::MAX),
                0,
            ));
        }
        Ok(Self(value))
    }

    /// Returns the raw count.
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for Quantity {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(q: Quantity) -> Self {
        q.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordered topping selection. An empty selection means the user declined
/// toppings, which is distinct from not having been asked yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Toppings(Vec<String>);

impl Toppings {
    /// The "no toppings, thanks" selection.
    pub fn none() -> Self {
        Self(Vec::new())
    }

    pub fn new(items: Vec<String>) -> Self {
        Self(items)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn items(&self) -> &[String] {
        &self.0
    }

    /// Returns a selection with `more` appended, skipping duplicates.
    pub fn extended(mut self, more: Toppings) -> Self {
        for item in more.0 {
            if !self.0.contains(&item) {
                self.0.push(item);
            }
        }
        self
    }

    /// Comma-joined form used in order records; empty when none.
    pub fn joined(&self) -> String {
        self.0.join(", ")
    }
}

/// The pieces of order information collected during a conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSlots {
    order_type: Option<OrderType>,
    quantity: Option<Quantity>,
    toppings: Option<Toppings>,
    address: Option<String>,
    price: Option<u32>,
}

impl OrderSlots {
    /// Creates empty slots.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn order_type(&self) -> Option<OrderType> {
        self.order_type
    }

    pub fn quantity(&self) -> Option<Quantity> {
        self.quantity
    }

    pub fn toppings(&self) -> Option<&Toppings> {
        self.toppings.as_ref()
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn price(&self) -> Option<u32> {
        self.price
    }

    /// Returns true if no slot holds a value.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Returns true once order type, quantity and toppings are all known.
    pub fn is_priceable(&self) -> bool {
        self.order_type.is_some() && self.quantity.is_some() && self.toppings.is_some()
    }

    pub fn with_order_type(self, order_type: OrderType) -> Self {
        Self {
            order_type: Some(order_type),
            price: None,
            ..self
        }
    }

    pub fn with_quantity(self, quantity: Quantity) -> Self {
        Self {
            quantity: Some(quantity),
            price: None,
            ..self
        }
    }

    /// Replaces the topping selection.
    pub fn with_toppings(self, toppings: Toppings) -> Self {
        Self {
            toppings: Some(toppings),
            price: None,
            ..self
        }
    }

    /// Adds toppings to any existing selection.
    pub fn with_more_toppings(self, toppings: Toppings) -> Self {
        let merged = match self.toppings.clone() {
            Some(existing) => existing.extended(toppings),
            None => Toppings::none().extended(toppings),
        };
        self.with_toppings(merged)
    }

    pub fn with_address(self, address: impl Into<String>) -> Self {
        Self {
            address: Some(address.into()),
            ..self
        }
    }

    /// Records the quoted price. Fails unless the order is priceable.
    pub fn with_price(self, price: u32) -> Result<Self, ValidationError> {
        if !self.is_priceable() {
            return Err(ValidationError::invalid_format(
                "price",
                "order type, quantity and toppings must be set before pricing",
            ));
        }
        Ok(Self {
            price: Some(price),
            ..self
        })
    }
}
