//! Order module - What the customer is buying.
//!
//! Slot values, the topping menu, pricing, the per-conversation profile, and
//! the record handed to the order store.

mod menu;
mod pricing;
mod profile;
mod record;
mod slots;

pub use menu::{ToppingMenu, DEFAULT_MENU};
pub use pricing::{UnitPrices, PIZZA_ITEM, TOPPING_ITEM};
pub use profile::{ConversationProfile, Identity, OrderStatus, Outcome, TurnLog};
pub use record::{OrderReceipt, OrderRecord, NEW_ORDER_STATUS};
pub use slots::{OrderSlots, OrderType, Quantity, Toppings};
