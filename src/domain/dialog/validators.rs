//! Slot validators.
//!
//! Pure checks of a classified reply against the slot being prompted for. An
//! accepted reply yields the next slots; a rejected one leaves the current
//! slots untouched.

use crate::domain::nlu::{ClassificationResult, Intent};
use crate::domain::order::{OrderSlots, ToppingMenu, Toppings};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotValidation {
    Accepted(OrderSlots),
    Rejected,
}

impl SlotValidation {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SlotValidation::Accepted(_))
    }
}

/// Accepts only intents that name delivery or pickup directly.
pub fn validate_order_type(slots: &OrderSlots, result: &ClassificationResult) -> SlotValidation {
    match result.intent().order_type() {
        Some(order_type) => SlotValidation::Accepted(slots.clone().with_order_type(order_type)),
        None => SlotValidation::Rejected,
    }
}

/// Accepts a positive integer number entity.
pub fn validate_quantity(slots: &OrderSlots, result: &ClassificationResult) -> SlotValidation {
    match result.quantity() {
        Some(quantity) => SlotValidation::Accepted(slots.clone().with_quantity(quantity)),
        None => SlotValidation::Rejected,
    }
}

/// Accepts an add-toppings reply naming at least one topping on the menu, or
/// an explicit "no", which records that the user wants no toppings.
pub fn validate_toppings(
    slots: &OrderSlots,
    result: &ClassificationResult,
    menu: &ToppingMenu,
) -> SlotValidation {
    match result.intent() {
        Intent::AddToppings => {
            let toppings = menu.resolve(&result.topping_names());
            if toppings.is_empty() {
                SlotValidation::Rejected
            } else {
                SlotValidation::Accepted(slots.clone().with_more_toppings(toppings))
            }
        }
        Intent::No => SlotValidation::Accepted(slots.clone().with_toppings(Toppings::none())),
        _ => SlotValidation::Rejected,
    }
}

/// Accepts any non-blank text verbatim.
pub fn validate_address(slots: &OrderSlots, text: &str) -> SlotValidation {
    if text.trim().is_empty() {
        SlotValidation::Rejected
    } else {
        SlotValidation::Accepted(slots.clone().with_address(text))
    }
}

/// Fills whatever slots an opening utterance already names.
pub fn seed_slots(
    slots: OrderSlots,
    result: &ClassificationResult,
    menu: &ToppingMenu,
) -> OrderSlots {
    let mut slots = slots;
    if let Some(order_type) = result.intent().order_type() {
        slots = slots.with_order_type(order_type);
    }
    if let Some(quantity) = result.quantity() {
        slots = slots.with_quantity(quantity);
    }
    let toppings = menu.resolve(&result.topping_names());
    if !toppings.is_empty() {
        slots = slots.with_more_toppings(toppings);
    }
    slots
}
