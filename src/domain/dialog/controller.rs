//! Slot-filling controller.
//!
//! Decides which sub-dialog the top-level dialog hands over to. The first
//! missing slot wins, checked in a fixed order.

use crate::domain::order::OrderSlots;

use super::DialogId;

pub struct SlotFillingController;

impl SlotFillingController {
    /// Returns the sub-dialog that fills the first missing slot, or the
    /// summary once nothing is missing.
    pub fn next_dialog(slots: &OrderSlots) -> DialogId {
        let Some(order_type) = slots.order_type() else {
            return DialogId::OrderType;
        };
        if slots.quantity().is_none() {
            return DialogId::Quantity;
        }
        if slots.toppings().is_none() {
            return DialogId::Toppings;
        }
        if order_type.requires_address() && slots.address().is_none() {
            return DialogId::Address;
        }
        DialogId::Summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::{OrderType, Quantity, Toppings};
    use proptest::prelude::*;

    fn fill(slots: OrderSlots, dialog: DialogId, order_type: OrderType) -> OrderSlots {
        match dialog {
            DialogId::OrderType => slots.with_order_type(order_type),
            DialogId::Quantity => slots.with_quantity(Quantity::new(1).unwrap()),
            DialogId::Toppings => slots.with_toppings(Toppings::none()),
            DialogId::Address => slots.with_address("Herzl 1"),
            _ => slots,
        }
    }

    mod decisions {
        use super::*;

        #[test]
        fn empty_slots_ask_for_order_type() {
            assert_eq!(
                SlotFillingController::next_dialog(&OrderSlots::empty()),
                DialogId::OrderType
            );
        }

        #[test]
        fn seeded_delivery_asks_for_quantity() {
            let slots = OrderSlots::empty().with_order_type(OrderType::Delivery);
            assert_eq!(SlotFillingController::next_dialog(&slots), DialogId::Quantity);
        }

        #[test]
        fn declined_toppings_skip_toppings_dialog() {
            let slots = OrderSlots::empty()
                .with_order_type(OrderType::Pickup)
                .with_quantity(Quantity::new(1).unwrap())
                .with_toppings(Toppings::none());
            assert_eq!(SlotFillingController::next_dialog(&slots), DialogId::Summary);
        }

        #[test]
        fn absent_toppings_enter_toppings_dialog() {
            let slots = OrderSlots::empty()
                .with_order_type(OrderType::Pickup)
                .with_quantity(Quantity::new(1).unwrap());
            assert_eq!(SlotFillingController::next_dialog(&slots), DialogId::Toppings);
        }

        #[test]
        fn delivery_needs_address_before_summary() {
            let slots = OrderSlots::empty()
                .with_order_type(OrderType::Delivery)
                .with_quantity(Quantity::new(1).unwrap())
                .with_toppings(Toppings::none());
            assert_eq!(SlotFillingController::next_dialog(&slots), DialogId::Address);
        }

        #[test]
        fn quantity_before_order_type_still_asks_order_type_first() {
            let slots = OrderSlots::empty().with_quantity(Quantity::new(3).unwrap());
            assert_eq!(SlotFillingController::next_dialog(&slots), DialogId::OrderType);
        }
    }

    proptest! {
        #[test]
        fn visits_missing_slots_in_fixed_order_once_each(
            delivery in any::<bool>(),
            seed_type in any::<bool>(),
            seed_quantity in any::<bool>(),
            seed_toppings in any::<bool>(),
        ) {
            let order_type = if delivery { OrderType::Delivery } else { OrderType::Pickup };
            let mut slots = OrderSlots::empty();
            if seed_type {
                slots = slots.with_order_type(order_type);
            }
            if seed_quantity {
                slots = slots.with_quantity(Quantity::new(2).unwrap());
            }
            if seed_toppings {
                slots = slots.with_toppings(Toppings::new(vec!["corn".into()]));
            }

            let mut expected = Vec::new();
            if !seed_type { expected.push(DialogId::OrderType); }
            if !seed_quantity { expected.push(DialogId::Quantity); }
            if !seed_toppings { expected.push(DialogId::Toppings); }
            if delivery { expected.push(DialogId::Address); }
            expected.push(DialogId::Summary);

            let mut visited = Vec::new();
            loop {
                let next = SlotFillingController::next_dialog(&slots);
                visited.push(next);
                if next == DialogId::Summary || visited.len() > 5 {
                    break;
                }
                slots = fill(slots, next, order_type);
            }

            prop_assert_eq!(visited, expected);
        }
    }
}
