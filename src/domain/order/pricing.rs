//! Order pricing.

use serde::{Deserialize, Serialize};

use super::{Quantity, Toppings};

/// Item keys understood by the price cache.
pub const PIZZA_ITEM: &str = "pizza";
pub const TOPPING_ITEM: &str = "topping";

/// Unit prices read from the price cache at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitPrices {
    pub pizza: u32,
    pub topping: u32,
}

impl UnitPrices {
    pub fn new(pizza: u32, topping: u32) -> Self {
        Self { pizza, topping }
    }

    /// `quantity × (pizza + topping_count × topping)`, saturating on overflow.
    pub fn total(&self, quantity: Quantity, toppings: &Toppings) -> u32 {
        let count = u32::try_from(toppings.len()).unwrap_or(u32::MAX);
        let one = self
            .pizza
            .saturating_add(count.saturating_mul(self.topping));
        quantity.value().saturating_mul(one)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn toppings(n: usize) -> Toppings {
        Toppings::new((0..n).map(|i| format!("t{}", i)).collect())
    }

    #[test]
    fn two_pizzas_with_olives() {
        let prices = UnitPrices::new(50, 5);
        let total = prices.total(Quantity::new(2).unwrap(), &Toppings::new(vec!["olives".into()]));
        assert_eq!(total, 110);
    }

    #[test]
    fn plain_pizza_costs_base_price() {
        let prices = UnitPrices::new(42, 7);
        assert_eq!(prices.total(Quantity::new(1).unwrap(), &Toppings::none()), 42);
    }

    proptest! {
        #[test]
        fn total_matches_formula(
            q in 1u32..50,
            n in 0usize..8,
            pizza in 0u32..500,
            topping in 0u32..50,
        ) {
            let prices = UnitPrices::new(pizza, topping);
            let expected = q * (pizza + n as u32 * topping);
            prop_assert_eq!(prices.total(Quantity::new(q).unwrap(), &toppings(n)), expected);
        }

        #[test]
        fn total_is_deterministic(q in 1u32..50, n in 0usize..8) {
            let prices = UnitPrices::new(50, 5);
            let quantity = Quantity::new(q).unwrap();
            prop_assert_eq!(prices.total(quantity, &toppings(n)), prices.total(quantity, &toppings(n)));
        }
    }
}
