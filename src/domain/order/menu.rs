//! Topping vocabulary.
//!
//! Topping names reported by the classifier are open-ended strings. The menu
//! narrows them to the toppings the shop actually offers.

use super::Toppings;

/// Bounded set of toppings the shop offers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToppingMenu {
    items: Vec<String>,
}

impl ToppingMenu {
    /// Builds a menu from raw names. Names are normalized and deduplicated.
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for item in items {
            let name = normalize(item.as_ref());
            if !name.is_empty() && !normalized.contains(&name) {
                normalized.push(name);
            }
        }
        Self { items: normalized }
    }

    /// Parses a comma separated list, e.g. `"olives, corn"`.
    pub fn parse(list: &str) -> Self {
        Self::new(list.split(','))
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.contains(&normalize(name))
    }

    /// Keeps the recognized names that are on the menu, in input order and
    /// without duplicates.
    pub fn resolve<S: AsRef<str>>(&self, names: &[S]) -> Toppings {
        let mut out: Vec<String> = Vec::new();
        for name in names {
            let name = normalize(name.as_ref());
            if self.items.contains(&name) && !out.contains(&name) {
                out.push(name);
            }
        }
        Toppings::new(out)
    }
}

impl Default for ToppingMenu {
    fn default() -> Self {
        Self::parse(DEFAULT_MENU)
    }
}

/// Toppings offered when nothing else is configured.
pub const DEFAULT_MENU: &str =
    "olives,mushrooms,onions,peppers,tomatoes,corn,pineapple,extra cheese";

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}
