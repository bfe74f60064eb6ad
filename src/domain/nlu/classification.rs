//! Classifier output and its interpretation.

use serde::{Deserialize, Serialize};

use crate::domain::order::{OrderType, Quantity};

/// Intent labels the ordering flow understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    PizzaDelivery,
    PizzaPickup,
    /// Generic "I want pizza" without a delivery/pickup choice.
    PizzaOrder,
    AddToppings,
    No,
    None,
    Other(String),
}

impl Intent {
    pub fn from_label(label: &str) -> Self {
        match label {
            "pizzaDelivery" => Intent::PizzaDelivery,
            "pizzaPickup" => Intent::PizzaPickup,
            "pizzaOrder" => Intent::PizzaOrder,
            "addToppings" => Intent::AddToppings,
            "no" => Intent::No,
            "None" => Intent::None,
            other => Intent::Other(other.to_string()),
        }
    }

    /// Order type named directly by the intent, if any.
    pub fn order_type(&self) -> Option<OrderType> {
        match self {
            Intent::PizzaDelivery => Some(OrderType::Delivery),
            Intent::PizzaPickup => Some(OrderType::Pickup),
            _ => None,
        }
    }
}

/// Entity type of the classifier's built-in number recognizer.
pub const NUMBER_ENTITY: &str = "builtin.number";
/// Entity type of the topping list entity.
pub const TOPPINGS_ENTITY: &str = "toppings";
/// Substring that marks an intent as belonging to the ordering domain.
pub const PIZZA_DOMAIN_MARKER: &str = "pizza";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityResolution {
    #[serde(default)]
    pub subtype: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub values: Vec<String>,
}

/// A typed value extracted from the utterance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(rename = "type")]
    pub entity_type: String,
    #[serde(default)]
    pub resolution: EntityResolution,
}

impl Entity {
    pub fn number(value: impl Into<String>) -> Self {
        Self {
            entity_type: NUMBER_ENTITY.to_string(),
            resolution: EntityResolution {
                subtype: Some("integer".to_string()),
                value: Some(value.into()),
                values: Vec::new(),
            },
        }
    }

    pub fn toppings<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self {
            entity_type: TOPPINGS_ENTITY.to_string(),
            resolution: EntityResolution {
                subtype: None,
                value: None,
                values: values.into_iter().map(Into::into).collect(),
            },
        }
    }

    /// Positive integer carried by a number entity.
    fn positive_integer(&self) -> Option<Quantity> {
        if self.entity_type != NUMBER_ENTITY
            || self.resolution.subtype.as_deref() != Some("integer")
        {
            return None;
        }
        let raw = self.resolution.value.as_deref()?.trim();
        let n: u32 = raw.parse().ok()?;
        Quantity::new(n).ok()
    }
}

/// Result of classifying one utterance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub top_intent: String,
    #[serde(default)]
    pub entities: Vec<Entity>,
}

impl ClassificationResult {
    pub fn new(top_intent: impl Into<String>) -> Self {
        Self {
            top_intent: top_intent.into(),
            entities: Vec::new(),
        }
    }

    pub fn with_entity(mut self, entity: Entity) -> Self {
        self.entities.push(entity);
        self
    }

    pub fn intent(&self) -> Intent {
        Intent::from_label(&self.top_intent)
    }

    /// True if the top intent belongs to the ordering domain.
    pub fn is_order_domain(&self) -> bool {
        self.top_intent.contains(PIZZA_DOMAIN_MARKER)
    }

    /// The last positive integer among the number entities.
    pub fn quantity(&self) -> Option<Quantity> {
        self.entities.iter().filter_map(Entity::positive_integer).last()
    }

    /// Raw topping names across all topping entities, in order.
    pub fn topping_names(&self) -> Vec<String> {
        self.entities
            .iter()
            .filter(|e| e.entity_type == TOPPINGS_ENTITY)
            .flat_map(|e| e.resolution.values.iter().cloned())
            .collect()
    }
}
