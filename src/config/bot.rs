//! Bot behaviour configuration

use serde::Deserialize;

use crate::application::BotSettings;
use crate::domain::order::{ToppingMenu, DEFAULT_MENU};

use super::error::ValidationError;

/// Bot configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Join events for a member with this name are ignored
    #[serde(default = "default_name")]
    pub name: String,

    /// Phone number offered when an order cannot be submitted
    #[serde(default = "default_fallback_phone")]
    pub fallback_phone: String,

    /// Media of the order completion card; no card when empty
    #[serde(default)]
    pub completion_gif_url: String,

    #[serde(default = "default_currency")]
    pub currency: String,

    /// Comma-separated toppings the shop offers
    #[serde(default = "default_menu")]
    pub menu: String,
}

impl BotConfig {
    pub fn topping_menu(&self) -> ToppingMenu {
        ToppingMenu::parse(&self.menu)
    }

    /// Settings the dialog engine runs with.
    pub fn settings(&self) -> BotSettings {
        BotSettings {
            bot_name: self.name.clone(),
            fallback_phone: self.fallback_phone.clone(),
            completion_gif_url: self.completion_gif_url.clone(),
            currency: self.currency.clone(),
            menu: self.topping_menu(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingRequired("BOT_NAME"));
        }
        if self.fallback_phone.trim().is_empty() {
            return Err(ValidationError::MissingRequired("BOT_FALLBACK_PHONE"));
        }
        if self.topping_menu().items().is_empty() {
            return Err(ValidationError::EmptyMenu);
        }
        Ok(())
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            fallback_phone: default_fallback_phone(),
            completion_gif_url: String::new(),
            currency: default_currency(),
            menu: default_menu(),
        }
    }
}

fn default_name() -> String {
    "PizzaBot".to_string()
}

fn default_fallback_phone() -> String {
    "03-6324422".to_string()
}

fn default_currency() -> String {
    "NIS".to_string()
}

fn default_menu() -> String {
    DEFAULT_MENU.to_string()
}
