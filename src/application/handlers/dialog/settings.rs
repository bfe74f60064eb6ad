//! Bot-level settings used while running turns.

use crate::domain::order::ToppingMenu;

#[derive(Debug, Clone)]
pub struct BotSettings {
    /// Join events for a member with this name are the bot itself.
    pub bot_name: String,
    /// Offered when an order cannot be submitted.
    pub fallback_phone: String,
    /// Media of the completion card. No card is sent when empty.
    pub completion_gif_url: String,
    pub currency: String,
    pub menu: ToppingMenu,
}

impl Default for BotSettings {
    fn default() -> Self {
        Self {
            bot_name: "PizzaBot".to_string(),
            fallback_phone: "03-6324422".to_string(),
            completion_gif_url: String::new(),
            currency: "NIS".to_string(),
            menu: ToppingMenu::default(),
        }
    }
}
