//! Fixed bot wording.

use crate::domain::order::{OrderSlots, OrderType};

use super::DialogId;

/// Initial and retry wording of a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prompt {
    pub text: &'static str,
    pub retry: &'static str,
}

impl Prompt {
    /// Wording for the given attempt. Attempts after the first use the retry text.
    pub fn for_attempt(&self, attempt: u32) -> &'static str {
        if attempt > 1 {
            self.retry
        } else {
            self.text
        }
    }
}

pub const ORDER_TYPE_PROMPT: Prompt = Prompt {
    text: "No problem! would you like to make a delivery or a pickup?",
    retry: "Your answer is unclear to me. is that a delivery or a pickup?",
};

pub const QUANTITY_PROMPT: Prompt = Prompt {
    text: "How many pizzas would you like to order?",
    retry: "I can't figure out the amount you want. Please try again",
};

pub const TOPPINGS_PROMPT: Prompt = Prompt {
    text: "What toppings would you like to add on your pizza?",
    retry: "Unfortunately we don't have these toppings. Would you like anything else?",
};

pub const ADDRESS_PROMPT: Prompt = Prompt {
    text: "Where should I deliver your order?",
    retry: "Please tell me the delivery address",
};

pub const CHOICE_RETRY: &str = "Please make a choice from the list";

pub const CONFIRM_CHOICES: [&str; 2] = ["yes", "no"];

pub const QUANTITY_ACK: &str = "Alright!";
pub const TOPPINGS_ACK: &str = "I like your choice! we will add to your pizza the toppings we offer.";
pub const PLAIN_PIZZA_ACK: &str = "Plain pizza sounds perfect!";

pub const SUMMARY_INTRO: &str =
    "We are almost done! I just want to validate that everything is OK with your order";

pub const SERVICE_APOLOGY: &str =
    "I'm sorry for the inconvenience but I can't help you right now. Please try to contact me later";

pub const PRICE_APOLOGY: &str = "I can't calculate the total of your order right now.";

pub const QNA_APOLOGY: &str = "That doesn't mean anything to me :/ Can you try to be more specific?";

pub const CANCELLED: &str =
    "Your order is cancelled. feel free to reach me if you would like to make a new one";

pub const COMPLETION_CARD_TITLE: &str = "Bon Appetit!";

/// Prompt wording of a slot dialog.
pub fn slot_prompt(dialog: DialogId) -> Option<Prompt> {
    match dialog {
        DialogId::OrderType => Some(ORDER_TYPE_PROMPT),
        DialogId::Quantity => Some(QUANTITY_PROMPT),
        DialogId::Toppings => Some(TOPPINGS_PROMPT),
        DialogId::Address => Some(ADDRESS_PROMPT),
        _ => None,
    }
}

pub fn order_type_ack(order_type: OrderType) -> String {
    format!("Great! {} it is", order_type)
}

pub fn toppings_ack(declined: bool) -> &'static str {
    if declined {
        PLAIN_PIZZA_ACK
    } else {
        TOPPINGS_ACK
    }
}

/// One-line description of the order, e.g.
/// `a delivery of 2 pizzas with olives, corn to Herzl 1`.
pub fn order_summary(slots: &OrderSlots) -> String {
    let order_type = slots
        .order_type()
        .map(|t| t.as_str())
        .unwrap_or("pizza order");
    let quantity = match slots.quantity().map(|q| q.value()) {
        Some(n) if n > 1 => format!("{} pizzas", n),
        _ => "a pizza".to_string(),
    };
    let toppings = match slots.toppings() {
        Some(t) if !t.is_empty() => t.joined(),
        _ => "no toppings".to_string(),
    };
    let address = match (slots.order_type(), slots.address()) {
        (Some(OrderType::Delivery), Some(address)) => format!(" to {}", address),
        _ => String::new(),
    };
    format!("a {} of {} with {}{}", order_type, quantity, toppings, address)
}

pub fn confirmation_prompt(price: Option<u32>, currency: &str) -> String {
    match price {
        Some(price) => format!(
            "Would you like to approve the order for a total of {} {}?",
            price, currency
        ),
        None => "Would you like to approve the order?".to_string(),
    }
}

pub fn completion_message(order_type: OrderType) -> String {
    let phrase = match order_type {
        OrderType::Delivery => "You should expect your delivery in the next 30-40 minutes",
        OrderType::Pickup => "You will be able to pick-up your order in 15-20 minutes",
    };
    format!("Thank you for your order! {}", phrase)
}

pub fn submission_failure_message(fallback_phone: &str) -> String {
    format!(
        "It's embarrassing but we can't process your order at the moment. Sorry for the inconvenience. \
         You can try and call our place at {} or try me again later.",
        fallback_phone
    )
}

pub fn welcome_message(name: &str) -> String {
    format!("Hi there {}. How can I help you?", name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::{Quantity, Toppings};

    #[test]
    fn retry_wording_after_first_attempt() {
        assert_eq!(QUANTITY_PROMPT.for_attempt(1), QUANTITY_PROMPT.text);
        assert_eq!(QUANTITY_PROMPT.for_attempt(2), QUANTITY_PROMPT.retry);
        assert_eq!(QUANTITY_PROMPT.for_attempt(7), QUANTITY_PROMPT.retry);
    }

    #[test]
    fn summary_of_delivery_with_toppings() {
        let slots = OrderSlots::empty()
            .with_order_type(OrderType::Delivery)
            .with_quantity(Quantity::new(2).unwrap())
            .with_toppings(Toppings::new(vec!["olives".into(), "corn".into()]))
            .with_address("Herzl 1");
        assert_eq!(
            order_summary(&slots),
            "a delivery of 2 pizzas with olives, corn to Herzl 1"
        );
    }

    #[test]
    fn summary_of_single_plain_pickup() {
        let slots = OrderSlots::empty()
            .with_order_type(OrderType::Pickup)
            .with_quantity(Quantity::new(1).unwrap())
            .with_toppings(Toppings::none());
        assert_eq!(order_summary(&slots), "a pickup of a pizza with no toppings");
    }

    #[test]
    fn confirmation_quotes_price_when_known() {
        assert_eq!(
            confirmation_prompt(Some(110), "NIS"),
            "Would you like to approve the order for a total of 110 NIS?"
        );
        assert_eq!(confirmation_prompt(None, "NIS"), "Would you like to approve the order?");
    }

    #[test]
    fn failure_message_includes_phone() {
        assert!(submission_failure_message("03-6324422").contains("03-6324422"));
    }

    #[test]
    fn completion_wording_depends_on_order_type() {
        assert!(completion_message(OrderType::Delivery).contains("30-40 minutes"));
        assert!(completion_message(OrderType::Pickup).contains("15-20 minutes"));
    }

    #[test]
    fn only_slot_dialogs_have_prompts() {
        assert!(slot_prompt(DialogId::Address).is_some());
        assert!(slot_prompt(DialogId::Summary).is_none());
    }
}
