//! Dialog module - The slot-filling conversation flow.
//!
//! Holds the dialog stack, the order state machine, the controller that picks
//! the next slot to fill, the slot validators, and the bot's fixed wording.
//! Everything here is pure; the async orchestration lives in
//! `application::handlers`.

mod choice;
mod controller;
mod stack;
mod state;
pub mod templates;
mod validators;

pub use choice::recognize_choice;
pub use controller::SlotFillingController;
pub use stack::{DialogFrame, DialogId, DialogResult, DialogStack, DialogState, TurnStatus};
pub use state::OrderState;
pub use templates::Prompt;
pub use validators::{
    seed_slots, validate_address, validate_order_type, validate_quantity, validate_toppings,
    SlotValidation,
};
