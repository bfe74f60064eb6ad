//! Domain layer - Pure business logic with no external dependencies.
//!
//! - `foundation` - Shared primitives (ids, timestamps, errors, state machine)
//! - `order` - Order slots, menu, pricing, and the conversation profile
//! - `nlu` - Classifier and Q&A results
//! - `dialog` - Dialog stack, order state machine, controller, validators
//! - `conversation` - Inbound activities and outbound messages

pub mod conversation;
pub mod dialog;
pub mod foundation;
pub mod nlu;
pub mod order;
