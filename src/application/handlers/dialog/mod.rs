//! Dialog handlers - Run a conversation turn through the dialog engine.
//!
//! `TurnDispatcher` is the single entry point. It owns a `DialogRunner`,
//! which executes dialog steps, validates replies with `PromptValidator`
//! and hands confirmed orders to `OrderFinalizer`.

mod dialog_runner;
mod errors;
mod order_finalizer;
mod prompt_validator;
mod settings;
mod turn_context;
mod turn_dispatcher;
mod welcome_member;

pub use dialog_runner::{DialogRunner, TurnResult};
pub use errors::TurnError;
pub use order_finalizer::OrderFinalizer;
pub use prompt_validator::{PromptValidator, Recognized};
pub use settings::BotSettings;
pub use turn_context::TurnContext;
pub use turn_dispatcher::{DialogPorts, TurnDispatcher};
pub use welcome_member::WelcomeMemberHandler;
