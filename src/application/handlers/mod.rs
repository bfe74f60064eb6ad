//! Application handlers.
//!
//! Handlers that orchestrate domain operations across ports.

pub mod dialog;

pub use dialog::{BotSettings, DialogPorts, TurnDispatcher, TurnError};
