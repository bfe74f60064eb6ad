//! Application layer - Handlers that run conversation turns.
//!
//! This layer drives the dialog domain through the ports. It holds no I/O of
//! its own.

pub mod handlers;

pub use handlers::{BotSettings, DialogPorts, TurnDispatcher, TurnError};
