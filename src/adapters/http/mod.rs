//! HTTP adapters - the channel-facing REST surface.

pub mod bot;

pub use bot::{app_router, BotHandlers};
