//! HTTP adapter for the channel endpoint.

mod dto;
mod handlers;
mod reply_collector;
mod routes;

pub use dto::{ActivityRequest, ConversationRef, ErrorResponse, HealthResponse, TurnResponse};
pub use handlers::BotHandlers;
pub use reply_collector::ReplyCollector;
pub use routes::{app_router, bot_routes};
