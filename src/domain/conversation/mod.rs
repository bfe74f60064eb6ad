//! Conversation module - What comes in from and goes out to the channel.

mod activity;
mod outbound;

pub use activity::{Activity, ActivityKind, ChannelAccount};
pub use outbound::OutboundMessage;
