//! Message Sink Port - The "send" capability handed to a turn.

use async_trait::async_trait;

use crate::domain::conversation::OutboundMessage;
use crate::domain::foundation::ConversationId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Failed to send message: {0}")]
pub struct SinkError(pub String);

#[async_trait]
pub trait MessageSink: Send + Sync {
    async fn send(
        &self,
        conversation_id: &ConversationId,
        message: OutboundMessage,
    ) -> Result<(), SinkError>;
}
