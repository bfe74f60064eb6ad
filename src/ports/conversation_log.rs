//! Conversation Log Port - Per-conversation transcript for statistics.
//!
//! Writes are fire-and-forget from the engine's point of view: failures are
//! logged and never change the outcome of a turn.

use async_trait::async_trait;

use crate::domain::foundation::{ConversationId, UserId};
use crate::domain::order::TurnLog;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversationLogError {
    #[error("Conversation log unavailable: {0}")]
    Unavailable(String),

    #[error("Conversation not found: {0}")]
    NotFound(ConversationId),
}

#[async_trait]
pub trait ConversationLog: Send + Sync {
    /// Creates the conversation document with no turns.
    async fn create_conversation(
        &self,
        conversation_id: &ConversationId,
        user: &UserId,
    ) -> Result<(), ConversationLogError>;

    /// Appends one turn's messages to the conversation.
    async fn save_turn(
        &self,
        conversation_id: &ConversationId,
        turn: &TurnLog,
    ) -> Result<(), ConversationLogError>;
}
