//! In-memory conversation log.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{ConversationId, Timestamp, UserId};
use crate::domain::order::TurnLog;
use crate::ports::{ConversationLog, ConversationLogError};

/// A logged conversation and its turns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedConversation {
    pub user: UserId,
    pub turns: Vec<TurnLog>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryConversationLog {
    conversations: Arc<RwLock<HashMap<ConversationId, LoggedConversation>>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub async fn conversation(&self, id: &ConversationId) -> Option<LoggedConversation> {
        self.conversations.read().await.get(id).cloned()
    }

    fn check_available(&self) -> Result<(), ConversationLogError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(ConversationLogError::Unavailable("log disabled".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ConversationLog for InMemoryConversationLog {
    async fn create_conversation(
        &self,
        conversation_id: &ConversationId,
        user: &UserId,
    ) -> Result<(), ConversationLogError> {
        self.check_available()?;
        let now = Timestamp::now();
        self.conversations.write().await.insert(
            conversation_id.clone(),
            LoggedConversation {
                user: user.clone(),
                turns: Vec::new(),
                created_at: now,
                updated_at: now,
            },
        );
        Ok(())
    }

    async fn save_turn(
        &self,
        conversation_id: &ConversationId,
        turn: &TurnLog,
    ) -> Result<(), ConversationLogError> {
        self.check_available()?;
        let mut conversations = self.conversations.write().await;
        let conversation = conversations
            .get_mut(conversation_id)
            .ok_or_else(|| ConversationLogError::NotFound(conversation_id.clone()))?;
        conversation.turns.push(turn.clone());
        conversation.updated_at = Timestamp::now();
        Ok(())
    }
}
