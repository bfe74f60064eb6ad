//! Conversation State Ports - Per-conversation profile and dialog state.
//!
//! Both stores follow a get-then-set-at-end-of-turn pattern. They are safe
//! only while the transport delivers one turn at a time per conversation.

use async_trait::async_trait;

use crate::domain::dialog::DialogState;
use crate::domain::foundation::ConversationId;
use crate::domain::order::ConversationProfile;

/// Errors from conversation state storage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("State store unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to (de)serialize state: {0}")]
    Serialization(String),
}

/// Port for the per-conversation profile.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Returns the profile, or `None` if the conversation has none yet.
    async fn get_profile(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Option<ConversationProfile>, StoreError>;

    async fn set_profile(
        &self,
        conversation_id: &ConversationId,
        profile: &ConversationProfile,
    ) -> Result<(), StoreError>;
}

/// Port for the per-conversation dialog stack.
#[async_trait]
pub trait DialogStateStore: Send + Sync {
    /// Returns the saved dialog state, or an empty one.
    async fn load_dialog(&self, conversation_id: &ConversationId)
        -> Result<DialogState, StoreError>;

    async fn save_dialog(
        &self,
        conversation_id: &ConversationId,
        state: &DialogState,
    ) -> Result<(), StoreError>;

    /// Drops the dialog state so the next turn starts fresh.
    async fn clear_dialog(&self, conversation_id: &ConversationId) -> Result<(), StoreError>;
}
