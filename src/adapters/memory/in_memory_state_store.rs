//! In-Memory Conversation State Store
//!
//! Keeps profiles and dialog state in process memory. Useful for testing and
//! development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::dialog::DialogState;
use crate::domain::foundation::ConversationId;
use crate::domain::order::ConversationProfile;
use crate::ports::{DialogStateStore, ProfileStore, StoreError};

#[derive(Debug, Clone, Default)]
pub struct InMemoryStateStore {
    profiles: Arc<RwLock<HashMap<ConversationId, ConversationProfile>>>,
    dialogs: Arc<RwLock<HashMap<ConversationId, DialogState>>>,
    fail_writes: Arc<AtomicBool>,
}

impl InMemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent write fail with `StoreError::Unavailable`.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Seeds a profile directly (test setup).
    pub async fn insert_profile(&self, profile: ConversationProfile) {
        self.profiles
            .write()
            .await
            .insert(profile.identity.conversation_id.clone(), profile);
    }

    pub async fn profile(&self, id: &ConversationId) -> Option<ConversationProfile> {
        self.profiles.read().await.get(id).cloned()
    }

    pub async fn dialog(&self, id: &ConversationId) -> DialogState {
        self.dialogs.read().await.get(id).cloned().unwrap_or_default()
    }

    pub async fn profile_count(&self) -> usize {
        self.profiles.read().await.len()
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("writes disabled".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for InMemoryStateStore {
    async fn get_profile(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Option<ConversationProfile>, StoreError> {
        Ok(self.profiles.read().await.get(conversation_id).cloned())
    }

    async fn set_profile(
        &self,
        conversation_id: &ConversationId,
        profile: &ConversationProfile,
    ) -> Result<(), StoreError> {
        self.check_writable()?;
        self.profiles
            .write()
            .await
            .insert(conversation_id.clone(), profile.clone());
        Ok(())
    }
}

#[async_trait]
impl DialogStateStore for InMemoryStateStore {
    async fn load_dialog(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<DialogState, StoreError> {
        Ok(self
            .dialogs
            .read()
            .await
            .get(conversation_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn save_dialog(
        &self,
        conversation_id: &ConversationId,
        state: &DialogState,
    ) -> Result<(), StoreError> {
        self.check_writable()?;
        self.dialogs
            .write()
            .await
            .insert(conversation_id.clone(), state.clone());
        Ok(())
    }

    async fn clear_dialog(&self, conversation_id: &ConversationId) -> Result<(), StoreError> {
        self.dialogs.write().await.remove(conversation_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dialog::DialogId;
    use crate::domain::foundation::UserId;

    fn conv() -> ConversationId {
        ConversationId::new("c-1").unwrap()
    }

    #[tokio::test]
    async fn missing_profile_is_none() {
        let store = InMemoryStateStore::new();
        assert_eq!(store.get_profile(&conv()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_then_get_profile() {
        let store = InMemoryStateStore::new();
        let profile = ConversationProfile::new(UserId::new("dana").unwrap(), conv());
        store.set_profile(&conv(), &profile).await.unwrap();
        assert_eq!(store.get_profile(&conv()).await.unwrap(), Some(profile));
    }

    #[tokio::test]
    async fn dialog_defaults_to_empty_and_clears() {
        let store = InMemoryStateStore::new();
        assert!(store.load_dialog(&conv()).await.unwrap().stack.is_empty());

        let mut state = DialogState::default();
        state.stack.begin(DialogId::Main);
        store.save_dialog(&conv(), &state).await.unwrap();
        assert_eq!(store.load_dialog(&conv()).await.unwrap(), state);

        store.clear_dialog(&conv()).await.unwrap();
        assert!(store.load_dialog(&conv()).await.unwrap().stack.is_empty());
    }

    #[tokio::test]
    async fn failing_writes_surface_unavailable() {
        let store = InMemoryStateStore::new();
        store.fail_writes(true);
        let profile = ConversationProfile::new(UserId::new("dana").unwrap(), conv());
        assert!(matches!(
            store.set_profile(&conv(), &profile).await,
            Err(StoreError::Unavailable(_))
        ));
    }
}
