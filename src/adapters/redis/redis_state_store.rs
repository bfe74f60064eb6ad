//! Redis-backed conversation state.
//!
//! Profiles and dialog state are stored as JSON strings under
//! `{prefix}{conversation_id}:profile` and `{prefix}{conversation_id}:dialog`.
//! Keys do not expire.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::dialog::DialogState;
use crate::domain::foundation::ConversationId;
use crate::domain::order::ConversationProfile;
use crate::ports::{DialogStateStore, ProfileStore, StoreError};

const PROFILE_SUFFIX: &str = "profile";
const DIALOG_SUFFIX: &str = "dialog";

#[derive(Clone)]
pub struct RedisStateStore {
    conn: MultiplexedConnection,
    key_prefix: String,
}

impl RedisStateStore {
    pub fn new(conn: MultiplexedConnection, key_prefix: impl Into<String>) -> Self {
        Self {
            conn,
            key_prefix: key_prefix.into(),
        }
    }

    fn key(&self, conversation_id: &ConversationId, suffix: &str) -> String {
        state_key(&self.key_prefix, conversation_id, suffix)
    }

    async fn read<T: DeserializeOwned>(&self, key: String) -> Result<Option<T>, StoreError> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn.get(&key).await.map_err(unavailable)?;
        raw.map(|json| decode(&json)).transpose()
    }

    async fn write<T: Serialize>(&self, key: String, value: &T) -> Result<(), StoreError> {
        let json = serde_json::to_string(value).map_err(|e| StoreError::Serialization(e.to_string()))?;
        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(&key, json).await.map_err(unavailable)
    }
}

fn state_key(prefix: &str, conversation_id: &ConversationId, suffix: &str) -> String {
    format!("{}{}:{}", prefix, conversation_id, suffix)
}

fn decode<T: DeserializeOwned>(json: &str) -> Result<T, StoreError> {
    serde_json::from_str(json).map_err(|e| StoreError::Serialization(e.to_string()))
}

fn unavailable(e: redis::RedisError) -> StoreError {
    StoreError::Unavailable(e.to_string())
}

#[async_trait]
impl ProfileStore for RedisStateStore {
    async fn get_profile(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<Option<ConversationProfile>, StoreError> {
        self.read(self.key(conversation_id, PROFILE_SUFFIX)).await
    }

    async fn set_profile(
        &self,
        conversation_id: &ConversationId,
        profile: &ConversationProfile,
    ) -> Result<(), StoreError> {
        self.write(self.key(conversation_id, PROFILE_SUFFIX), profile).await
    }
}

#[async_trait]
impl DialogStateStore for RedisStateStore {
    async fn load_dialog(
        &self,
        conversation_id: &ConversationId,
    ) -> Result<DialogState, StoreError> {
        Ok(self
            .read(self.key(conversation_id, DIALOG_SUFFIX))
            .await?
            .unwrap_or_default())
    }

    async fn save_dialog(
        &self,
        conversation_id: &ConversationId,
        state: &DialogState,
    ) -> Result<(), StoreError> {
        self.write(self.key(conversation_id, DIALOG_SUFFIX), state).await
    }

    async fn clear_dialog(&self, conversation_id: &ConversationId) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(self.key(conversation_id, DIALOG_SUFFIX))
            .await
            .map_err(unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dialog::{DialogId, OrderState};
    use crate::domain::foundation::UserId;

    #[test]
    fn keys_are_namespaced_per_conversation() {
        let id = ConversationId::new("abc").unwrap();
        assert_eq!(
            state_key("pizza-bot:state:", &id, PROFILE_SUFFIX),
            "pizza-bot:state:abc:profile"
        );
        assert_eq!(state_key("", &id, DIALOG_SUFFIX), "abc:dialog");
    }

    #[test]
    fn profile_json_decodes_back() {
        let profile = ConversationProfile::new(
            UserId::new("dana").unwrap(),
            ConversationId::new("abc").unwrap(),
        );
        let json = serde_json::to_string(&profile).unwrap();
        let back: ConversationProfile = decode(&json).unwrap();
        assert_eq!(back, profile);
    }

    #[test]
    fn dialog_json_decodes_back() {
        let mut state = DialogState::default();
        state.stack.begin(DialogId::Toppings);
        state.order_state = Some(OrderState::AwaitingToppings);
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(decode::<DialogState>(&json).unwrap(), state);
    }

    #[test]
    fn corrupt_json_is_serialization_error() {
        assert!(matches!(
            decode::<DialogState>("{not json"),
            Err(StoreError::Serialization(_))
        ));
    }
}
