//! PostgreSQL implementation of ConversationLog.
//!
//! One row per conversation; turns are appended to a JSONB array as
//! `{ "user": ..., "bot": [...] }` documents.

use async_trait::async_trait;
use serde::Serialize;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::domain::foundation::{ConversationId, Timestamp, UserId};
use crate::domain::order::TurnLog;
use crate::ports::{ConversationLog, ConversationLogError};

#[derive(Clone)]
pub struct PostgresConversationLog {
    pool: PgPool,
}

impl PostgresConversationLog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Stored shape of one turn.
#[derive(Debug, Serialize, PartialEq)]
struct TurnDocument<'a> {
    user: Option<&'a str>,
    bot: &'a [String],
}

impl<'a> From<&'a TurnLog> for TurnDocument<'a> {
    fn from(turn: &'a TurnLog) -> Self {
        Self {
            user: turn.user_utterance.as_deref(),
            bot: &turn.bot_utterances,
        }
    }
}

fn unavailable(e: sqlx::Error) -> ConversationLogError {
    ConversationLogError::Unavailable(e.to_string())
}

#[async_trait]
impl ConversationLog for PostgresConversationLog {
    async fn create_conversation(
        &self,
        conversation_id: &ConversationId,
        user: &UserId,
    ) -> Result<(), ConversationLogError> {
        let now = Timestamp::now();
        sqlx::query(
            r#"
            INSERT INTO conversations (conversation_id, username, turns, created_at, updated_at)
            VALUES ($1, $2, '[]'::jsonb, $3, $3)
            ON CONFLICT (conversation_id) DO NOTHING
            "#,
        )
        .bind(conversation_id.as_str())
        .bind(user.as_str())
        .bind(now.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(unavailable)?;

        Ok(())
    }

    async fn save_turn(
        &self,
        conversation_id: &ConversationId,
        turn: &TurnLog,
    ) -> Result<(), ConversationLogError> {
        let result = sqlx::query(
            r#"
            UPDATE conversations SET
                turns = turns || $2,
                updated_at = $3
            WHERE conversation_id = $1
            "#,
        )
        .bind(conversation_id.as_str())
        .bind(Json(vec![TurnDocument::from(turn)]))
        .bind(Timestamp::now().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(unavailable)?;

        if result.rows_affected() == 0 {
            return Err(ConversationLogError::NotFound(conversation_id.clone()));
        }

        Ok(())
    }
}
