//! HTTP DTOs for the channel endpoint.
//!
//! The request mirrors the subset of a Bot Framework activity the engine
//! reacts to. Unknown fields are ignored.

use serde::{Deserialize, Serialize};

use crate::domain::conversation::{Activity, ActivityKind, ChannelAccount, OutboundMessage};
use crate::domain::foundation::{ConversationId, ValidationError};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct ConversationRef {
    pub id: String,
}

/// Inbound channel activity.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRequest {
    #[serde(rename = "type")]
    pub activity_type: String,
    pub conversation: ConversationRef,
    #[serde(default)]
    pub from: Option<ChannelAccount>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub members_added: Vec<ChannelAccount>,
}

impl TryFrom<ActivityRequest> for Activity {
    type Error = ValidationError;

    fn try_from(req: ActivityRequest) -> Result<Self, Self::Error> {
        let conversation_id = ConversationId::new(req.conversation.id)?;
        let kind = match req.activity_type.as_str() {
            "message" => ActivityKind::Message {
                text: req.text.unwrap_or_default(),
            },
            // Web chat announces joins as an event rather than an update.
            "conversationUpdate" | "event" if !req.members_added.is_empty() => {
                ActivityKind::MembersAdded {
                    members: req.members_added,
                }
            }
            _ => ActivityKind::Other,
        };
        Ok(Activity {
            conversation_id,
            from: req.from,
            kind,
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Replies produced while handling one activity, in send order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnResponse {
    pub conversation_id: String,
    pub messages: Vec<OutboundMessage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
        }
    }
}
