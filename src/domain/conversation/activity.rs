//! Inbound activities from the channel transport.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ConversationId;

/// A participant as seen by the channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelAccount {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl ChannelAccount {
    pub fn new(id: impl Into<String>, name: Option<&str>) -> Self {
        Self {
            id: id.into(),
            name: name.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityKind {
    /// The user said something.
    Message { text: String },
    /// Participants joined the conversation.
    MembersAdded { members: Vec<ChannelAccount> },
    /// Anything the engine does not react to.
    Other,
}

/// One inbound event for a conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub conversation_id: ConversationId,
    pub from: Option<ChannelAccount>,
    pub kind: ActivityKind,
}

impl Activity {
    pub fn message(
        conversation_id: ConversationId,
        from: Option<ChannelAccount>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            conversation_id,
            from,
            kind: ActivityKind::Message { text: text.into() },
        }
    }

    pub fn members_added(conversation_id: ConversationId, members: Vec<ChannelAccount>) -> Self {
        Self {
            conversation_id,
            from: None,
            kind: ActivityKind::MembersAdded { members },
        }
    }

    /// Display name of the sender, if the channel provided one.
    pub fn sender_name(&self) -> Option<&str> {
        self.from.as_ref().and_then(|a| a.name.as_deref())
    }
}
