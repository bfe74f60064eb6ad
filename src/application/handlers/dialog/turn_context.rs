//! State owned by a single turn.

use crate::domain::conversation::OutboundMessage;
use crate::domain::dialog::DialogState;
use crate::domain::foundation::ConversationId;
use crate::domain::order::ConversationProfile;
use crate::ports::MessageSink;

use super::TurnError;

/// The profile and dialog state a turn works on, plus the channel to send
/// replies through. Everything here is written back at the end of the turn.
pub struct TurnContext<'a> {
    pub profile: ConversationProfile,
    pub dialog: DialogState,
    sink: &'a dyn MessageSink,
}

impl<'a> TurnContext<'a> {
    pub fn new(profile: ConversationProfile, dialog: DialogState, sink: &'a dyn MessageSink) -> Self {
        Self {
            profile,
            dialog,
            sink,
        }
    }

    pub fn conversation_id(&self) -> &ConversationId {
        &self.profile.identity.conversation_id
    }

    /// Sends a message and records its text in the turn log.
    pub async fn send(&mut self, message: OutboundMessage) -> Result<(), TurnError> {
        if let Some(text) = message.text_content() {
            self.profile.record_bot(text);
        }
        self.sink
            .send(&self.profile.identity.conversation_id, message)
            .await?;
        Ok(())
    }

    pub async fn send_text(&mut self, text: impl Into<String>) -> Result<(), TurnError> {
        self.send(OutboundMessage::text(text)).await
    }
}
