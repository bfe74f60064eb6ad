//! WelcomeMemberHandler - Greets a user joining a conversation.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::conversation::{ChannelAccount, OutboundMessage};
use crate::domain::dialog::templates;
use crate::domain::foundation::{ConversationId, UserId};
use crate::domain::order::ConversationProfile;
use crate::ports::{ConversationLog, MessageSink, ProfileStore};

use super::TurnError;

pub struct WelcomeMemberHandler {
    profiles: Arc<dyn ProfileStore>,
    conversation_log: Arc<dyn ConversationLog>,
    bot_name: String,
}

impl WelcomeMemberHandler {
    pub fn new(
        profiles: Arc<dyn ProfileStore>,
        conversation_log: Arc<dyn ConversationLog>,
        bot_name: impl Into<String>,
    ) -> Self {
        Self {
            profiles,
            conversation_log,
            bot_name: bot_name.into(),
        }
    }

    /// Welcomes the first added member unless it is the bot itself.
    ///
    /// A conversation that already has a profile has been welcomed before
    /// and is left alone. Returns true if a welcome was sent.
    pub async fn handle(
        &self,
        conversation_id: &ConversationId,
        members: &[ChannelAccount],
        sink: &dyn MessageSink,
    ) -> Result<bool, TurnError> {
        let Some(member) = members.first() else {
            return Ok(false);
        };
        if member.name.as_deref() == Some(self.bot_name.as_str()) {
            debug!(conversation_id = %conversation_id, "Ignoring bot join event");
            return Ok(false);
        }
        if self.profiles.get_profile(conversation_id).await?.is_some() {
            debug!(conversation_id = %conversation_id, "Member already welcomed");
            return Ok(false);
        }

        let user = UserId::or_default(member.name.as_deref());
        let profile = ConversationProfile::new(user.clone(), conversation_id.clone());
        self.profiles.set_profile(conversation_id, &profile).await?;
        info!(conversation_id = %conversation_id, user = %user, "New conversation");

        sink.send(
            conversation_id,
            OutboundMessage::text(templates::welcome_message(user.as_str())),
        )
        .await?;

        if let Err(err) = self.conversation_log.create_conversation(conversation_id, &user).await {
            warn!(conversation_id = %conversation_id, error = %err, "Failed to create conversation log");
        }
        Ok(true)
    }
}
