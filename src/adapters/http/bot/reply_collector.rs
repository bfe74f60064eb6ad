//! Sink that gathers a turn's replies for the HTTP response body.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::conversation::OutboundMessage;
use crate::domain::foundation::ConversationId;
use crate::ports::{MessageSink, SinkError};

/// Collects replies for a single request. Not shared across requests.
#[derive(Debug, Default)]
pub struct ReplyCollector {
    replies: Mutex<Vec<OutboundMessage>>,
}

impl ReplyCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes the collector, returning replies in send order.
    pub fn into_replies(self) -> Vec<OutboundMessage> {
        self.replies.into_inner()
    }
}

#[async_trait]
impl MessageSink for ReplyCollector {
    async fn send(
        &self,
        _conversation_id: &ConversationId,
        message: OutboundMessage,
    ) -> Result<(), SinkError> {
        self.replies.lock().await.push(message);
        Ok(())
    }
}
