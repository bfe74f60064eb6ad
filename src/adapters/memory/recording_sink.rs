//! Message sink that buffers everything sent through it.
//!
//! Shared between clones so tests can assert on bot output across turns.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::domain::conversation::OutboundMessage;
use crate::domain::foundation::ConversationId;
use crate::ports::{MessageSink, SinkError};

use super::mock_classifier::lock;

#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    sent: Arc<Mutex<Vec<OutboundMessage>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<OutboundMessage> {
        lock(&self.sent).clone()
    }

    /// Text of every message that has text, in send order.
    pub fn texts(&self) -> Vec<String> {
        lock(&self.sent)
            .iter()
            .filter_map(|m| m.text_content().map(str::to_string))
            .collect()
    }

    /// Removes and returns everything sent so far.
    pub fn take(&self) -> Vec<OutboundMessage> {
        std::mem::take(&mut *lock(&self.sent))
    }
}

#[async_trait]
impl MessageSink for RecordingSink {
    async fn send(
        &self,
        _conversation_id: &ConversationId,
        message: OutboundMessage,
    ) -> Result<(), SinkError> {
        lock(&self.sent).push(message);
        Ok(())
    }
}
