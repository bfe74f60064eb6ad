//! Per-conversation profile.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ConversationId, Timestamp, UserId};
use crate::domain::nlu::QnaThread;

use super::OrderSlots;

/// Who the conversation is with. Immutable once the profile exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: UserId,
    pub conversation_id: ConversationId,
}

/// Messages exchanged during the current turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnLog {
    pub user_utterance: Option<String>,
    pub bot_utterances: Vec<String>,
}

impl TurnLog {
    pub fn is_empty(&self) -> bool {
        self.user_utterance.is_none() && self.bot_utterances.is_empty()
    }
}

/// Result of submitting an order to the order store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Success,
    Failure,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub status: Option<OrderStatus>,
}

/// Everything the engine remembers about one conversation between turns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationProfile {
    pub identity: Identity,
    pub slots: OrderSlots,
    pub turn_log: TurnLog,
    pub outcome: Outcome,
    pub qna: Option<QnaThread>,
    pub created_at: Timestamp,
}

impl ConversationProfile {
    /// Creates a profile with empty slots and no outcome.
    pub fn new(user_id: UserId, conversation_id: ConversationId) -> Self {
        Self {
            identity: Identity {
                user_id,
                conversation_id,
            },
            slots: OrderSlots::empty(),
            turn_log: TurnLog::default(),
            outcome: Outcome::default(),
            qna: None,
            created_at: Timestamp::now(),
        }
    }

    /// Returns the profile with new slots.
    pub fn with_slots(self, slots: OrderSlots) -> Self {
        Self { slots, ..self }
    }

    /// Returns the profile with the order outcome recorded.
    pub fn with_outcome(self, status: OrderStatus) -> Self {
        Self {
            outcome: Outcome {
                status: Some(status),
            },
            ..self
        }
    }

    /// Drops all order state. Identity and the current turn log survive.
    pub fn reset(self) -> Self {
        Self {
            slots: OrderSlots::empty(),
            outcome: Outcome::default(),
            qna: None,
            ..self
        }
    }

    /// Returns true if the profile holds no order or Q&A state.
    pub fn is_reset(&self) -> bool {
        self.slots.is_empty() && self.outcome.status.is_none() && self.qna.is_none()
    }

    pub fn record_user(&mut self, text: impl Into<String>) {
        self.turn_log.user_utterance = Some(text.into());
    }

    pub fn record_bot(&mut self, text: impl Into<String>) {
        self.turn_log.bot_utterances.push(text.into());
    }

    /// Takes the turn log, leaving an empty one for the next turn.
    pub fn take_turn_log(&mut self) -> TurnLog {
        std::mem::take(&mut self.turn_log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::{OrderType, Quantity, Toppings};

    fn profile() -> ConversationProfile {
        ConversationProfile::new(
            UserId::new("dana").unwrap(),
            ConversationId::new("c-1").unwrap(),
        )
    }

    #[test]
    fn new_profile_is_reset() {
        assert!(profile().is_reset());
        assert!(profile().turn_log.is_empty());
    }

    #[test]
    fn reset_keeps_identity_and_clears_order_state() {
        let slots = OrderSlots::empty()
            .with_order_type(OrderType::Delivery)
            .with_quantity(Quantity::new(2).unwrap())
            .with_toppings(Toppings::none());
        let p = profile().with_slots(slots).with_outcome(OrderStatus::Failure);
        let identity = p.identity.clone();

        let reset = p.reset();
        assert_eq!(reset.identity, identity);
        assert!(reset.is_reset());
    }

    #[test]
    fn reset_keeps_turn_log() {
        let mut p = profile();
        p.record_bot("hello");
        let p = p.reset();
        assert_eq!(p.turn_log.bot_utterances, vec!["hello"]);
    }

    #[test]
    fn take_turn_log_clears_it() {
        let mut p = profile();
        p.record_user("hi");
        p.record_bot("hello");
        let log = p.take_turn_log();
        assert_eq!(log.user_utterance.as_deref(), Some("hi"));
        assert!(p.turn_log.is_empty());
    }

    #[test]
    fn profile_roundtrips_through_json() {
        let p = profile().with_slots(OrderSlots::empty().with_toppings(Toppings::none()));
        let json = serde_json::to_string(&p).unwrap();
        let back: ConversationProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
