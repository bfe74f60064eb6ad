//! Order state machine.
//!
//! Tracks which slot an order is waiting on. States only move forward: a slot
//! never empties during an order, so once the flow leaves a state it does not
//! come back to it.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderState {
    AwaitingOrderType,
    AwaitingQuantity,
    AwaitingToppings,
    AwaitingAddress,
    AwaitingConfirmation,
    Done,
    Cancelled,
}

impl OrderState {
    fn rank(&self) -> u8 {
        match self {
            OrderState::AwaitingOrderType => 0,
            OrderState::AwaitingQuantity => 1,
            OrderState::AwaitingToppings => 2,
            OrderState::AwaitingAddress => 3,
            OrderState::AwaitingConfirmation => 4,
            OrderState::Done | OrderState::Cancelled => 5,
        }
    }
}

impl StateMachine for OrderState {
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use OrderState::*;
        match self {
            AwaitingConfirmation => vec![Done, Cancelled],
            Done | Cancelled => vec![],
            current => [
                AwaitingQuantity,
                AwaitingToppings,
                AwaitingAddress,
                AwaitingConfirmation,
            ]
            .into_iter()
            .filter(|s| s.rank() > current.rank())
            .collect(),
        }
    }
}
