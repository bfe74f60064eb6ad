//! Dialog stack.
//!
//! An ordered LIFO sequence of active dialog frames. The top frame is the
//! active one; an empty stack means no dialog is in progress.

use serde::{Deserialize, Serialize};

use crate::domain::order::OrderReceipt;

use super::OrderState;

/// The dialogs the engine knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogId {
    /// Top-level dispatch: picks the next slot to fill.
    Main,
    OrderType,
    Quantity,
    Toppings,
    Address,
    Summary,
    /// Multi-turn Q&A waiting for a follow-up choice.
    QnaFollowUp,
}

impl DialogId {
    /// Number of steps in this dialog.
    pub fn step_count(&self) -> usize {
        match self {
            DialogId::Main => 1,
            _ => 2,
        }
    }

    /// The order state a conversation is in while this dialog is active.
    pub fn order_state(&self) -> Option<OrderState> {
        match self {
            DialogId::OrderType => Some(OrderState::AwaitingOrderType),
            DialogId::Quantity => Some(OrderState::AwaitingQuantity),
            DialogId::Toppings => Some(OrderState::AwaitingToppings),
            DialogId::Address => Some(OrderState::AwaitingAddress),
            DialogId::Summary => Some(OrderState::AwaitingConfirmation),
            DialogId::Main | DialogId::QnaFollowUp => None,
        }
    }
}

/// One in-progress dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogFrame {
    pub dialog_id: DialogId,
    pub step_index: usize,
    /// Starts at 1 and grows with every retry of the current prompt.
    pub prompt_attempt_count: u32,
}

impl DialogFrame {
    pub fn new(dialog_id: DialogId) -> Self {
        Self {
            dialog_id,
            step_index: 0,
            prompt_attempt_count: 1,
        }
    }

    /// Returns true if the frame has run past its last step.
    pub fn is_finished(&self) -> bool {
        self.step_index >= self.dialog_id.step_count()
    }
}

/// Status of a turn after the stack has consumed the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnStatus {
    /// No frame existed when the input arrived.
    Empty,
    /// A frame consumed the input and is waiting for more.
    Waiting,
    /// The last frame ended this turn.
    Complete,
    /// The stack was cleared by a cancel this turn.
    Cancelled,
}

/// Value a dialog hands back when it ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DialogResult {
    OrderFinalized(OrderReceipt),
    QnaFinished,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogStack {
    frames: Vec<DialogFrame>,
}

impl DialogStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn active(&self) -> Option<&DialogFrame> {
        self.frames.last()
    }

    pub fn active_mut(&mut self) -> Option<&mut DialogFrame> {
        self.frames.last_mut()
    }

    /// Pushes a new frame starting at step 0.
    pub fn begin(&mut self, dialog_id: DialogId) {
        self.frames.push(DialogFrame::new(dialog_id));
    }

    /// Pops the active frame and pushes a fresh one in its place.
    pub fn replace(&mut self, dialog_id: DialogId) {
        self.frames.pop();
        self.begin(dialog_id);
    }

    /// Moves the active frame to its next step. Frames that run past their
    /// last step are popped and their parent advanced in turn.
    pub fn advance(&mut self) {
        while let Some(frame) = self.frames.last_mut() {
            frame.step_index += 1;
            frame.prompt_attempt_count = 1;
            if !frame.is_finished() {
                return;
            }
            self.frames.pop();
        }
    }

    /// Pops the active frame and advances its parent.
    pub fn end(&mut self) {
        if self.frames.pop().is_some() {
            self.advance();
        }
    }

    /// Records another attempt at the active frame's prompt.
    pub fn retry(&mut self) -> u32 {
        match self.frames.last_mut() {
            Some(frame) => {
                frame.prompt_attempt_count += 1;
                frame.prompt_attempt_count
            }
            None => 0,
        }
    }

    pub fn cancel_all(&mut self) {
        self.frames.clear();
    }
}

/// Everything persisted about a conversation's dialogs between turns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogState {
    pub stack: DialogStack,
    /// Where the current order is, if one is in progress.
    pub order_state: Option<OrderState>,
}
