//! DialogRunner - Drives the dialog stack through a turn.
//!
//! Every dialog is a short list of steps. A prompting dialog sends its prompt
//! in step 0 and waits; the reply is validated before step 1 runs with the
//! recognized value. The runner keeps executing steps until one waits for
//! input, the stack empties, or everything is cancelled.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::conversation::OutboundMessage;
use crate::domain::dialog::{
    templates, DialogFrame, DialogId, DialogResult, DialogState, OrderState,
    SlotFillingController, TurnStatus,
};
use crate::domain::foundation::{DomainError, ErrorCode, StateMachine};
use crate::domain::nlu::QnaThread;
use crate::ports::{PriceLookupError, QnaResolver};

use super::{BotSettings, OrderFinalizer, PromptValidator, Recognized, TurnContext, TurnError};

/// Status of a turn together with the value of any dialog that ended in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnResult {
    pub status: TurnStatus,
    pub result: Option<DialogResult>,
}

impl TurnResult {
    pub fn with_status(status: TurnStatus) -> Self {
        Self {
            status,
            result: None,
        }
    }
}

/// What a step asks the runner to do next.
#[derive(Debug)]
enum StepOutcome {
    /// A prompt went out; wait for the next turn.
    Wait,
    Replace(DialogId),
    End(Option<DialogResult>),
    CancelAll,
}

pub struct DialogRunner {
    validator: PromptValidator,
    finalizer: OrderFinalizer,
    qna: Arc<dyn QnaResolver>,
    settings: BotSettings,
}

impl DialogRunner {
    pub fn new(
        validator: PromptValidator,
        finalizer: OrderFinalizer,
        qna: Arc<dyn QnaResolver>,
        settings: BotSettings,
    ) -> Self {
        Self {
            validator,
            finalizer,
            qna,
            settings,
        }
    }

    /// Feeds the user's reply to the active dialog.
    ///
    /// Returns `Empty` without touching anything if no dialog is active.
    pub async fn continue_dialog(
        &self,
        ctx: &mut TurnContext<'_>,
        text: &str,
    ) -> Result<TurnResult, TurnError> {
        let Some(frame) = ctx.dialog.stack.active().copied() else {
            return Ok(TurnResult::with_status(TurnStatus::Empty));
        };

        match self.validator.recognize(ctx, frame.dialog_id, text).await? {
            Some(recognized) => {
                ctx.dialog.stack.advance();
                self.run(ctx, Some(recognized)).await
            }
            None => {
                let attempt = ctx.dialog.stack.retry();
                debug!(
                    conversation_id = %ctx.conversation_id(),
                    dialog = ?frame.dialog_id,
                    attempt,
                    "Reply rejected, prompting again"
                );
                self.reprompt(ctx, frame.dialog_id, attempt).await?;
                Ok(TurnResult::with_status(TurnStatus::Waiting))
            }
        }
    }

    /// Pushes `dialog` and runs it until it waits or ends.
    pub async fn begin_dialog(
        &self,
        ctx: &mut TurnContext<'_>,
        dialog: DialogId,
    ) -> Result<TurnResult, TurnError> {
        enter_order_state(&mut ctx.dialog, dialog)?;
        ctx.dialog.stack.begin(dialog);
        self.run(ctx, None).await
    }

    async fn run(
        &self,
        ctx: &mut TurnContext<'_>,
        mut input: Option<Recognized>,
    ) -> Result<TurnResult, TurnError> {
        let mut ended = None;
        loop {
            let Some(frame) = ctx.dialog.stack.active().copied() else {
                return Ok(TurnResult {
                    status: TurnStatus::Complete,
                    result: ended,
                });
            };

            let outcome = self.run_step(ctx, frame, input.take()).await?;
            debug!(
                conversation_id = %ctx.conversation_id(),
                dialog = ?frame.dialog_id,
                step = frame.step_index,
                outcome = ?outcome,
                "Dialog step finished"
            );

            match outcome {
                StepOutcome::Wait => return Ok(TurnResult::with_status(TurnStatus::Waiting)),
                StepOutcome::Replace(next) => {
                    enter_order_state(&mut ctx.dialog, next)?;
                    ctx.dialog.stack.replace(next);
                }
                StepOutcome::End(result) => {
                    if let Some(DialogResult::OrderFinalized(_)) = result {
                        leave_order_state(&mut ctx.dialog, OrderState::Done)?;
                    }
                    ended = result;
                    ctx.dialog.stack.end();
                }
                StepOutcome::CancelAll => {
                    leave_order_state(&mut ctx.dialog, OrderState::Cancelled)?;
                    ctx.dialog.stack.cancel_all();
                    return Ok(TurnResult::with_status(TurnStatus::Cancelled));
                }
            }
        }
    }

    async fn run_step(
        &self,
        ctx: &mut TurnContext<'_>,
        frame: DialogFrame,
        input: Option<Recognized>,
    ) -> Result<StepOutcome, TurnError> {
        let dialog = frame.dialog_id;
        match (dialog, frame.step_index) {
            (DialogId::Main, 0) => {
                if ctx.profile.slots.is_priceable() && ctx.profile.slots.price().is_none() {
                    if let Err(err) = self.price_slots(ctx).await {
                        warn!(
                            conversation_id = %ctx.conversation_id(),
                            error = %err,
                            "Price lookup failed once order became priceable"
                        );
                    }
                }
                Ok(StepOutcome::Replace(SlotFillingController::next_dialog(
                    &ctx.profile.slots,
                )))
            }

            (DialogId::Summary, 0) => self.summarize(ctx).await,
            (DialogId::Summary, 1) => match input {
                Some(Recognized::Choice(0)) => {
                    let (profile, receipt) = self.finalizer.finalize(ctx.profile.clone()).await?;
                    ctx.profile = profile;
                    Ok(StepOutcome::End(Some(DialogResult::OrderFinalized(receipt))))
                }
                Some(Recognized::Choice(_)) => {
                    ctx.profile = ctx.profile.clone().reset();
                    Ok(StepOutcome::CancelAll)
                }
                _ => Err(missing_input(frame)),
            },

            (DialogId::QnaFollowUp, 0) => match ctx.profile.qna.clone() {
                Some(thread) => {
                    ctx.send(OutboundMessage::choices(thread.answer.clone(), thread.choice_texts()))
                        .await?;
                    Ok(StepOutcome::Wait)
                }
                None => Ok(StepOutcome::End(Some(DialogResult::QnaFinished))),
            },
            (DialogId::QnaFollowUp, 1) => match input {
                Some(Recognized::Choice(index)) => self.follow_up(ctx, index).await,
                _ => Err(missing_input(frame)),
            },

            (slot_dialog, 0) => {
                let prompt = templates::slot_prompt(slot_dialog).ok_or_else(|| missing_input(frame))?;
                ctx.send_text(prompt.for_attempt(frame.prompt_attempt_count))
                    .await?;
                Ok(StepOutcome::Wait)
            }
            (slot_dialog, 1) => {
                let Some(Recognized::Slots(slots)) = input else {
                    return Err(missing_input(frame));
                };
                ctx.profile.slots = slots;
                self.acknowledge(ctx, slot_dialog).await?;
                Ok(StepOutcome::Replace(DialogId::Main))
            }

            _ => Err(missing_input(frame)),
        }
    }

    async fn acknowledge(&self, ctx: &mut TurnContext<'_>, dialog: DialogId) -> Result<(), TurnError> {
        let ack = match dialog {
            DialogId::OrderType => ctx.profile.slots.order_type().map(templates::order_type_ack),
            DialogId::Quantity => Some(templates::QUANTITY_ACK.to_string()),
            DialogId::Toppings => ctx
                .profile
                .slots
                .toppings()
                .map(|t| templates::toppings_ack(t.is_empty()).to_string()),
            _ => None,
        };
        if let Some(ack) = ack {
            ctx.send_text(ack).await?;
        }
        Ok(())
    }

    async fn summarize(&self, ctx: &mut TurnContext<'_>) -> Result<StepOutcome, TurnError> {
        ctx.send_text(templates::SUMMARY_INTRO).await?;
        ctx.send_text(templates::order_summary(&ctx.profile.slots))
            .await?;

        let quoted = match ctx.profile.slots.price() {
            Some(price) => Ok(price),
            None => self.price_slots(ctx).await,
        };
        let price = match quoted {
            Ok(price) => Some(price),
            Err(err) => {
                warn!(
                    conversation_id = %ctx.conversation_id(),
                    error = %err,
                    "Price lookup failed for order summary"
                );
                ctx.send_text(templates::PRICE_APOLOGY).await?;
                None
            }
        };

        ctx.send(OutboundMessage::choices(
            templates::confirmation_prompt(price, &self.settings.currency),
            templates::CONFIRM_CHOICES,
        ))
        .await?;
        Ok(StepOutcome::Wait)
    }

    /// Quotes the current slots and caches the price on them.
    async fn price_slots(&self, ctx: &mut TurnContext<'_>) -> Result<u32, PriceLookupError> {
        let price = self.finalizer.quote(&ctx.profile.slots).await?;
        if let Ok(slots) = ctx.profile.slots.clone().with_price(price) {
            ctx.profile.slots = slots;
        }
        Ok(price)
    }

    async fn follow_up(&self, ctx: &mut TurnContext<'_>, index: usize) -> Result<StepOutcome, TurnError> {
        let thread = ctx.profile.qna.take();
        let Some((thread, chosen)) = thread.and_then(|t| {
            let chosen = t.follow_ups.get(index).cloned()?;
            Some((t, chosen))
        }) else {
            return Ok(StepOutcome::End(Some(DialogResult::QnaFinished)));
        };

        match self.qna.resolve_answer(&thread.follow_up_query(&chosen)).await {
            Ok(answer) if answer.is_multi_turn() => {
                ctx.profile.qna = Some(QnaThread::from_answer(&answer, chosen.text));
                Ok(StepOutcome::Replace(DialogId::QnaFollowUp))
            }
            Ok(answer) => {
                ctx.send_text(answer.answer).await?;
                Ok(StepOutcome::End(Some(DialogResult::QnaFinished)))
            }
            Err(err) => {
                warn!(
                    conversation_id = %ctx.conversation_id(),
                    error = %err,
                    "Q&A follow-up failed"
                );
                ctx.send_text(templates::QNA_APOLOGY).await?;
                Ok(StepOutcome::End(Some(DialogResult::QnaFinished)))
            }
        }
    }

    async fn reprompt(
        &self,
        ctx: &mut TurnContext<'_>,
        dialog: DialogId,
        attempt: u32,
    ) -> Result<(), TurnError> {
        match dialog {
            DialogId::Summary => {
                ctx.send(OutboundMessage::choices(
                    templates::CHOICE_RETRY,
                    templates::CONFIRM_CHOICES,
                ))
                .await
            }
            DialogId::QnaFollowUp => {
                let choices = ctx
                    .profile
                    .qna
                    .as_ref()
                    .map(|t| t.choice_texts())
                    .unwrap_or_default();
                ctx.send(OutboundMessage::choices(templates::CHOICE_RETRY, choices))
                    .await
            }
            other => match templates::slot_prompt(other) {
                Some(prompt) => ctx.send_text(prompt.for_attempt(attempt)).await,
                None => Ok(()),
            },
        }
    }
}

/// Moves the order state machine into the state `dialog` waits in.
fn enter_order_state(state: &mut DialogState, dialog: DialogId) -> Result<(), TurnError> {
    if let Some(target) = dialog.order_state() {
        leave_order_state(state, target)?;
    }
    Ok(())
}

fn leave_order_state(state: &mut DialogState, target: OrderState) -> Result<(), TurnError> {
    let next = match state.order_state {
        None => target,
        Some(current) => current
            .transition_to(target)
            .map_err(TurnError::invalid_transition)?,
    };
    debug!(from = ?state.order_state, to = ?next, "Order state transition");
    state.order_state = Some(next);
    Ok(())
}

fn missing_input(frame: DialogFrame) -> TurnError {
    TurnError::Domain(
        DomainError::new(ErrorCode::NoActiveDialog, "Dialog step has no input to act on")
            .with_detail("dialog", format!("{:?}", frame.dialog_id))
            .with_detail("step", frame.step_index.to_string()),
    )
}
