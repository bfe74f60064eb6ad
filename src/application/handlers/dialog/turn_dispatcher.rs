//! TurnDispatcher - Entry point for every inbound activity.
//!
//! A message first goes to whatever dialog is active. If none is, the text is
//! classified: ordering intents start the slot-filling flow and everything
//! else is answered by the Q&A resolver. The profile and dialog state are
//! read at the start of the turn and written back once at the end.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::conversation::{Activity, ActivityKind, OutboundMessage};
use crate::domain::dialog::{seed_slots, templates, DialogId, DialogResult, TurnStatus};
use crate::domain::foundation::{ConversationId, UserId};
use crate::domain::nlu::{QnaQuery, QnaThread};
use crate::domain::order::{ConversationProfile, OrderReceipt, OrderSlots, OrderStatus};
use crate::ports::{
    ConversationLog, DialogStateStore, MessageSink, NluClassifier, OrderStore, PriceLookup,
    ProfileStore, QnaResolver, StoreError,
};

use super::{
    BotSettings, DialogRunner, OrderFinalizer, PromptValidator, TurnContext, TurnError, TurnResult,
    WelcomeMemberHandler,
};

/// Every collaborator a turn may call.
#[derive(Clone)]
pub struct DialogPorts {
    pub classifier: Arc<dyn NluClassifier>,
    pub qna: Arc<dyn QnaResolver>,
    pub profiles: Arc<dyn ProfileStore>,
    pub dialogs: Arc<dyn DialogStateStore>,
    pub conversation_log: Arc<dyn ConversationLog>,
    pub prices: Arc<dyn PriceLookup>,
    pub orders: Arc<dyn OrderStore>,
}

pub struct TurnDispatcher {
    classifier: Arc<dyn NluClassifier>,
    qna: Arc<dyn QnaResolver>,
    profiles: Arc<dyn ProfileStore>,
    dialogs: Arc<dyn DialogStateStore>,
    conversation_log: Arc<dyn ConversationLog>,
    runner: DialogRunner,
    welcome: WelcomeMemberHandler,
    settings: BotSettings,
}

impl TurnDispatcher {
    pub fn new(ports: DialogPorts, settings: BotSettings) -> Self {
        let validator = PromptValidator::new(ports.classifier.clone(), settings.menu.clone());
        let finalizer = OrderFinalizer::new(ports.prices, ports.orders);
        let runner = DialogRunner::new(validator, finalizer, ports.qna.clone(), settings.clone());
        let welcome = WelcomeMemberHandler::new(
            ports.profiles.clone(),
            ports.conversation_log.clone(),
            settings.bot_name.clone(),
        );
        Self {
            classifier: ports.classifier,
            qna: ports.qna,
            profiles: ports.profiles,
            dialogs: ports.dialogs,
            conversation_log: ports.conversation_log,
            runner,
            welcome,
            settings,
        }
    }

    /// Handles one inbound activity, sending any replies through `sink`.
    ///
    /// # Errors
    ///
    /// Returns `TurnError` if state could not be loaded or saved, or a reply
    /// could not be sent. Failing collaborators are answered with an apology
    /// instead.
    pub async fn handle_turn(
        &self,
        activity: &Activity,
        sink: &dyn MessageSink,
    ) -> Result<(), TurnError> {
        match &activity.kind {
            ActivityKind::Message { text } => self.handle_message(activity, text, sink).await,
            ActivityKind::MembersAdded { members } => {
                self.welcome
                    .handle(&activity.conversation_id, members, sink)
                    .await?;
                Ok(())
            }
            ActivityKind::Other => {
                debug!(conversation_id = %activity.conversation_id, "Ignoring activity");
                Ok(())
            }
        }
    }

    /// Drops a conversation's dialog state so its next message starts fresh.
    pub async fn reset_dialog(&self, conversation_id: &ConversationId) -> Result<(), StoreError> {
        self.dialogs.clear_dialog(conversation_id).await
    }

    async fn handle_message(
        &self,
        activity: &Activity,
        text: &str,
        sink: &dyn MessageSink,
    ) -> Result<(), TurnError> {
        let conversation_id = &activity.conversation_id;
        let profile = match self.profiles.get_profile(conversation_id).await? {
            Some(profile) => profile,
            None => self.start_conversation(activity).await,
        };
        let dialog = self.dialogs.load_dialog(conversation_id).await?;

        let mut ctx = TurnContext::new(profile, dialog, sink);
        ctx.profile.record_user(text);

        let mut turn = self.runner.continue_dialog(&mut ctx, text).await?;
        if turn.status == TurnStatus::Empty {
            turn = self.route(&mut ctx, text).await?;
        }
        debug!(
            conversation_id = %conversation_id,
            status = ?turn.status,
            depth = ctx.dialog.stack.depth(),
            "Turn processed"
        );

        self.wrap_up(&mut ctx, turn).await?;
        self.persist(ctx).await
    }

    /// Handles a message that no dialog was waiting for.
    async fn route(&self, ctx: &mut TurnContext<'_>, text: &str) -> Result<TurnResult, TurnError> {
        let idle = TurnResult::with_status(TurnStatus::Empty);

        let result = match self.classifier.classify(text).await {
            Ok(result) => result,
            Err(err) => {
                warn!(conversation_id = %ctx.conversation_id(), error = %err, "Classifier failed");
                ctx.send_text(templates::SERVICE_APOLOGY).await?;
                return Ok(idle);
            }
        };

        if result.is_order_domain() {
            let profile = ctx.profile.clone().reset();
            let slots = seed_slots(profile.slots.clone(), &result, &self.settings.menu);
            ctx.profile = profile.with_slots(slots);
            ctx.dialog.order_state = None;
            return self.runner.begin_dialog(ctx, DialogId::Main).await;
        }

        match self.qna.resolve_answer(&QnaQuery::new(text)).await {
            Ok(answer) if answer.is_multi_turn() => {
                ctx.profile.qna = Some(QnaThread::from_answer(&answer, text));
                self.runner.begin_dialog(ctx, DialogId::QnaFollowUp).await
            }
            Ok(answer) => {
                ctx.send_text(answer.answer).await?;
                Ok(idle)
            }
            Err(err) => {
                warn!(conversation_id = %ctx.conversation_id(), error = %err, "Q&A resolver failed");
                ctx.send_text(templates::QNA_APOLOGY).await?;
                Ok(idle)
            }
        }
    }

    /// Sends the closing messages of a finished order.
    async fn wrap_up(&self, ctx: &mut TurnContext<'_>, turn: TurnResult) -> Result<(), TurnError> {
        match (turn.status, turn.result) {
            (TurnStatus::Complete, Some(DialogResult::OrderFinalized(receipt))) => {
                self.announce(ctx, receipt).await?;
                if !ctx.profile.slots.is_empty() {
                    ctx.profile.slots = OrderSlots::empty();
                }
                ctx.dialog.order_state = None;
            }
            (TurnStatus::Cancelled, _) => {
                ctx.send_text(templates::CANCELLED).await?;
                ctx.profile = ctx.profile.clone().reset();
                ctx.dialog.order_state = None;
            }
            _ => {}
        }
        Ok(())
    }

    async fn announce(&self, ctx: &mut TurnContext<'_>, receipt: OrderReceipt) -> Result<(), TurnError> {
        match receipt.status {
            OrderStatus::Success => {
                ctx.send_text(templates::completion_message(receipt.order_type))
                    .await?;
                if !self.settings.completion_gif_url.is_empty() {
                    ctx.send(OutboundMessage::animation(
                        templates::COMPLETION_CARD_TITLE,
                        self.settings.completion_gif_url.clone(),
                    ))
                    .await?;
                }
            }
            OrderStatus::Failure => {
                ctx.send_text(templates::submission_failure_message(&self.settings.fallback_phone))
                    .await?;
            }
        }
        Ok(())
    }

    /// Creates the profile of a conversation whose join event was never seen.
    async fn start_conversation(&self, activity: &Activity) -> ConversationProfile {
        let conversation_id = &activity.conversation_id;
        let user = UserId::or_default(activity.sender_name());
        info!(conversation_id = %conversation_id, user = %user, "New conversation without join event");

        if let Err(err) = self.conversation_log.create_conversation(conversation_id, &user).await {
            warn!(conversation_id = %conversation_id, error = %err, "Failed to create conversation log");
        }
        ConversationProfile::new(user, conversation_id.clone())
    }

    async fn persist(&self, mut ctx: TurnContext<'_>) -> Result<(), TurnError> {
        let conversation_id = ctx.conversation_id().clone();
        let turn_log = ctx.profile.take_turn_log();
        if let Err(err) = self.conversation_log.save_turn(&conversation_id, &turn_log).await {
            warn!(conversation_id = %conversation_id, error = %err, "Failed to save turn log");
        }

        self.profiles.set_profile(&conversation_id, &ctx.profile).await?;
        self.dialogs.save_dialog(&conversation_id, &ctx.dialog).await?;
        Ok(())
    }
}
