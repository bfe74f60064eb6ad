//! PromptValidator - Recognizes the reply to the active prompt.

use std::sync::Arc;
use tracing::warn;

use crate::domain::dialog::{
    recognize_choice, templates, validate_address, validate_order_type, validate_quantity,
    validate_toppings, DialogId, SlotValidation,
};
use crate::domain::order::{OrderSlots, ToppingMenu};
use crate::ports::NluClassifier;

use super::{TurnContext, TurnError};

/// What an accepted reply carries into the dialog's next step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recognized {
    /// Slots with the prompted slot filled.
    Slots(OrderSlots),
    /// Index of the picked choice.
    Choice(usize),
}

pub struct PromptValidator {
    classifier: Arc<dyn NluClassifier>,
    menu: ToppingMenu,
}

impl PromptValidator {
    pub fn new(classifier: Arc<dyn NluClassifier>, menu: ToppingMenu) -> Self {
        Self { classifier, menu }
    }

    /// Validates `text` as the answer to `dialog`'s prompt.
    ///
    /// Returns `None` when the reply is rejected; the profile is left as it
    /// was. A classifier failure also rejects, after telling the user.
    pub async fn recognize(
        &self,
        ctx: &mut TurnContext<'_>,
        dialog: DialogId,
        text: &str,
    ) -> Result<Option<Recognized>, TurnError> {
        let validation = match dialog {
            DialogId::OrderType | DialogId::Quantity | DialogId::Toppings => {
                let result = match self.classifier.classify(text).await {
                    Ok(result) => result,
                    Err(err) => {
                        warn!(
                            conversation_id = %ctx.conversation_id(),
                            dialog = ?dialog,
                            error = %err,
                            "Classifier failed while validating reply"
                        );
                        ctx.send_text(templates::SERVICE_APOLOGY).await?;
                        return Ok(None);
                    }
                };
                let slots = &ctx.profile.slots;
                match dialog {
                    DialogId::OrderType => validate_order_type(slots, &result),
                    DialogId::Quantity => validate_quantity(slots, &result),
                    _ => validate_toppings(slots, &result, &self.menu),
                }
            }
            DialogId::Address => validate_address(&ctx.profile.slots, text),
            DialogId::Summary => {
                return Ok(recognize_choice(text, &templates::CONFIRM_CHOICES).map(Recognized::Choice));
            }
            DialogId::QnaFollowUp => {
                let choices = ctx
                    .profile
                    .qna
                    .as_ref()
                    .map(|thread| thread.choice_texts())
                    .unwrap_or_default();
                return Ok(recognize_choice(text, &choices).map(Recognized::Choice));
            }
            DialogId::Main => return Ok(None),
        };

        Ok(match validation {
            SlotValidation::Accepted(slots) => Some(Recognized::Slots(slots)),
            SlotValidation::Rejected => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{MockClassifier, RecordingSink};
    use crate::domain::dialog::DialogState;
    use crate::domain::foundation::{ConversationId, UserId};
    use crate::domain::nlu::{Entity, QnaAnswer, QnaThread};
    use crate::domain::order::{ConversationProfile, OrderType};
    use crate::ports::ClassifierError;

    fn profile() -> ConversationProfile {
        ConversationProfile::new(UserId::new("dana").unwrap(), ConversationId::new("c-1").unwrap())
    }

    fn validator(classifier: MockClassifier) -> PromptValidator {
        PromptValidator::new(Arc::new(classifier), ToppingMenu::default())
    }

    mod slots {
        use super::*;

        #[tokio::test]
        async fn accepted_order_type_fills_slot() {
            let sink = RecordingSink::new();
            let mut ctx = TurnContext::new(profile(), DialogState::default(), &sink);
            let v = validator(MockClassifier::new().with_intent("pizzaPickup"));

            let recognized = v.recognize(&mut ctx, DialogId::OrderType, "pickup").await.unwrap();

            let Some(Recognized::Slots(slots)) = recognized else {
                panic!("expected slots");
            };
            assert_eq!(slots.order_type(), Some(OrderType::Pickup));
            assert!(ctx.profile.slots.is_empty());
        }

        #[tokio::test]
        async fn rejected_quantity_leaves_profile_untouched() {
            let sink = RecordingSink::new();
            let mut ctx = TurnContext::new(profile(), DialogState::default(), &sink);
            let v = validator(MockClassifier::new().with_intent("None"));

            let recognized = v.recognize(&mut ctx, DialogId::Quantity, "lots").await.unwrap();

            assert_eq!(recognized, None);
            assert!(ctx.profile.slots.is_empty());
            assert!(sink.messages().is_empty());
        }

        #[tokio::test]
        async fn toppings_are_checked_against_menu() {
            let sink = RecordingSink::new();
            let mut ctx = TurnContext::new(profile(), DialogState::default(), &sink);
            let classifier = MockClassifier::new().with_result(
                crate::domain::nlu::ClassificationResult::new("addToppings")
                    .with_entity(Entity::toppings(["mushrooms"])),
            );
            let v = validator(classifier);

            let recognized = v.recognize(&mut ctx, DialogId::Toppings, "mushrooms").await.unwrap();

            let Some(Recognized::Slots(slots)) = recognized else {
                panic!("expected slots");
            };
            assert_eq!(slots.toppings().unwrap().items(), &["mushrooms"]);
        }

        #[tokio::test]
        async fn address_skips_classifier() {
            let sink = RecordingSink::new();
            let mut ctx = TurnContext::new(profile(), DialogState::default(), &sink);
            let classifier = MockClassifier::new();
            let v = validator(classifier.clone());

            let recognized = v.recognize(&mut ctx, DialogId::Address, "Herzl 1").await.unwrap();

            assert!(matches!(recognized, Some(Recognized::Slots(_))));
            assert!(classifier.calls().is_empty());
        }
    }

    mod failures {
        use super::*;

        #[tokio::test]
        async fn classifier_failure_apologizes_and_rejects() {
            let sink = RecordingSink::new();
            let mut ctx = TurnContext::new(profile(), DialogState::default(), &sink);
            let v = validator(
                MockClassifier::new().with_error(ClassifierError::Unavailable("timeout".into())),
            );

            let recognized = v.recognize(&mut ctx, DialogId::Quantity, "two").await.unwrap();

            assert_eq!(recognized, None);
            assert_eq!(sink.texts(), vec![templates::SERVICE_APOLOGY.to_string()]);
            assert_eq!(
                ctx.profile.turn_log.bot_utterances,
                vec![templates::SERVICE_APOLOGY.to_string()]
            );
        }
    }

    mod choices {
        use super::*;

        #[tokio::test]
        async fn summary_recognizes_yes_and_no() {
            let sink = RecordingSink::new();
            let mut ctx = TurnContext::new(profile(), DialogState::default(), &sink);
            let v = validator(MockClassifier::new());

            assert_eq!(
                v.recognize(&mut ctx, DialogId::Summary, "Yes").await.unwrap(),
                Some(Recognized::Choice(0))
            );
            assert_eq!(
                v.recognize(&mut ctx, DialogId::Summary, "2").await.unwrap(),
                Some(Recognized::Choice(1))
            );
            assert_eq!(v.recognize(&mut ctx, DialogId::Summary, "maybe").await.unwrap(), None);
        }

        #[tokio::test]
        async fn follow_up_matches_thread_choices() {
            let sink = RecordingSink::new();
            let mut p = profile();
            let answer = QnaAnswer::new("We open at 10", "1")
                .with_follow_up("2", "Weekends")
                .with_follow_up("3", "Holidays");
            p.qna = Some(QnaThread::from_answer(&answer, "hours?"));
            let mut ctx = TurnContext::new(p, DialogState::default(), &sink);
            let v = validator(MockClassifier::new());

            assert_eq!(
                v.recognize(&mut ctx, DialogId::QnaFollowUp, "holidays").await.unwrap(),
                Some(Recognized::Choice(1))
            );
        }
    }
}
