//! Integration tests for whole conversations.
//!
//! Each test drives `TurnDispatcher::handle_turn` the way the channel
//! endpoint does, with in-memory adapters behind every port:
//! 1. Ordering flows from the opening message to a stored order
//! 2. Recovery paths (retries, cancellation, failed submission)
//! 3. Member joins and multi-turn Q&A

use std::sync::Arc;

use pizza_bot::adapters::memory::{
    FixedPriceLookup, InMemoryConversationLog, InMemoryOrderStore, InMemoryStateStore,
    MockClassifier, MockQnaResolver, RecordingSink,
};
use pizza_bot::application::{BotSettings, DialogPorts, TurnDispatcher};
use pizza_bot::domain::conversation::{Activity, ChannelAccount, OutboundMessage};
use pizza_bot::domain::dialog::templates;
use pizza_bot::domain::foundation::ConversationId;
use pizza_bot::domain::nlu::{ClassificationResult, Entity, QnaAnswer};
use pizza_bot::domain::order::{OrderStatus, OrderType};

// =============================================================================
// Test Infrastructure
// =============================================================================

struct Bot {
    store: InMemoryStateStore,
    log: InMemoryConversationLog,
    orders: InMemoryOrderStore,
    qna: MockQnaResolver,
    sink: RecordingSink,
    dispatcher: TurnDispatcher,
}

impl Bot {
    fn new(classifier: MockClassifier, qna: MockQnaResolver) -> Self {
        Self::with_settings(classifier, qna, BotSettings::default())
    }

    fn with_settings(classifier: MockClassifier, qna: MockQnaResolver, settings: BotSettings) -> Self {
        let store = InMemoryStateStore::new();
        let log = InMemoryConversationLog::new();
        let orders = InMemoryOrderStore::new();
        let ports = DialogPorts {
            classifier: Arc::new(classifier),
            qna: Arc::new(qna.clone()),
            profiles: Arc::new(store.clone()),
            dialogs: Arc::new(store.clone()),
            conversation_log: Arc::new(log.clone()),
            prices: Arc::new(FixedPriceLookup::new(50, 5)),
            orders: Arc::new(orders.clone()),
        };
        Self {
            store,
            log,
            orders,
            qna,
            sink: RecordingSink::new(),
            dispatcher: TurnDispatcher::new(ports, settings),
        }
    }

    /// Sends a user message and returns the texts of the replies.
    async fn say(&self, text: &str) -> Vec<String> {
        let activity = Activity::message(conversation(), Some(dana()), text);
        self.dispatcher
            .handle_turn(&activity, &self.sink)
            .await
            .expect("turn failed");
        self.sink
            .take()
            .iter()
            .filter_map(|m| m.text_content().map(str::to_string))
            .collect()
    }
}

fn conversation() -> ConversationId {
    ConversationId::new("conv-42").unwrap()
}

fn dana() -> ChannelAccount {
    ChannelAccount::new("user-1", Some("Dana"))
}

fn toppings(names: &[&str]) -> ClassificationResult {
    ClassificationResult::new("addToppings").with_entity(Entity::toppings(names.iter().copied()))
}

fn delivery_script() -> MockClassifier {
    MockClassifier::new()
        .with_intent("pizzaDelivery")
        .with_number("None", 2)
        .with_result(toppings(&["olives"]))
}

// =============================================================================
// Ordering
// =============================================================================

#[tokio::test]
async fn delivery_intent_prompts_for_quantity() {
    let bot = Bot::new(MockClassifier::new().with_intent("pizzaDelivery"), MockQnaResolver::new());

    let replies = bot.say("I want a pizza delivery").await;

    assert_eq!(replies, vec![templates::QUANTITY_PROMPT.text.to_string()]);
    let profile = bot.store.profile(&conversation()).await.unwrap();
    assert_eq!(profile.slots.order_type(), Some(OrderType::Delivery));
}

#[tokio::test]
async fn full_delivery_order_is_priced_and_stored() {
    let bot = Bot::new(delivery_script(), MockQnaResolver::new());

    bot.say("I want a pizza delivery").await;
    assert_eq!(
        bot.say("two please").await,
        vec![
            templates::QUANTITY_ACK.to_string(),
            templates::TOPPINGS_PROMPT.text.to_string()
        ]
    );
    assert_eq!(
        bot.say("olives").await,
        vec![
            templates::TOPPINGS_ACK.to_string(),
            templates::ADDRESS_PROMPT.text.to_string()
        ]
    );
    assert_eq!(
        bot.say("Herzl 1, Tel Aviv").await,
        vec![
            templates::SUMMARY_INTRO.to_string(),
            "a delivery of 2 pizzas with olives to Herzl 1, Tel Aviv".to_string(),
            "Would you like to approve the order for a total of 110 NIS?".to_string(),
        ]
    );

    let replies = bot.say("yes").await;

    assert_eq!(replies, vec![templates::completion_message(OrderType::Delivery)]);
    let orders = bot.orders.orders().await;
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].price, 110);
    assert_eq!(orders[0].quantity, 2);
    assert_eq!(orders[0].toppings, "olives");
    assert_eq!(orders[0].username, "Dana");
    assert_eq!(orders[0].user_address, "Herzl 1, Tel Aviv");

    let profile = bot.store.profile(&conversation()).await.unwrap();
    assert!(profile.slots.is_empty());
    assert_eq!(profile.outcome.status, Some(OrderStatus::Success));
    assert!(bot.store.dialog(&conversation()).await.stack.is_empty());
}

#[tokio::test]
async fn price_is_known_exactly_when_order_is_priceable() {
    let bot = Bot::new(delivery_script(), MockQnaResolver::new());

    for reply in ["I want a pizza delivery", "two please", "olives", "Herzl 1"] {
        bot.say(reply).await;
        let slots = bot.store.profile(&conversation()).await.unwrap().slots;
        assert_eq!(
            slots.is_priceable(),
            slots.price().is_some(),
            "after {:?}: {:?}",
            reply,
            slots
        );
    }

    let slots = bot.store.profile(&conversation()).await.unwrap().slots;
    assert_eq!(slots.price(), Some(110));
}

#[tokio::test]
async fn pickup_opening_with_everything_goes_straight_to_summary() {
    let opening = ClassificationResult::new("pizzaPickup")
        .with_entity(Entity::number("3"))
        .with_entity(Entity::toppings(["corn"]));
    let bot = Bot::new(MockClassifier::new().with_result(opening), MockQnaResolver::new());

    let replies = bot.say("3 pickup pizzas with corn").await;

    assert_eq!(replies[0], templates::SUMMARY_INTRO);
    assert_eq!(replies[1], "a pickup of 3 pizzas with corn");
    assert_eq!(replies[2], "Would you like to approve the order for a total of 165 NIS?");
}

#[tokio::test]
async fn declining_toppings_orders_plain_pizza() {
    let bot = Bot::new(
        MockClassifier::new()
            .with_intent("pizzaPickup")
            .with_number("None", 1)
            .with_intent("no"),
        MockQnaResolver::new(),
    );

    bot.say("pickup please").await;
    bot.say("one").await;
    let replies = bot.say("no thanks").await;

    assert_eq!(replies[0], templates::PLAIN_PIZZA_ACK);
    assert_eq!(replies[2], "a pickup of a pizza with no toppings");
    assert_eq!(replies[3], "Would you like to approve the order for a total of 50 NIS?");

    bot.say("yes").await;
    assert_eq!(bot.orders.orders().await[0].toppings, "");
}

#[tokio::test]
async fn unclear_reply_is_reprompted_with_retry_text() {
    let bot = Bot::new(
        MockClassifier::new()
            .with_intent("pizzaOrder")
            .with_intent("None")
            .with_intent("None")
            .with_intent("pizzaPickup"),
        MockQnaResolver::new(),
    );

    assert_eq!(
        bot.say("I'm hungry for pizza").await,
        vec![templates::ORDER_TYPE_PROMPT.text.to_string()]
    );
    assert_eq!(
        bot.say("hmm").await,
        vec![templates::ORDER_TYPE_PROMPT.retry.to_string()]
    );
    assert_eq!(
        bot.say("what?").await,
        vec![templates::ORDER_TYPE_PROMPT.retry.to_string()]
    );
    assert_eq!(
        bot.say("pickup").await,
        vec![
            templates::order_type_ack(OrderType::Pickup),
            templates::QUANTITY_PROMPT.text.to_string()
        ]
    );
}

#[tokio::test]
async fn rejecting_the_summary_cancels_the_order() {
    let bot = Bot::new(
        MockClassifier::new()
            .with_result(
                ClassificationResult::new("pizzaPickup")
                    .with_entity(Entity::number("2"))
                    .with_entity(Entity::toppings(["olives"])),
            ),
        MockQnaResolver::new(),
    );
    bot.say("2 pickup pizzas with olives").await;

    let replies = bot.say("no").await;

    assert_eq!(replies, vec![templates::CANCELLED.to_string()]);
    assert!(bot.orders.orders().await.is_empty());
    let profile = bot.store.profile(&conversation()).await.unwrap();
    assert!(profile.is_reset());
    assert!(bot.store.dialog(&conversation()).await.stack.is_empty());
}

#[tokio::test]
async fn summary_accepts_only_listed_choices() {
    let bot = Bot::new(
        MockClassifier::new().with_result(
            ClassificationResult::new("pizzaPickup")
                .with_entity(Entity::number("1"))
                .with_entity(Entity::toppings(["olives"])),
        ),
        MockQnaResolver::new(),
    );
    bot.say("one pickup pizza with olives").await;

    let replies = bot.say("maybe").await;

    assert_eq!(replies, vec![templates::CHOICE_RETRY.to_string()]);
    assert!(bot.orders.orders().await.is_empty());
}

#[tokio::test]
async fn failed_submission_offers_phone_and_keeps_identity() {
    let bot = Bot::new(delivery_script(), MockQnaResolver::new());
    bot.orders.set_failing(true);
    bot.say("I want a pizza delivery").await;
    bot.say("two").await;
    bot.say("olives").await;
    bot.say("Herzl 1").await;

    let replies = bot.say("yes").await;

    assert_eq!(replies, vec![templates::submission_failure_message("03-6324422")]);
    let profile = bot.store.profile(&conversation()).await.unwrap();
    assert!(profile.slots.is_empty());
    assert_eq!(profile.outcome.status, Some(OrderStatus::Failure));
    assert_eq!(profile.identity.user_id.as_str(), "Dana");
    assert_eq!(profile.identity.conversation_id, conversation());
}

#[tokio::test]
async fn completion_card_follows_success_when_configured() {
    let settings = BotSettings {
        completion_gif_url: "https://media.example/pizza.gif".to_string(),
        ..BotSettings::default()
    };
    let bot = Bot::with_settings(delivery_script(), MockQnaResolver::new(), settings);
    bot.say("I want a pizza delivery").await;
    bot.say("two").await;
    bot.say("olives").await;
    bot.say("Herzl 1").await;

    let activity = Activity::message(conversation(), Some(dana()), "yes");
    bot.dispatcher.handle_turn(&activity, &bot.sink).await.unwrap();

    let messages = bot.sink.take();
    assert_eq!(
        messages.last(),
        Some(&OutboundMessage::animation(
            templates::COMPLETION_CARD_TITLE,
            "https://media.example/pizza.gif"
        ))
    );
}

// =============================================================================
// Conversation lifecycle
// =============================================================================

#[tokio::test]
async fn member_join_is_welcomed_once() {
    let bot = Bot::new(MockClassifier::new(), MockQnaResolver::new());
    let join = Activity::members_added(conversation(), vec![dana()]);

    bot.dispatcher.handle_turn(&join, &bot.sink).await.unwrap();
    bot.dispatcher.handle_turn(&join, &bot.sink).await.unwrap();

    assert_eq!(
        bot.sink.texts(),
        vec!["Hi there Dana. How can I help you?".to_string()]
    );
    assert_eq!(bot.store.profile_count().await, 1);
    assert!(bot.log.conversation(&conversation()).await.is_some());
}

#[tokio::test]
async fn bot_joining_is_not_welcomed() {
    let bot = Bot::new(MockClassifier::new(), MockQnaResolver::new());
    let join = Activity::members_added(
        conversation(),
        vec![ChannelAccount::new("bot-1", Some("PizzaBot"))],
    );

    bot.dispatcher.handle_turn(&join, &bot.sink).await.unwrap();

    assert!(bot.sink.messages().is_empty());
    assert_eq!(bot.store.profile_count().await, 0);
}

#[tokio::test]
async fn every_turn_is_appended_to_the_transcript() {
    let bot = Bot::new(MockClassifier::new().with_intent("pizzaDelivery"), MockQnaResolver::new());

    bot.say("delivery please").await;

    let logged = bot.log.conversation(&conversation()).await.unwrap();
    assert_eq!(logged.turns.len(), 1);
    assert_eq!(logged.turns[0].user_utterance.as_deref(), Some("delivery please"));
    assert_eq!(
        logged.turns[0].bot_utterances,
        vec![templates::QUANTITY_PROMPT.text.to_string()]
    );
}

// =============================================================================
// Q&A
// =============================================================================

#[tokio::test]
async fn multi_turn_answer_follows_up_with_context() {
    let bot = Bot::new(
        MockClassifier::new().with_intent("None"),
        MockQnaResolver::new()
            .with_answer(
                QnaAnswer::new("Which day are you asking about?", "10")
                    .with_follow_up("11", "Weekdays")
                    .with_follow_up("12", "Weekends"),
            )
            .with_answer(QnaAnswer::new("We open at noon on weekends", "12")),
    );

    bot.say("when are you open?").await;
    assert!(bot.store.profile(&conversation()).await.unwrap().qna.is_some());

    let replies = bot.say("Weekends").await;

    assert_eq!(replies, vec!["We open at noon on weekends".to_string()]);
    let queries = bot.qna.queries();
    assert_eq!(queries.len(), 2);
    assert_eq!(queries[1].question, "Weekends");
    assert_eq!(queries[1].qna_id.as_deref(), Some("12"));
    let context = queries[1].context.as_ref().unwrap();
    assert_eq!(context.previous_qna_id, "10");
    assert_eq!(context.previous_user_query, "when are you open?");
    assert!(bot.store.profile(&conversation()).await.unwrap().qna.is_none());
}

#[tokio::test]
async fn follow_up_prompt_lists_choices() {
    let bot = Bot::new(
        MockClassifier::new().with_intent("None"),
        MockQnaResolver::new().with_answer(
            QnaAnswer::new("Which day are you asking about?", "10")
                .with_follow_up("11", "Weekdays")
                .with_follow_up("12", "Weekends"),
        ),
    );

    let activity = Activity::message(conversation(), Some(dana()), "when are you open?");
    bot.dispatcher.handle_turn(&activity, &bot.sink).await.unwrap();

    assert_eq!(
        bot.sink.messages(),
        vec![OutboundMessage::choices(
            "Which day are you asking about?",
            ["Weekdays", "Weekends"]
        )]
    );
}

#[tokio::test]
async fn unanswerable_question_gets_apology() {
    let bot = Bot::new(MockClassifier::new().with_intent("None"), MockQnaResolver::new());

    let replies = bot.say("what is the meaning of life?").await;

    assert_eq!(replies, vec![templates::QNA_APOLOGY.to_string()]);
}
