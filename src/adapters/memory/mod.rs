//! In-process adapters.
//!
//! Every port has an implementation here so the engine can run without any
//! external service. Tests script the classifier and Q&A resolver and switch
//! stores into failure modes to exercise recovery paths.

mod fixed_price_lookup;
mod in_memory_conversation_log;
mod in_memory_order_store;
mod in_memory_state_store;
mod mock_classifier;
mod mock_qna;
mod recording_sink;

pub use fixed_price_lookup::FixedPriceLookup;
pub use in_memory_conversation_log::{InMemoryConversationLog, LoggedConversation};
pub use in_memory_order_store::InMemoryOrderStore;
pub use in_memory_state_store::InMemoryStateStore;
pub use mock_classifier::MockClassifier;
pub use mock_qna::MockQnaResolver;
pub use recording_sink::RecordingSink;
