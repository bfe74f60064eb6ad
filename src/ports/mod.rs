//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the dialog engine and the outside world. Adapters implement these ports.
//!
//! ## Language Ports
//!
//! - `NluClassifier` - Intent and entity classification
//! - `QnaResolver` - Question answering, including multi-turn follow-ups
//!
//! ## State Ports
//!
//! - `ProfileStore` - Per-conversation profile
//! - `DialogStateStore` - Per-conversation dialog stack
//! - `ConversationLog` - Transcript for statistics
//!
//! ## Ordering Ports
//!
//! - `PriceLookup` - Unit prices
//! - `OrderStore` - Completed orders
//!
//! ## Transport Ports
//!
//! - `MessageSink` - Outbound messages of a turn

mod conversation_log;
mod message_sink;
mod nlu_classifier;
mod order_store;
mod price_lookup;
mod qna_resolver;
mod state_store;

pub use conversation_log::{ConversationLog, ConversationLogError};
pub use message_sink::{MessageSink, SinkError};
pub use nlu_classifier::{ClassifierError, NluClassifier};
pub use order_store::{OrderStore, OrderStoreError};
pub use price_lookup::{PriceLookup, PriceLookupError};
pub use qna_resolver::{QnaError, QnaResolver};
pub use state_store::{DialogStateStore, ProfileStore, StoreError};
