//! Language understanding adapter.
//!
//! - `LuisClassifier` - NluClassifier backed by a LUIS prediction endpoint

mod luis_classifier;

pub use luis_classifier::{LuisClassifier, LuisConfig};
