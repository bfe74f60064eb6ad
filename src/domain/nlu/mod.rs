//! Natural-language understanding values.
//!
//! Read-only results from the intent classifier and the Q&A resolver.

mod classification;
mod qna;

pub use classification::{
    ClassificationResult, Entity, EntityResolution, Intent, NUMBER_ENTITY, PIZZA_DOMAIN_MARKER,
    TOPPINGS_ENTITY,
};
pub use qna::{FollowUp, QnaAnswer, QnaContext, QnaQuery, QnaThread};
