//! Question answering adapter.
//!
//! - `QnaMakerResolver` - QnaResolver backed by a QnA Maker knowledge base

mod qna_maker_resolver;

pub use qna_maker_resolver::{QnaMakerConfig, QnaMakerResolver};
