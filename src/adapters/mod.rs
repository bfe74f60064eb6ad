//! Adapters - Implementations of port interfaces.
//!
//! - `memory` - In-process implementations of every port
//! - `luis` - Intent classifier over HTTP
//! - `qna_maker` - Q&A knowledge base over HTTP
//! - `redis` - Price cache and conversation state
//! - `postgres` - Order store and conversation transcripts
//! - `http` - Channel endpoint (axum)

pub mod http;
pub mod luis;
pub mod memory;
pub mod postgres;
pub mod qna_maker;
pub mod redis;
