//! Pizza Bot - Turn-based slot-filling dialog engine
//!
//! A chat user orders pizza by answering a short sequence of prompts
//! (delivery or pickup, quantity, toppings, address) which the engine fills
//! from classifier output. The completed order is priced, confirmed and
//! submitted. Messages outside the ordering domain are answered from a Q&A
//! knowledge base, including multi-turn follow-ups.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
