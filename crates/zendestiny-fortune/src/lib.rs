//! AI consultation layer: the generative-language client, prompt
//! construction, the multi-turn chat session, and the day-scoped
//! daily-fortune cache.
//!
//! Every failure here is non-fatal to the host: a chart stays fully usable
//! with no fortune data, and a failed chat turn is simply retryable.

pub mod cache;
pub mod chat;
pub mod client;
pub mod error;
pub mod prompt;
pub mod types;

pub use cache::{cache_key, FortuneCache};
pub use chat::ChatSession;
pub use client::GeminiClient;
pub use error::FortuneError;
