//! Chat completion client and types
//!
//! Targets the Groq OpenAI-compatible chat completion API.

mod client;
mod types;

pub use client::ChatClient;
pub use types::*;
