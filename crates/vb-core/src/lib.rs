//! vb-core: Voicebot Gateway Core Library
//!
//! Configuration, the Groq chat completion client, and the
//! response-and-emotion orchestration shared by the gateway services.

pub mod config;
pub mod error;
pub mod helpline;
pub mod llm;

pub use config::{Config, LlmConfig, SttConfig};
pub use error::{Error, Result};
pub use helpline::{generate_response_and_emotion, ResponseAndEmotion, EMOTIONS};
pub use llm::{ChatClient, ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
