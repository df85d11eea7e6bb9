//! vb-stt: Speech-to-text translation for the voicebot gateway
//!
//! Thin client over the Sarvam speech-to-text-translate API. The provider's
//! JSON response is passed through verbatim; only the HTTP status and the
//! language code (for logging) get typed access.

pub mod client;
pub mod error;

pub use client::{SarvamConfig, SttClient, TranslateRequest, DEFAULT_MODEL};
pub use error::{Result, SttError};
