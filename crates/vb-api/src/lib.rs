//! vb-api: HTTP API layer for the voicebot gateway
//!
//! Exposes the two inbound services:
//! - response-and-emotion (`POST /generate-response`)
//! - speech-to-text-translate (`POST /speech-to-text-translate`)

pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;

pub use error::{ApiError, ErrorResponse};
pub use server::{start_response_server, start_stt_server, ResponseState, SttState};
