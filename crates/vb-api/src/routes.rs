//! Route definitions
//!
//! One router per service; the two services share nothing but this crate.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{generate_response, health, speech_to_text_translate};
use crate::server::{ResponseState, SttState};

/// Router for the response-and-emotion service
pub fn response_routes() -> Router<ResponseState> {
    Router::new()
        // Health check
        .route("/health", get(health))
        // Response generation endpoint
        .route("/generate-response", post(generate_response))
}

/// Router for the speech-to-text-translate service
pub fn stt_routes() -> Router<SttState> {
    Router::new()
        // Health check
        .route("/health", get(health))
        // Transcription endpoint
        .route("/speech-to-text-translate", post(speech_to_text_translate))
}
