//! HTTP API handlers
//!
//! Request handlers for the response-and-emotion and
//! speech-to-text-translate services.

use axum::extract::multipart::Field;
use axum::extract::{Multipart, State};
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, info};

use vb_core::helpline::{self, ResponseAndEmotion};
use vb_stt::TranslateRequest;

use crate::error::ApiError;
use crate::server::{ResponseState, SttState};

// ============================================================================
// Request types
// ============================================================================

/// Request payload for response generation
#[derive(Debug, Deserialize)]
pub struct TextRequest {
    /// Caller's message text
    pub input_text: String,
}

// ============================================================================
// Handler functions
// ============================================================================

/// Health check endpoint
pub async fn health() -> &'static str {
    "OK"
}

/// Generate a helpline reply and emotion label for the caller's text
pub async fn generate_response(
    State(state): State<ResponseState>,
    Json(req): Json<TextRequest>,
) -> Result<Json<ResponseAndEmotion>, ApiError> {
    info!("Received input text: {}", excerpt(&req.input_text));

    match helpline::generate_response_and_emotion(&state.chat_client, &req.input_text).await {
        Ok(result) => Ok(Json(result)),
        Err(e) => {
            error!("Response generation failed: {}", e);
            Err(ApiError::Internal(e.to_string()))
        }
    }
}

/// Forward an uploaded audio file to the transcription provider
pub async fn speech_to_text_translate(
    State(state): State<SttState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let mut audio: Option<(Vec<u8>, String, String)> = None;
    let mut prompt: Option<String> = None;
    let mut with_diarization = false;
    let mut num_speakers: Option<u32> = None;
    let mut model: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart payload: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "audio" => {
                let filename = field.file_name().unwrap_or("audio").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or(mime::APPLICATION_OCTET_STREAM.as_ref())
                    .to_string();
                let data = field.bytes().await.map_err(|e| {
                    ApiError::BadRequest(format!("Failed to read audio field: {}", e))
                })?;
                audio = Some((data.to_vec(), filename, content_type));
            }
            "prompt" => prompt = Some(text_field(field).await?),
            "with_diarization" => {
                let value = text_field(field).await?;
                with_diarization = parse_bool(&value).ok_or_else(|| {
                    ApiError::BadRequest(format!(
                        "with_diarization must be a boolean, got '{}'",
                        value
                    ))
                })?;
            }
            "num_speakers" => {
                let value = text_field(field).await?;
                num_speakers = Some(value.trim().parse().map_err(|_| {
                    ApiError::BadRequest(format!("num_speakers must be an integer, got '{}'", value))
                })?);
            }
            "model" => model = Some(text_field(field).await?),
            other => debug!("Ignoring unknown multipart field: {}", other),
        }
    }

    let (data, filename, content_type) =
        audio.ok_or_else(|| ApiError::BadRequest("audio file is required".to_string()))?;

    info!("Received audio file: {} ({} bytes)", filename, data.len());

    let mut request = TranslateRequest::new(data, filename, content_type);
    request.prompt = prompt;
    request.with_diarization = with_diarization;
    request.num_speakers = num_speakers;
    request.model = model;

    let result = state
        .stt_client
        .speech_to_text_translate(request)
        .await
        .map_err(|e| {
            error!("Transcription failed: {}", e);
            ApiError::from(e)
        })?;

    Ok(Json(result))
}

async fn text_field(field: Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart field: {}", e)))
}

/// Form-style boolean, matching what HTTP clients actually send
fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Trim caller input down for log lines
fn excerpt(text: &str) -> String {
    const MAX_CHARS: usize = 80;
    if text.chars().count() <= MAX_CHARS {
        text.to_string()
    } else {
        let head: String = text.chars().take(MAX_CHARS).collect();
        format!("{}...", head)
    }
}
