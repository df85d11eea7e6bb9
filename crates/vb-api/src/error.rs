//! Error types for vb-api

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error payload returned to clients
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// vb-api error type
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed client request
    #[error("{0}")]
    BadRequest(String),

    /// Provider failure, relayed with its original status and body
    #[error("provider returned status {status}")]
    Provider {
        status: u16,
        body: String,
        content_type: Option<String>,
    },

    /// Anything else, surfaced as a 500 with the error's message
    #[error("{0}")]
    Internal(String),
}

impl From<vb_core::Error> for ApiError {
    fn from(e: vb_core::Error) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<vb_stt::SttError> for ApiError {
    fn from(e: vb_stt::SttError) -> Self {
        match e {
            vb_stt::SttError::Provider {
                status,
                body,
                content_type,
            } => ApiError::Provider {
                status,
                body,
                content_type,
            },
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(detail) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse { detail })).into_response()
            }
            ApiError::Internal(detail) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse { detail }),
            )
                .into_response(),
            ApiError::Provider {
                status,
                body,
                content_type,
            } => {
                // The provider's status and body are relayed unaltered.
                let status =
                    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                match content_type {
                    Some(ct) => (status, [(header::CONTENT_TYPE, ct)], body).into_response(),
                    None => (status, body).into_response(),
                }
            }
        }
    }
}
