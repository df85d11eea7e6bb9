//! HTTP API servers
//!
//! Starts and manages the two axum-based services. Each is a stateless leaf
//! adapter over one provider; the only state shared across requests is the
//! read-only client holding the credential.

use axum::extract::DefaultBodyLimit;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

use vb_core::llm::ChatClient;
use vb_stt::SttClient;

use crate::routes::{response_routes, stt_routes};

/// Audio uploads can exceed axum's 2 MiB default body limit.
const MAX_AUDIO_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Shared state for the response-and-emotion service
#[derive(Clone)]
pub struct ResponseState {
    pub chat_client: Arc<ChatClient>,
}

/// Shared state for the speech-to-text-translate service
#[derive(Clone)]
pub struct SttState {
    pub stt_client: Arc<SttClient>,
}

/// Start the response-and-emotion HTTP server
pub async fn start_response_server(port: u16, chat_client: ChatClient) -> anyhow::Result<()> {
    let state = ResponseState {
        chat_client: Arc::new(chat_client),
    };

    let app = response_routes()
        .layer(CorsLayer::permissive())
        .with_state(state);

    serve("response-and-emotion", port, app).await
}

/// Start the speech-to-text-translate HTTP server
pub async fn start_stt_server(port: u16, stt_client: SttClient) -> anyhow::Result<()> {
    let state = SttState {
        stt_client: Arc::new(stt_client),
    };

    let app = stt_routes()
        .layer(DefaultBodyLimit::max(MAX_AUDIO_UPLOAD_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(state);

    serve("speech-to-text-translate", port, app).await
}

async fn serve(name: &str, port: u16, app: Router) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("{} service listening on {}", name, addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
