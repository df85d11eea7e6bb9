//! Speech-to-text translation via the Sarvam API
//!
//! Forwards an uploaded audio payload to the provider's
//! speech-to-text-translate endpoint and returns the JSON body verbatim.

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::error::{Result, SttError};

const DEFAULT_BASE_URL: &str = "https://api.sarvam.ai";

/// Default translation model
pub const DEFAULT_MODEL: &str = "saaras:v2";

/// Configuration for the Sarvam client
#[derive(Debug, Clone)]
pub struct SarvamConfig {
    /// API subscription key
    pub api_key: String,
    /// API base URL
    pub base_url: String,
    /// Model used when a request does not name one
    pub model: String,
}

impl SarvamConfig {
    /// Create a new configuration with the default endpoint and model
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Override the base URL (for testing or custom endpoints)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the default model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

/// A speech-to-text-translate request
#[derive(Debug, Clone)]
pub struct TranslateRequest {
    /// Raw audio payload, read fully into memory
    pub audio: Vec<u8>,
    /// Filename of the upload
    pub filename: String,
    /// MIME type of the upload
    pub content_type: String,
    /// Optional prompt to guide transcription
    pub prompt: Option<String>,
    /// Whether to label speakers in the transcript
    pub with_diarization: bool,
    /// Speaker count hint; only sent when diarization is enabled
    pub num_speakers: Option<u32>,
    /// Model override; the configured default is used when absent
    pub model: Option<String>,
}

impl TranslateRequest {
    pub fn new(
        audio: Vec<u8>,
        filename: impl Into<String>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            audio,
            filename: filename.into(),
            content_type: content_type.into(),
            prompt: None,
            with_diarization: false,
            num_speakers: None,
            model: None,
        }
    }

    /// Set a transcription prompt
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// Enable diarization with an optional speaker count
    pub fn with_diarization(mut self, num_speakers: Option<u32>) -> Self {
        self.with_diarization = true;
        self.num_speakers = num_speakers;
        self
    }
}

/// Client for the Sarvam speech-to-text-translate API
pub struct SttClient {
    client: Client,
    config: SarvamConfig,
}

impl SttClient {
    /// Create a new STT client
    pub fn new(config: SarvamConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .map_err(|e| SttError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Forward an audio payload for transcription and translation.
    ///
    /// The provider's JSON body is returned unmodified. A non-success
    /// provider status is surfaced as [`SttError::Provider`] carrying the
    /// exact status code and raw body. Exactly one attempt is made.
    pub async fn speech_to_text_translate(&self, request: TranslateRequest) -> Result<Value> {
        let url = format!("{}/speech-to-text-translate", self.config.base_url);
        let model = request.model.unwrap_or_else(|| self.config.model.clone());

        info!(
            "Transcribing audio: {} bytes, filename: {}",
            request.audio.len(),
            request.filename
        );
        debug!(
            "Using model: {}, diarization: {}",
            model, request.with_diarization
        );

        let mut form = reqwest::multipart::Form::new()
            .text("model", model)
            .text("with_diarization", request.with_diarization.to_string())
            .part(
                "file",
                reqwest::multipart::Part::bytes(request.audio)
                    .file_name(request.filename)
                    .mime_str(&request.content_type)
                    .map_err(|e| {
                        SttError::InvalidFormat(format!("Failed to set mime type: {}", e))
                    })?,
            );

        if let Some(prompt) = request.prompt.filter(|p| !p.is_empty()) {
            form = form.text("prompt", prompt);
        }

        // num_speakers is only meaningful together with diarization; the
        // field is omitted entirely unless both conditions hold.
        if request.with_diarization {
            if let Some(num_speakers) = request.num_speakers {
                form = form.text("num_speakers", num_speakers.to_string());
            }
        }

        debug!("Sending request to transcription API: {}", url);

        let response = self
            .client
            .post(&url)
            .header("api-subscription-key", &self.config.api_key)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        debug!("Provider responded with status {}", status);

        if !status.is_success() {
            let content_type = response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(|s| s.to_string());
            let body = response.text().await.unwrap_or_default();
            error!("Error from transcription API: {} - {}", status, body);
            return Err(SttError::Provider {
                status: status.as_u16(),
                body,
                content_type,
            });
        }

        let result: Value = response.json().await?;

        info!(
            "Transcription success. Language: {}",
            result
                .get("language_code")
                .and_then(|v| v.as_str())
                .unwrap_or("unknown")
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> SttClient {
        let config = SarvamConfig::new("sarvam-test-key").with_base_url(server.uri());
        SttClient::new(config).unwrap()
    }

    fn wav_request() -> TranslateRequest {
        TranslateRequest::new(b"RIFFfake".to_vec(), "clip.wav", "audio/wav")
    }

    async fn received_body(server: &MockServer) -> String {
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        String::from_utf8_lossy(&requests[0].body).into_owned()
    }

    #[tokio::test]
    async fn test_passthrough_of_provider_json() {
        let server = MockServer::start().await;
        let expected = serde_json::json!({"language_code": "ml-IN", "transcript": "hello"});

        Mock::given(method("POST"))
            .and(path("/speech-to-text-translate"))
            .and(header("api-subscription-key", "sarvam-test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(expected.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let result = client.speech_to_text_translate(wav_request()).await.unwrap();

        assert_eq!(result, expected);
    }

    #[tokio::test]
    async fn test_provider_status_and_body_preserved() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/speech-to-text-translate"))
            .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let err = client.speech_to_text_translate(wav_request()).await.unwrap_err();

        match err {
            SttError::Provider { status, body, .. } => {
                assert_eq!(status, 429);
                assert_eq!(body, "rate limited");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_num_speakers_omitted_without_diarization() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/speech-to-text-translate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let mut request = wav_request();
        request.num_speakers = Some(3); // supplied but diarization stays off
        client.speech_to_text_translate(request).await.unwrap();

        let body = received_body(&server).await;
        assert!(!body.contains("num_speakers"));
        assert!(body.contains(r#"name="with_diarization""#));
        assert!(body.contains("false"));
    }

    #[tokio::test]
    async fn test_num_speakers_sent_with_diarization() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/speech-to-text-translate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let request = wav_request().with_diarization(Some(2));
        client.speech_to_text_translate(request).await.unwrap();

        let body = received_body(&server).await;
        assert!(body.contains(r#"name="num_speakers""#));
        assert!(body.contains("true"));
    }

    #[tokio::test]
    async fn test_diarization_without_count_omits_num_speakers() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/speech-to-text-translate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let request = wav_request().with_diarization(None);
        client.speech_to_text_translate(request).await.unwrap();

        let body = received_body(&server).await;
        assert!(!body.contains("num_speakers"));
    }

    #[tokio::test]
    async fn test_empty_prompt_is_omitted() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/speech-to-text-translate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let mut request = wav_request();
        request.prompt = Some(String::new());
        client.speech_to_text_translate(request).await.unwrap();

        let body = received_body(&server).await;
        assert!(!body.contains(r#"name="prompt""#));
    }

    #[tokio::test]
    async fn test_prompt_filename_and_default_model_are_sent() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/speech-to-text-translate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let request = wav_request().with_prompt("flood report");
        client.speech_to_text_translate(request).await.unwrap();

        let body = received_body(&server).await;
        assert!(body.contains(r#"name="prompt""#));
        assert!(body.contains("flood report"));
        assert!(body.contains(r#"filename="clip.wav""#));
        assert!(body.contains("saaras:v2"));
    }
}
