//! vb-gateway: Voicebot Gateway Main Binary
//!
//! Hosts the two HTTP microservices behind the disaster-helpline voice bot:
//! response-and-emotion and speech-to-text-translate.
//!
//! Usage:
//!   vb-gateway             - Start both services
//!   vb-gateway --response  - Start only the response-and-emotion service
//!   vb-gateway --stt       - Start only the speech-to-text-translate service
//!   vb-gateway --help      - Show help

use tracing_subscriber::EnvFilter;

use vb_core::llm::ChatClient;
use vb_core::Config;
use vb_stt::{SarvamConfig, SttClient};

/// Run mode
enum RunMode {
    /// Both services
    All,
    /// Response-and-emotion service only
    Response,
    /// Speech-to-text-translate service only
    Stt,
    /// Show help
    Help,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let mode = parse_args();

    match mode {
        RunMode::Help => {
            print_help();
            return Ok(());
        }
        RunMode::Version => {
            println!("vb-gateway {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        _ => {}
    }

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    // Load .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::load().map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    tracing::info!("Starting vb-gateway...");

    let start_response = matches!(mode, RunMode::All | RunMode::Response);
    let start_stt = matches!(mode, RunMode::All | RunMode::Stt);

    // Missing credentials abort startup before any listener is bound.
    if start_response {
        config
            .llm
            .require_api_key()
            .map_err(|e| anyhow::anyhow!("{}", e))?;
    }
    if start_stt {
        config
            .stt
            .require_api_key()
            .map_err(|e| anyhow::anyhow!("{}", e))?;
    }

    // Track running services for shutdown
    let mut service_handles = Vec::new();

    if start_response {
        let chat_client = ChatClient::new(&config.llm)
            .map_err(|e| anyhow::anyhow!("Failed to create chat client: {}", e))?;
        let port = config.llm.port;

        tracing::info!("Model: {}", config.llm.model);

        let handle = tokio::spawn(async move {
            if let Err(e) = vb_api::start_response_server(port, chat_client).await {
                tracing::error!("Response-and-emotion service error: {}", e);
            }
        });
        service_handles.push(handle);
        tracing::info!("Response-and-emotion service started on port {}", port);
    }

    if start_stt {
        let mut sarvam_config =
            SarvamConfig::new(config.stt.api_key.clone()).with_model(config.stt.model.clone());
        if let Some(base_url) = config.stt.base_url.clone() {
            sarvam_config = sarvam_config.with_base_url(base_url);
        }
        let stt_client = SttClient::new(sarvam_config)
            .map_err(|e| anyhow::anyhow!("Failed to create STT client: {}", e))?;
        let port = config.stt.port;

        let handle = tokio::spawn(async move {
            if let Err(e) = vb_api::start_stt_server(port, stt_client).await {
                tracing::error!("Speech-to-text-translate service error: {}", e);
            }
        });
        service_handles.push(handle);
        tracing::info!("Speech-to-text-translate service started on port {}", port);
    }

    tracing::info!("vb-gateway initialized successfully");
    tracing::info!("Press Ctrl+C to exit");

    // Wait for shutdown signal
    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down...");

    for handle in service_handles {
        handle.abort();
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Parse command line arguments
fn parse_args() -> RunMode {
    let args: Vec<String> = std::env::args().collect();

    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--response" | "-r" => return RunMode::Response,
            "--stt" | "-s" => return RunMode::Stt,
            "--help" | "-h" => return RunMode::Help,
            "--version" | "-v" => return RunMode::Version,
            _ => {}
        }
    }

    RunMode::All
}

/// Print help message
fn print_help() {
    println!("vb-gateway - Voicebot Gateway");
    println!();
    println!("Usage:");
    println!("  vb-gateway             Start both services");
    println!("  vb-gateway --response  Start only the response-and-emotion service");
    println!("  vb-gateway --stt       Start only the speech-to-text-translate service");
    println!("  vb-gateway --help      Show this help message");
    println!("  vb-gateway --version   Show version");
    println!();
    println!("Environment Variables:");
    println!("  GROQ_API_KEY           Chat provider API key (required for --response)");
    println!("  GROQ_MODEL             Chat model (default: meta-llama/llama-4-scout-17b-16e-instruct)");
    println!("  GROQ_BASE_URL          Custom chat API endpoint");
    println!("  RESPONSE_PORT          Response service port (default: 8001)");
    println!("  SARVAM_API_KEY         Transcription provider API key (required for --stt)");
    println!("  SARVAM_MODEL           Translation model (default: saaras:v2)");
    println!("  SARVAM_BASE_URL        Custom transcription API endpoint");
    println!("  STT_PORT               Transcription service port (default: 8000)");
}
