use anyhow::{Context, Result};
use clap::Parser;
use interview_api::config::{Config, ServiceConfig};
use interview_api::state::AppState;
use interview_core::SessionStore;
use interview_core::generator::InterviewerClient;
use interview_core::prompt_loader::load_prompts_if_present;
use interview_core::speech::SpeechClient;
use interview_core::transcription::TranscriptionClient;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::fmt::time::ChronoLocal;

#[derive(Parser)]
#[command(version, about = "Mock interview relay server")]
struct Cli {
    /// Overrides BIND_ADDRESS.
    #[arg(long)]
    bind: Option<SocketAddr>,
    /// Overrides PROMPTS_DIR.
    #[arg(long)]
    prompts_dir: Option<PathBuf>,
}

fn warn_if_unconfigured(name: &str, service: &ServiceConfig) {
    if service.api_key.is_none() {
        warn!("No API key for the {} service; its endpoint will return errors", name);
    }
}

async fn shutdown_signal() {
    shutdown_on(tokio::signal::ctrl_c()).await
}

async fn shutdown_on(signal: impl Future<Output = std::io::Result<()>>) {
    match signal.await {
        Ok(()) => info!("Received Ctrl-C, shutting down..."),
        Err(e) => {
            // Without a signal handler the server keeps running until killed.
            error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // --- 1. Load Configuration ---
    let cli = Cli::parse();
    let mut config = Config::from_env().context("Failed to load application configuration")?;
    if let Some(bind) = cli.bind {
        config.bind_address = bind;
    }
    if let Some(dir) = cli.prompts_dir {
        config.prompts_dir = dir;
    }

    // --- 2. Initialize Logging ---
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(ChronoLocal::rfc_3339())
        .init();

    info!("Configuration loaded successfully. Starting interview server...");

    // --- 3. Load Prompts ---
    let prompts =
        load_prompts_if_present(&config.prompts_dir).context("Failed to load LLM prompts")?;
    info!("Loaded {} prompts.", prompts.len());

    // --- 4. Initialize Collaborator Clients ---
    warn_if_unconfigured("generation", &config.generation);
    warn_if_unconfigured("speech", &config.speech);
    warn_if_unconfigured("transcription", &config.transcription);

    let mut generator =
        InterviewerClient::new(config.generation.api_key.take()).with_prompts(&prompts);
    if let Some(base_url) = &config.generation.base_url {
        generator = generator.with_base_url(base_url);
    }
    if let Some(model) = &config.generation_model {
        generator = generator.with_model(model);
    }

    let mut synthesizer = SpeechClient::new(config.speech.api_key.take());
    if let Some(base_url) = &config.speech.base_url {
        synthesizer = synthesizer.with_base_url(base_url);
    }
    if let Some(voice_id) = &config.speech_voice_id {
        synthesizer = synthesizer.with_voice_id(voice_id);
    }

    let mut transcriber = TranscriptionClient::new(config.transcription.api_key.take());
    if let Some(base_url) = &config.transcription.base_url {
        transcriber = transcriber.with_base_url(base_url);
    }

    // --- 5. Build the Application ---
    let store = Arc::new(SessionStore::new());
    let state = AppState::new(
        store,
        Arc::new(generator),
        Arc::new(synthesizer),
        Arc::new(transcriber),
    );
    let cors = interview_api::cors_layer(&config.allowed_origin)?;
    let app = interview_api::app(state, cors);

    // --- 6. Serve ---
    let listener = tokio::net::TcpListener::bind(config.bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address))?;
    info!("Server running on {}", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutting down...");
    Ok(())
}
