use anyhow::Result;
use clap::{Parser, Subcommand};
use interview_copilot::audio::{AudioBackendConfig, AudioBackendFactory, AudioSource};
use interview_copilot::{
    AppState, Config, CopilotSession, GeminiAssistant, HttpTranscriber, JsonStore, PipelineConfig,
    SessionStore,
};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "interview-copilot")]
#[command(about = "Live interview answer suggestions")]
struct Cli {
    /// Config file base path, without extension
    #[arg(long, default_value = "config/interview-copilot")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP backend for session and transcript storage
    Serve,

    /// Capture audio, transcribe it, and print answer suggestions live
    Listen {
        /// Read audio from a WAV file instead of the microphone
        #[arg(short, long)]
        input: Option<String>,

        /// Resume an existing session instead of creating a fresh one
        #[arg(short, long)]
        session_id: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let cfg = Config::load(&cli.config)?;

    info!("{} starting", cfg.service.name);

    match cli.command {
        Command::Serve => serve(cfg).await,
        Command::Listen { input, session_id } => listen(cfg, input, session_id).await,
    }
}

async fn serve(cfg: Config) -> Result<()> {
    let store: Arc<dyn SessionStore> = Arc::new(JsonStore::open(&cfg.storage.data_dir)?);
    let assistant = Arc::new(GeminiAssistant::from_config(&cfg.assistant)?);

    info!("Storage directory: {}", cfg.storage.data_dir);
    info!("Assistant model: {}", cfg.assistant.model);

    let state = AppState::new(store, assistant, cfg.conversation.context_window);
    let router = interview_copilot::create_router(state);

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("HTTP server listening on {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}

async fn listen(cfg: Config, input: Option<String>, session_id: Option<String>) -> Result<()> {
    let backend_config = AudioBackendConfig {
        target_sample_rate: cfg.audio.sample_rate,
        target_channels: cfg.audio.channels,
        ..Default::default()
    };

    let source_label = input.as_deref().unwrap_or("microphone").to_string();
    let source = match input {
        Some(path) => AudioSource::File(path),
        None => AudioSource::Microphone,
    };

    let backend = AudioBackendFactory::create(source, backend_config)?;

    let transcriber = Arc::new(HttpTranscriber::from_config(&cfg.stt)?);
    let assistant = Arc::new(GeminiAssistant::from_config(&cfg.assistant)?);
    let store: Arc<dyn SessionStore> = Arc::new(JsonStore::open(&cfg.storage.data_dir)?);

    let mut pipeline_config = PipelineConfig::from_app_config(&cfg);
    if let Some(id) = session_id {
        pipeline_config.session_id = id;
    }

    let session = CopilotSession::new(pipeline_config, transcriber, assistant, Some(store));

    let events = session.start(backend).await?;
    let display = tokio::spawn(interview_copilot::display::run_console(events));

    info!("Listening on {} - press Ctrl+C to stop", source_label);
    tokio::signal::ctrl_c().await?;

    let stats = session.stop().await?;
    display.await?;

    info!(
        "Session {}: {} segments captured, {} transcripts, {} answers in {:.1}s",
        session.session_id(),
        stats.segments_captured,
        stats.transcripts_recognized,
        stats.answers_generated,
        stats.duration_secs
    );

    Ok(())
}
