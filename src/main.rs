use std::path::PathBuf;

use anyhow::anyhow;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{Level, info, warn};

use wyoming_deepgram::{AppState, BridgeMode, Capabilities, ServerConfig, server};

/// Wyoming Deepgram - speech-to-text and text-to-speech bridge for Home Assistant
#[derive(Parser, Debug)]
#[command(name = "wyoming-deepgram")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (YAML)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Serve both capabilities on one port (combined) or one port each (split)
    #[arg(long = "mode", value_name = "MODE")]
    mode: Option<BridgeMode>,

    /// Address to bind
    #[arg(long = "host", value_name = "HOST")]
    host: Option<String>,

    /// Transcription port (also the combined-mode port)
    #[arg(long = "stt-port", value_name = "PORT")]
    stt_port: Option<u16>,

    /// Synthesis port in split mode
    #[arg(long = "tts-port", value_name = "PORT")]
    tts_port: Option<u16>,
}

impl Cli {
    fn apply_overrides(&self, config: &mut ServerConfig) {
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(ref host) = self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.stt_port {
            config.stt_port = port;
        }
        if let Some(port) = self.tts_port {
            config.tts_port = port;
        }
    }
}

async fn bind(address: &str) -> anyhow::Result<TcpListener> {
    TcpListener::bind(address)
        .await
        .map_err(|e| anyhow!("Failed to bind {}: {}", address, e))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists (must be done before config loading)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Load configuration from file or environment
    let mut config = if let Some(ref config_path) = cli.config {
        println!("Loading configuration from {}", config_path.display());
        ServerConfig::from_file(config_path).map_err(|e| anyhow!(e.to_string()))?
    } else {
        ServerConfig::from_env().map_err(|e| anyhow!(e.to_string()))?
    };
    cli.apply_overrides(&mut config);
    config.validate().map_err(|e| anyhow!(e))?;

    let max_level = if config.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(max_level).init();

    if !config.has_credential() {
        warn!("DEEPGRAM_API_KEY not set! Server will start but transcription/synthesis will fail.");
    }

    info!(
        "Starting Wyoming Deepgram bridge (mode={}, stt_model={}, tts_model={}, output_rate={})",
        config.mode, config.stt_model, config.tts_model, config.tts_output_sample_rate
    );
    if !config.stt_keywords.is_empty() {
        info!("Boosting {} keywords", config.stt_keywords.len());
    }

    let mode = config.mode;
    let stt_address = config.stt_address();
    let tts_address = config.tts_address();

    let state = AppState::new(config).map_err(|e| anyhow!("Failed to create speech client: {}", e))?;

    match mode {
        BridgeMode::Combined => {
            let listener = bind(&stt_address).await?;
            tokio::select! {
                result = server::serve(listener, state, Capabilities::Combined) => result?,
                _ = tokio::signal::ctrl_c() => info!("Shutdown signal received"),
            }
        }
        BridgeMode::Split => {
            let stt_listener = bind(&stt_address).await?;
            let tts_listener = bind(&tts_address).await?;
            tokio::select! {
                result = server::serve(stt_listener, state.clone(), Capabilities::TranscriptionOnly) => result?,
                result = server::serve(tts_listener, state, Capabilities::SynthesisOnly) => result?,
                _ = tokio::signal::ctrl_c() => info!("Shutdown signal received"),
            }
        }
    }

    Ok(())
}
