use anyhow::Context;
use clap::Parser;
use sd_core::{MatchPolicy, SlangDecoderConfig};
use sd_server::{app_with_state, state::AppState};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Social-media slang normalizer over HTTP.
#[derive(Debug, Parser)]
#[command(name = "slang-decoder", version)]
struct Args {
    /// JSON config file.
    #[arg(long, env = "SLANG_DECODER_CONFIG")]
    config: Option<PathBuf>,

    /// Headerless two-column CSV of slang,meaning.
    #[arg(long, env = "SLANG_DECODER_SOURCE")]
    source: Option<PathBuf>,

    #[arg(long)]
    host: Option<String>,

    #[arg(long)]
    port: Option<u16>,

    /// whitespace_token or dictionary_regex.
    #[arg(long)]
    policy: Option<MatchPolicy>,

    /// Reject persist requests.
    #[arg(long)]
    no_persist: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => SlangDecoderConfig::from_file(path)?,
        None => SlangDecoderConfig::default(),
    };
    if let Some(source) = args.source {
        config.source.path = source;
    }
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(policy) = args.policy {
        config.normalizer.policy = policy;
    }
    if args.no_persist {
        config.persistence.enabled = false;
    }

    let addr = config.bind_addr();
    let state = AppState::from_config(&config);
    match state.sessions.warm() {
        Ok(size) => tracing::info!(size, "slang dictionary ready"),
        Err(e) => tracing::warn!(error = %e, "slang dictionary unavailable; sessions will be refused"),
    }
    let app = app_with_state(state);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    tracing::info!(
        addr = %addr,
        source = %config.source.path.display(),
        policy = %config.normalizer.policy,
        persistence = config.persistence.enabled,
        "slang-decoder listening"
    );
    axum::serve(listener, app).await?;
    Ok(())
}
