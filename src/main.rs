use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use chatbridge::api::{AppState, create_router};
use chatbridge::config::Config;

/// Chat UI bridge to a local Ollama daemon with web-search context.
#[derive(Parser, Debug)]
#[command(name = "chatbridge", version)]
struct Cli {
    #[arg(long)]
    host: Option<String>,
    #[arg(long)]
    port: Option<u16>,
    /// Directory the UI is served from
    #[arg(long)]
    static_dir: Option<PathBuf>,
    /// Daemon API root, e.g. http://localhost:11434/api
    #[arg(long)]
    ollama_url: Option<String>,
    #[arg(long)]
    model: Option<String>,
    #[arg(long)]
    search_url: Option<String>,
}

impl Cli {
    fn apply(self, config: &mut Config) {
        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(dir) = self.static_dir {
            config.static_dir = dir;
        }
        if let Some(url) = self.ollama_url {
            config.ollama_url = url;
        }
        if let Some(model) = self.model {
            config.model = model;
        }
        if let Some(url) = self.search_url {
            config.search_url = url;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber (handles both tracing and log crate)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let mut config = Config::from_env();
    Cli::parse().apply(&mut config);
    let addr = config.bind_addr()?;

    log::info!("starting chatbridge on http://{addr}");
    log::info!("ollama at {} using model {}", config.ollama_url, config.model);
    log::info!("serving ui from {}", config.static_dir.display());

    let state = AppState::build(config)?;
    let app = create_router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
