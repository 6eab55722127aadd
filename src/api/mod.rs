use anyhow::{Context, Result};
use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::composer::PromptComposer;
use crate::config::Config;
use crate::inference::OllamaClient;
use crate::searcher::WebSearcher;

pub mod errors;
pub mod handlers;
pub mod models;

/// Shared, read-only per-process state handed to every handler.
pub struct AppState {
    pub config: Config,
    pub searcher: Arc<WebSearcher>,
    pub composer: PromptComposer<WebSearcher>,
    pub ollama: OllamaClient,
}

impl AppState {
    pub fn new(config: Config, searcher: WebSearcher, ollama: OllamaClient) -> AppState {
        let searcher = Arc::new(searcher);
        AppState {
            config,
            composer: PromptComposer::new(searcher.clone()),
            searcher,
            ollama,
        }
    }

    /// Wires the searcher and daemon client from `config`, sharing one HTTP client.
    pub fn build(config: Config) -> Result<AppState> {
        let client = reqwest::Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        let searcher = WebSearcher::from_config(client.clone(), &config);
        let ollama = OllamaClient::from_config(client, &config);
        Ok(AppState::new(config, searcher, ollama))
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let static_files = ServeDir::new(state.config.static_dir.clone());

    Router::new()
        // API routes
        .route("/status", get(handlers::status_handler))
        .route("/search", post(handlers::search_handler))
        .route("/generate", post(handlers::generate_handler))
        .with_state(state)
        // Static file serving for the UI
        .fallback_service(static_files)
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .layer(cors),
        )
}
