use axum::{Json, extract::State, extract::rejection::JsonRejection};
use std::sync::Arc;
use std::time::Instant;

use crate::data_models::{GenerationResult, SearchResponse};
use crate::inference::{InferenceError, SamplingOptions};
use crate::searcher::SearchProvider;

use super::AppState;
use super::errors::AppError;
use super::models::{GenerateRequest, SearchRequest, StatusResponse};

pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let status = match state.ollama.has_model_matching(&state.config.model_match).await {
        Ok(has_gemma) => StatusResponse::Running { has_gemma },
        Err(InferenceError::Unreachable(e)) => {
            log::warn!("ollama unreachable: {e}");
            StatusResponse::Error {
                message: "Could not connect to Ollama server".to_string(),
            }
        }
        Err(e) => {
            log::warn!("ollama status check failed: {e}");
            StatusResponse::Error {
                message: "Ollama server returned an error".to_string(),
            }
        }
    };
    Json(status)
}

pub async fn search_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SearchRequest>,
) -> Json<SearchResponse> {
    Json(state.searcher.search(&request.query, request.deep).await)
}

pub async fn generate_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateRequest>, JsonRejection>,
) -> Result<Json<GenerationResult>, AppError> {
    let start = Instant::now();
    let Json(payload) = payload?;
    let request = payload.resolve(&state.config.generation);

    let composed = state.composer.compose(&request).await;
    let options = SamplingOptions {
        temperature: request.temperature,
        top_p: request.top_p,
        max_tokens: request.max_tokens,
    };
    let response = state.ollama.generate(&composed.text, options).await?;

    log::info!(
        "generated {} chars in {}ms (search used: {})",
        response.len(),
        start.elapsed().as_millis(),
        composed.search_used
    );

    Ok(Json(GenerationResult {
        response,
        search_used: composed.search_used,
    }))
}
