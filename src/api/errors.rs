use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::inference::InferenceError;

use super::models::ErrorBody;

/// Failures of the generate endpoint. All of them become a JSON error body
/// with a 500 status.
#[derive(Debug)]
pub enum AppError {
    Inference(InferenceError),
    Payload(JsonRejection),
}

impl From<InferenceError> for AppError {
    fn from(err: InferenceError) -> Self {
        AppError::Inference(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(err: JsonRejection) -> Self {
        AppError::Payload(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = match self {
            AppError::Inference(InferenceError::Api { status, body }) => {
                log::error!("error from ollama api: {status}");
                ErrorBody {
                    error: "Error from Ollama API".to_string(),
                    details: Some(body),
                }
            }
            AppError::Inference(err) => {
                log::error!("error in generate: {err:#}");
                ErrorBody {
                    error: err.to_string(),
                    details: None,
                }
            }
            AppError::Payload(rejection) => {
                log::error!("rejected generate payload: {rejection}");
                ErrorBody {
                    error: rejection.body_text(),
                    details: None,
                }
            }
        };

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
