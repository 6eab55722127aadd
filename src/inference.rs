use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;

pub const NO_RESPONSE: &str = "No response from model";

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("could not connect to the inference daemon: {0}")]
    Unreachable(#[source] reqwest::Error),
    #[error("inference daemon returned HTTP {status}: {body}")]
    Api { status: StatusCode, body: String },
    #[error("malformed response from the inference daemon: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Sampling parameters, serialized under the daemon's option names.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SamplingOptions {
    pub temperature: f32,
    pub top_p: f32,
    #[serde(rename = "num_predict")]
    pub max_tokens: i32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModelTag {
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelTag>,
}

#[derive(Debug, Serialize)]
struct GenerateBody<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: SamplingOptions,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: Option<String>,
}

/// Client for a local Ollama daemon. `base_url` is the API root, e.g.
/// `http://localhost:11434/api`.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> OllamaClient {
        OllamaClient {
            client,
            base_url: base_url.into(),
            model: model.into(),
        }
    }

    pub fn from_config(client: reqwest::Client, config: &Config) -> OllamaClient {
        OllamaClient::new(client, config.ollama_url.clone(), config.model.clone())
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url.trim_end_matches('/'))
    }

    pub async fn list_models(&self) -> Result<Vec<ModelTag>, InferenceError> {
        let res = self
            .client
            .get(self.endpoint("tags"))
            .send()
            .await
            .map_err(InferenceError::Unreachable)?;
        let res = error_for_status(res).await?;
        let tags: TagsResponse = res.json().await.map_err(InferenceError::Decode)?;
        Ok(tags.models)
    }

    /// True if any installed model name contains `needle`, ignoring case.
    pub async fn has_model_matching(&self, needle: &str) -> Result<bool, InferenceError> {
        let needle = needle.to_lowercase();
        let models = self.list_models().await?;
        Ok(models
            .iter()
            .any(|m| m.name.to_lowercase().contains(&needle)))
    }

    /// Single non-streaming completion of `prompt`.
    pub async fn generate(
        &self,
        prompt: &str,
        options: SamplingOptions,
    ) -> Result<String, InferenceError> {
        log::info!("sending prompt to ollama (length: {})", prompt.len());
        let body = GenerateBody {
            model: &self.model,
            prompt,
            stream: false,
            options,
        };

        let res = self
            .client
            .post(self.endpoint("generate"))
            .json(&body)
            .send()
            .await
            .map_err(InferenceError::Unreachable)?;
        let res = error_for_status(res).await?;
        let parsed: GenerateResponse = res.json().await.map_err(InferenceError::Decode)?;
        Ok(parsed.response.unwrap_or_else(|| NO_RESPONSE.to_string()))
    }
}

async fn error_for_status(res: reqwest::Response) -> Result<reqwest::Response, InferenceError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let body = res.text().await.unwrap_or_else(|e| {
        log::warn!("could not read ollama error body: {e}");
        String::new()
    });
    log::error!("ollama api error: {status} - {body}");
    Err(InferenceError::Api { status, body })
}
