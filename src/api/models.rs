use serde::{Deserialize, Serialize};

use crate::config::GenerationDefaults;
use crate::data_models::{ConversationTurn, GenerationRequest, null_as_default};

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub query: String,
    /// Accepted but currently has no effect on the search.
    #[serde(default, deserialize_with = "null_as_default")]
    pub deep: bool,
}

/// Wire form of `/generate`; every field is optional.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateRequest {
    pub prompt: Option<String>,
    pub system_prompt: Option<String>,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub max_tokens: Option<i32>,
    pub web_search: Option<bool>,
    pub deep_search: Option<bool>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub conversation_history: Vec<ConversationTurn>,
}

impl GenerateRequest {
    pub fn resolve(self, defaults: &GenerationDefaults) -> GenerationRequest {
        GenerationRequest {
            prompt: self.prompt.unwrap_or_default(),
            system_prompt: self.system_prompt.unwrap_or_default(),
            temperature: self.temperature.unwrap_or(defaults.temperature),
            top_p: self.top_p.unwrap_or(defaults.top_p),
            max_tokens: self.max_tokens.unwrap_or(defaults.max_tokens),
            web_search: self.web_search.unwrap_or(defaults.web_search),
            deep_search: self.deep_search.unwrap_or(defaults.deep_search),
            conversation_history: self.conversation_history,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum StatusResponse {
    Running { has_gemma: bool },
    Error { message: String },
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
