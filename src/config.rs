use dotenvy::dotenv;
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434/api";
pub const DEFAULT_MODEL: &str = "gemma2:2b";
pub const DEFAULT_SEARCH_URL: &str = "https://www.google.com/search";

/// Sampling defaults applied to `/generate` requests that leave a field out.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationDefaults {
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: i32,
    pub web_search: bool,
    pub deep_search: bool,
}

impl Default for GenerationDefaults {
    fn default() -> Self {
        GenerationDefaults {
            temperature: 0.7,
            top_p: 0.9,
            max_tokens: 1000,
            web_search: true,
            deep_search: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Root of the static UI assets.
    pub static_dir: PathBuf,
    /// Base of the daemon API, e.g. `http://localhost:11434/api`.
    pub ollama_url: String,
    pub model: String,
    /// Case-insensitive substring looked for in the daemon's model list.
    pub model_match: String,
    pub search_url: String,
    /// Results linking back to this domain are dropped.
    pub search_engine_domain: String,
    pub max_results: usize,
    pub generation: GenerationDefaults,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: "127.0.0.1".to_string(),
            port: 5000,
            static_dir: PathBuf::from("."),
            ollama_url: DEFAULT_OLLAMA_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            model_match: "gemma".to_string(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            search_engine_domain: "google.com".to_string(),
            max_results: 5,
            generation: GenerationDefaults::default(),
        }
    }
}

impl Config {
    /// Build a config from the process environment, loading `.env` if present.
    pub fn from_env() -> Config {
        dotenv().ok();
        let defaults = Config::default();
        Config {
            host: get_env_or_default("CHATBRIDGE_HOST", &defaults.host),
            port: get_env_parsed("CHATBRIDGE_PORT", defaults.port),
            static_dir: env::var("CHATBRIDGE_STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            ollama_url: get_env_or_default("OLLAMA_URL", &defaults.ollama_url),
            model: get_env_or_default("OLLAMA_MODEL", &defaults.model),
            model_match: get_env_or_default("OLLAMA_MODEL_MATCH", &defaults.model_match),
            search_url: get_env_or_default("SEARCH_URL", &defaults.search_url),
            search_engine_domain: get_env_or_default(
                "SEARCH_ENGINE_DOMAIN",
                &defaults.search_engine_domain,
            ),
            max_results: get_env_parsed("SEARCH_MAX_RESULTS", defaults.max_results),
            generation: defaults.generation,
        }
    }

    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|e| anyhow::anyhow!("invalid bind address {addr}: {e}"))
    }
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn get_env_parsed<T>(key: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("ignoring malformed {key}={raw:?}, using {default}");
            default
        }),
        Err(_) => default,
    }
}
