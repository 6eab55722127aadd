use reqwest::header::{
    ACCEPT, ACCEPT_LANGUAGE, CONNECTION, HeaderMap, HeaderName, HeaderValue, REFERER,
    UPGRADE_INSECURE_REQUESTS, USER_AGENT,
};
use reqwest::{StatusCode, Url};
use std::future::Future;
use thiserror::Error;

use crate::config::Config;
use crate::data_models::{SearchResponse, SearchResult};
use crate::extractor::{Extraction, GoogleResultExtractor, ResultExtractor};

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
const ERROR_RESULT_URL: &str = "https://www.example.com";

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search engine unreachable: {0}")]
    UpstreamUnavailable(#[source] reqwest::Error),
    #[error("search engine returned HTTP {0}")]
    UpstreamStatus(StatusCode),
    #[error("results page has no recognizable result markup")]
    FormatMismatch,
    #[error("no results could be paired from the results page")]
    EmptyResult,
    #[error("invalid search url {0}")]
    InvalidUrl(String),
}

impl SearchError {
    /// Stable name of the failure, for logs and assertions.
    pub fn kind(&self) -> &'static str {
        match self {
            SearchError::UpstreamUnavailable(_) => "upstream_unavailable",
            SearchError::UpstreamStatus(_) => "upstream_status",
            SearchError::FormatMismatch => "format_mismatch",
            SearchError::EmptyResult => "empty_result",
            SearchError::InvalidUrl(_) => "invalid_url",
        }
    }
}

/// Anything that can answer a web search. `search` never fails: failures are
/// folded into the returned results.
pub trait SearchProvider: Send + Sync {
    fn search(&self, query: &str, deep: bool) -> impl Future<Output = SearchResponse> + Send;
}

pub struct WebSearcher {
    client: reqwest::Client,
    search_url: String,
    extractor: Box<dyn ResultExtractor>,
}

impl WebSearcher {
    pub fn new(
        client: reqwest::Client,
        search_url: impl Into<String>,
        extractor: Box<dyn ResultExtractor>,
    ) -> WebSearcher {
        WebSearcher {
            client,
            search_url: search_url.into(),
            extractor,
        }
    }

    pub fn from_config(client: reqwest::Client, config: &Config) -> WebSearcher {
        let extractor =
            GoogleResultExtractor::new(config.search_engine_domain.clone(), config.max_results);
        WebSearcher::new(client, config.search_url.clone(), Box::new(extractor))
    }

    /// The results page URL for `query`.
    pub fn search_url_for(&self, query: &str) -> Result<Url, SearchError> {
        Url::parse_with_params(&self.search_url, &[("q", query)])
            .map_err(|e| SearchError::InvalidUrl(format!("{}: {e}", self.search_url)))
    }

    /// Fetches and extracts without any fallback to placeholder results.
    pub async fn try_search(&self, query: &str) -> Result<Extraction, SearchError> {
        let url = self.search_url_for(query)?;
        log::info!("searching with url: {url}");

        let res = self
            .client
            .get(url)
            .headers(browser_headers())
            .send()
            .await
            .map_err(SearchError::UpstreamUnavailable)?;

        let status = res.status();
        if !status.is_success() {
            return Err(SearchError::UpstreamStatus(status));
        }

        let body = res.text().await.map_err(SearchError::UpstreamUnavailable)?;
        self.extractor.extract(&body)
    }

    fn no_results_placeholder(&self, query: &str) -> SearchResult {
        let url = self
            .search_url_for(query)
            .map(|u| u.to_string())
            .unwrap_or_else(|_| self.search_url.clone());
        SearchResult::new(
            "Search Results",
            url,
            "No detailed results could be extracted. Please click the URL to view search results directly.",
        )
    }
}

impl SearchProvider for WebSearcher {
    async fn search(&self, query: &str, deep: bool) -> SearchResponse {
        if query.trim().is_empty() {
            return SearchResponse::empty();
        }
        if deep {
            // Accepted for compatibility; deep and regular searches are the same.
            log::debug!("deep search requested for {query:?}, running a regular search");
        }

        match self.try_search(query).await {
            Ok(extraction) => {
                log::info!(
                    "returning {} search results ({:?} extraction)",
                    extraction.results.len(),
                    extraction.tier
                );
                extraction.results.into()
            }
            Err(e @ SearchError::UpstreamStatus(_)) => {
                log::warn!("search request failed [{}]: {e}", e.kind());
                SearchResponse::empty()
            }
            Err(e @ (SearchError::FormatMismatch | SearchError::EmptyResult)) => {
                log::warn!("search extraction failed [{}]: {e}", e.kind());
                vec![self.no_results_placeholder(query)].into()
            }
            Err(e) => {
                log::error!("search error [{}]: {e:#}", e.kind());
                vec![SearchResult::new(
                    "Search Result",
                    ERROR_RESULT_URL,
                    format!(
                        "Web search was attempted for: {query}. However, an error occurred: {e}"
                    ),
                )]
                .into()
            }
        }
    }
}

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
    headers.insert(REFERER, HeaderValue::from_static("https://www.google.com/"));
    headers.insert(HeaderName::from_static("dnt"), HeaderValue::from_static("1"));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    headers
}
