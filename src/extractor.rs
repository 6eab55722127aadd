use once_cell::sync::Lazy;
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};

use crate::data_models::SearchResult;
use crate::searcher::SearchError;

pub const NO_TITLE: &str = "No title found";
pub const NO_URL: &str = "https://example.com";
pub const NO_SNIPPET: &str = "No description available";

/// Prefix of links routed through the engine's own redirect endpoint.
const REDIRECT_PREFIX: &str = "/url?q=";
const REDIRECT_BASE: &str = "https://redirect.invalid";

static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("h3"));
static ANCHOR_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("a[href]"));
static SNIPPET_SELECTOR: Lazy<Selector> = Lazy::new(|| selector(r#"div[class*="VwiC3b"]"#));
static BLOCK_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("div.g"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("selector is valid")
}

/// Which extraction pass produced the results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionTier {
    /// Titles, links and snippets matched document-wide and paired by position.
    Structured,
    /// Per-result-block matching with placeholders for missing fields.
    Blocks,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub tier: ExtractionTier,
    pub results: Vec<SearchResult>,
}

/// Turns a raw results page into search results. Implementations never touch
/// the network, so a scraper can be swapped for a structured search API
/// without changing the callers.
pub trait ResultExtractor: Send + Sync {
    /// Returns at least one result, or the reason none could be produced.
    fn extract(&self, html: &str) -> Result<Extraction, SearchError>;
}

/// Best-effort matcher for Google's HTML results page. The markup it relies on
/// is undocumented and changes without notice.
#[derive(Debug, Clone)]
pub struct GoogleResultExtractor {
    engine_domain: String,
    max_results: usize,
}

impl Default for GoogleResultExtractor {
    fn default() -> Self {
        GoogleResultExtractor::new("google.com", 5)
    }
}

impl GoogleResultExtractor {
    pub fn new(engine_domain: impl Into<String>, max_results: usize) -> GoogleResultExtractor {
        GoogleResultExtractor {
            engine_domain: engine_domain.into(),
            max_results,
        }
    }

    fn is_engine_url(&self, url: &str) -> bool {
        !self.engine_domain.is_empty() && url.contains(&self.engine_domain)
    }

    fn structured(&self, document: &Html) -> Vec<SearchResult> {
        let titles: Vec<String> = document.select(&TITLE_SELECTOR).map(clean_text).collect();

        let mut urls: Vec<String> = Vec::new();
        for anchor in document.select(&ANCHOR_SELECTOR) {
            let Some(url) = anchor.value().attr("href").and_then(resolve_href) else {
                continue;
            };
            if self.is_engine_url(&url) || urls.contains(&url) {
                continue;
            }
            urls.push(url);
        }

        let snippets: Vec<String> = document
            .select(&SNIPPET_SELECTOR)
            .map(clean_text)
            .collect();

        log::info!(
            "found {} titles, {} urls, {} snippets",
            titles.len(),
            urls.len(),
            snippets.len()
        );

        titles
            .into_iter()
            .zip(urls)
            .zip(snippets)
            .take(self.max_results)
            .map(|((title, url), snippet)| SearchResult { title, url, snippet })
            .collect()
    }

    fn blocks(&self, document: &Html) -> Vec<SearchResult> {
        document
            .select(&BLOCK_SELECTOR)
            .take(self.max_results)
            .map(|block| {
                let title = block
                    .select(&TITLE_SELECTOR)
                    .map(clean_text)
                    .find(|t| !t.is_empty())
                    .unwrap_or_else(|| NO_TITLE.to_string());
                let url = block
                    .select(&ANCHOR_SELECTOR)
                    .filter_map(|a| a.value().attr("href").and_then(resolve_href))
                    .find(|u| !self.is_engine_url(u))
                    .unwrap_or_else(|| NO_URL.to_string());
                let snippet = block
                    .select(&SNIPPET_SELECTOR)
                    .map(clean_text)
                    .find(|s| !s.is_empty())
                    .unwrap_or_else(|| NO_SNIPPET.to_string());
                SearchResult { title, url, snippet }
            })
            .collect()
    }
}

impl ResultExtractor for GoogleResultExtractor {
    fn extract(&self, html: &str) -> Result<Extraction, SearchError> {
        let document = Html::parse_document(html);

        let results = self.structured(&document);
        if !results.is_empty() {
            return Ok(Extraction {
                tier: ExtractionTier::Structured,
                results,
            });
        }

        log::info!("using fallback block extraction");
        let results = self.blocks(&document);
        if !results.is_empty() {
            return Ok(Extraction {
                tier: ExtractionTier::Blocks,
                results,
            });
        }

        let recognizable = document.select(&TITLE_SELECTOR).next().is_some()
            || document.select(&SNIPPET_SELECTOR).next().is_some();
        if recognizable {
            Err(SearchError::EmptyResult)
        } else {
            Err(SearchError::FormatMismatch)
        }
    }
}

/// Resolves a result link to its destination. Redirect-wrapped links carry
/// the destination in their `q` parameter; direct links are kept as they are.
/// Anything else (relative navigation links, fragments) yields `None`.
pub fn resolve_href(href: &str) -> Option<String> {
    if href.starts_with(REDIRECT_PREFIX) {
        let wrapped = Url::parse(&format!("{REDIRECT_BASE}{href}")).ok()?;
        let target = wrapped
            .query_pairs()
            .find(|(key, _)| key == "q")
            .map(|(_, value)| value.into_owned())?;
        return is_absolute_http(&target).then_some(target);
    }
    is_absolute_http(href).then(|| href.to_string())
}

fn is_absolute_http(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Text content of an element with its tags dropped. Entities are already
/// decoded, so `&lt;T&gt;` comes back as the literal text `<T>`.
fn clean_text(element: ElementRef) -> String {
    let text: String = element.text().collect();
    collapse_whitespace(&text)
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
