use std::sync::Arc;

use crate::data_models::{ConversationTurn, GenerationRequest, SearchResponse};
use crate::searcher::SearchProvider;

/// Cue the model completes after; every composed prompt ends with it.
pub const ASSISTANT_CUE: &str = "<assistant>:";

const SEARCH_PREAMBLE: &str = "\n\nI found the following information from a web search:\n\n";
const CITATION_INSTRUCTION: &str = "Based on this information, please provide a comprehensive answer to my question. Include relevant details from these sources and cite them when appropriate.";

#[derive(Debug, Clone, PartialEq)]
pub struct ComposedPrompt {
    pub text: String,
    /// True when a search ran and contributed at least one result.
    pub search_used: bool,
}

/// Merges system prompt, history, the user's prompt and optional web-search
/// context into the single text prompt the daemon completes.
pub struct PromptComposer<S> {
    searcher: Arc<S>,
}

impl<S> Clone for PromptComposer<S> {
    fn clone(&self) -> Self {
        PromptComposer {
            searcher: self.searcher.clone(),
        }
    }
}

impl<S: SearchProvider> PromptComposer<S> {
    pub fn new(searcher: Arc<S>) -> PromptComposer<S> {
        PromptComposer { searcher }
    }

    pub async fn compose(&self, request: &GenerationRequest) -> ComposedPrompt {
        let search = if request.web_search {
            let response = self
                .searcher
                .search(&request.prompt, request.deep_search)
                .await;
            log::info!("search performed, found {} results", response.len());
            Some(response)
        } else {
            None
        };

        let search_used = search.as_ref().is_some_and(|r| !r.is_empty());
        let enhanced = enhance_prompt(&request.prompt, search.as_ref());
        let history = render_history(&request.conversation_history);

        ComposedPrompt {
            text: assemble(&request.system_prompt, &history, &enhanced),
            search_used,
        }
    }
}

/// Appends a numbered source listing to `prompt` when there are results.
pub fn enhance_prompt(prompt: &str, search: Option<&SearchResponse>) -> String {
    let mut enhanced = prompt.to_string();
    let Some(search) = search.filter(|s| !s.is_empty()) else {
        return enhanced;
    };

    enhanced.push_str(SEARCH_PREAMBLE);
    for (i, result) in search.results.iter().enumerate() {
        enhanced.push_str(&format!(
            "[Source {}]: {}\nURL: {}\nSummary: {}\n\n",
            i + 1,
            result.title,
            result.url,
            result.snippet
        ));
    }
    enhanced.push_str(CITATION_INSTRUCTION);
    enhanced
}

/// Turns with an empty role or empty content are skipped.
pub fn render_history(turns: &[ConversationTurn]) -> String {
    turns
        .iter()
        .filter(|turn| !turn.role.as_str().is_empty() && !turn.content.is_empty())
        .map(|turn| format!("<{}>: {}\n\n", turn.role.as_str(), turn.content))
        .collect()
}

pub fn assemble(system_prompt: &str, history: &str, enhanced_prompt: &str) -> String {
    let mut prompt = format!("{system_prompt}\n\n");
    if !history.is_empty() {
        prompt.push_str(history);
        prompt.push('\n');
    }
    prompt.push_str(&format!("<user>: {enhanced_prompt}\n{ASSISTANT_CUE}"));
    prompt
}
