//! Narrative analysis of the collected news by a language model

use crate::api::Article;
use crate::config::LlmSettings;
use crate::error::Result;
use crate::prompts::analyst_report_prompt;
use digest_llm::{CompletionRequest, LLMProvider, Message};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Render usable articles as `- title: description` lines
///
/// Articles missing a title or description are dropped.
pub fn format_headlines(articles: &[Article]) -> String {
    articles
        .iter()
        .filter_map(Article::headline)
        .map(|(title, description)| format!("- {title}: {description}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Asks the model for an analyst-style report on the news and the portfolio
pub struct NarrativeAnalyzer {
    provider: Arc<dyn LLMProvider>,
    model: String,
    temperature: f32,
}

impl NarrativeAnalyzer {
    pub fn new(provider: Arc<dyn LLMProvider>, settings: &LlmSettings) -> Self {
        Self {
            provider,
            model: settings.model.clone(),
            temperature: settings.temperature,
        }
    }

    /// Produce the narrative report
    ///
    /// One request, no retry; errors propagate to the caller.
    pub async fn analyze(&self, articles: &[Article], tickers: &[String]) -> Result<String> {
        let headlines = format_headlines(articles);
        let prompt = analyst_report_prompt(tickers, &headlines)?;
        debug!(
            prompt_chars = prompt.len(),
            headlines = headlines.lines().count(),
            "Rendered analyst prompt"
        );

        let request = CompletionRequest::builder(&self.model)
            .add_message(Message::user(prompt))
            .temperature(self.temperature)
            .build();

        let response = self.provider.complete(request).await?;
        info!(
            provider = self.provider.name(),
            tokens = response.usage.total(),
            "Narrative analysis received"
        );

        if response.stop_reason.is_truncated() {
            warn!(stop_reason = ?response.stop_reason, "Narrative may be incomplete");
        }

        let narrative = response.message.text().trim().to_string();
        if narrative.is_empty() {
            warn!("Model returned an empty narrative");
        }
        Ok(narrative)
    }
}
