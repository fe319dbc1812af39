//! Evidence summaries from a hosted language model

use async_trait::async_trait;
use citesearch_parser::CitationRecord;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::config::SummarizerConfig;
use crate::error::{Result, SearchError};

/// Records beyond this many are left out of the prompt
pub const MAX_SUMMARY_RECORDS: usize = 5;

const SYSTEM_PROMPT: &str = "You are a clinical evidence assistant. Summarize the provided \
PubMed articles as they relate to the clinical scenario. Cite articles by PMID and do not \
invent findings that are not in the abstracts.";

#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize `records` with respect to a clinical scenario
    async fn summarize(&self, scenario: &str, records: &[CitationRecord]) -> Result<String>;
}

/// Render the user prompt: the scenario followed by up to
/// [`MAX_SUMMARY_RECORDS`] titles and abstracts
pub fn build_summary_prompt(scenario: &str, records: &[CitationRecord]) -> String {
    let mut prompt = format!("Clinical scenario:\n{}\n\nArticles:\n", scenario.trim());

    for (i, record) in records.iter().take(MAX_SUMMARY_RECORDS).enumerate() {
        prompt.push_str(&format!(
            "\n{}. {} (PMID {})\n",
            i + 1,
            record.title,
            record.id
        ));
        if record.has_abstract() {
            prompt.push_str(&format!("Abstract: {}\n", record.abstract_text));
        } else {
            prompt.push_str("Abstract: not available\n");
        }
    }

    prompt
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Summarizer backed by an OpenAI-compatible `/chat/completions` endpoint
#[derive(Clone)]
pub struct ChatCompletionSummarizer {
    client: Client,
    config: SummarizerConfig,
}

impl ChatCompletionSummarizer {
    pub fn new(config: SummarizerConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build configured HTTP client, using defaults");
                Client::new()
            });

        Self { client, config }
    }
}

#[async_trait]
impl Summarizer for ChatCompletionSummarizer {
    #[instrument(skip(self, records), fields(records = records.len(), model = %self.config.model))]
    async fn summarize(&self, scenario: &str, records: &[CitationRecord]) -> Result<String> {
        if records.is_empty() {
            return Err(SearchError::SummarizationError(
                "no records to summarize".to_string(),
            ));
        }

        let prompt = build_summary_prompt(scenario, records);
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let url = format!("{}/chat/completions", self.config.effective_base_url());
        let mut request = self.client.post(&url).json(&body);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        debug!(prompt_len = prompt.len(), "Requesting summary");
        let response = request.send().await?;

        if !response.status().is_success() {
            warn!("Summary request failed with status: {}", response.status());
            return Err(SearchError::ApiError {
                status: response.status().as_u16(),
                message: response
                    .status()
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string(),
            });
        }

        let text = response.text().await?;
        let parsed: ChatResponse = serde_json::from_str(&text)?;

        let summary = parsed
            .choices
            .into_iter()
            .find_map(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| {
                SearchError::SummarizationError("model returned no content".to_string())
            })?;

        info!(summary_len = summary.len(), "Summary generated");
        Ok(summary)
    }
}
