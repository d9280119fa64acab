/// LLM Client: the single point of entry for all Gemini API calls.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini API directly.
/// Generation code is written against the `TextGenerator` trait; `GeminiClient`
/// is the production implementation.
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

pub mod prompts;

/// Used when discovery fails or finds nothing usable.
pub const FALLBACK_MODEL: &str = "models/gemini-1.5-flash";
/// Retries after the first attempt, so three calls in total.
const MAX_RETRIES: u32 = 2;
/// Retry `n` waits `n * RETRY_BASE_DELAY`.
const RETRY_BASE_DELAY: Duration = Duration::from_millis(1500);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
const MAX_MODEL_PAGES: usize = 10;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("LLM call failed after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },
}

/// Anything that turns a prompt into text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenates the text parts of the first candidate.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelList {
    #[serde(default)]
    models: Vec<ModelInfo>,
    next_page_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelInfo {
    pub name: String,
    #[serde(default)]
    pub supported_generation_methods: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleError {
    error: GoogleErrorBody,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// Gemini client with lazy model discovery, retry logic and fence stripping.
///
/// The discovered model is cached per client, so clones share one lookup.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    pinned_model: Option<String>,
    model: Arc<OnceCell<String>>,
    retry_base_delay: Duration,
}

impl GeminiClient {
    /// Builds a client on top of a shared connection pool (see [`http_client`]).
    pub fn new(
        client: Client,
        api_key: String,
        base_url: &str,
        pinned_model: Option<String>,
    ) -> Self {
        Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            pinned_model,
            model: Arc::new(OnceCell::new()),
            retry_base_delay: RETRY_BASE_DELAY,
        }
    }

    /// Overrides the linear backoff step. Tests use `Duration::ZERO`.
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }

    /// Returns the model used for generation, resolving it on first use.
    pub async fn model(&self) -> &str {
        self.model
            .get_or_init(|| async {
                match &self.pinned_model {
                    Some(pinned) => normalize_model_name(pinned),
                    None => self.discover_model().await,
                }
            })
            .await
    }

    /// Prefers a flash model, then a pro model, then the hardcoded fallback.
    async fn discover_model(&self) -> String {
        match self.list_models().await {
            Ok(models) => match pick_model(&models) {
                Some(name) => {
                    info!("Using Gemini model {name}");
                    name
                }
                None => {
                    warn!(
                        "No flash or pro model among {} listed; falling back to {FALLBACK_MODEL}",
                        models.len()
                    );
                    FALLBACK_MODEL.to_string()
                }
            },
            Err(e) => {
                warn!("Model discovery failed ({e}); falling back to {FALLBACK_MODEL}");
                FALLBACK_MODEL.to_string()
            }
        }
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>, LlmError> {
        let url = format!("{}/v1beta/models", self.base_url);
        let mut models = Vec::new();
        let mut page_token: Option<String> = None;

        for _ in 0..MAX_MODEL_PAGES {
            let mut request = self
                .client
                .get(&url)
                .header("x-goog-api-key", &self.api_key)
                .query(&[("pageSize", "100")]);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }

            let response = request.send().await?;
            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message: google_error_message(body),
                });
            }

            let page: ModelList = response.json().await?;
            models.extend(page.models);
            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        Ok(models)
    }

    async fn call_once(&self, url: &str, prompt: &str) -> Result<String, LlmError> {
        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: google_error_message(body),
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;

        if let Some(usage) = &parsed.usage_metadata {
            debug!(
                "LLM call succeeded: prompt_tokens={}, output_tokens={}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        match parsed.text() {
            Some(text) => Ok(strip_code_fences(&text).to_string()),
            None => {
                if let Some(reason) = parsed
                    .candidates
                    .first()
                    .and_then(|c| c.finish_reason.as_deref())
                {
                    debug!("Gemini returned no text (finish reason: {reason})");
                }
                if let Some(reason) = parsed
                    .prompt_feedback
                    .as_ref()
                    .and_then(|f| f.block_reason.as_deref())
                {
                    warn!("Gemini blocked the prompt: {reason}");
                }
                Err(LlmError::EmptyContent)
            }
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    /// Retries transport failures, 429, 5xx and empty output with linear backoff.
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let model = self.model().await.to_string();
        let url = format!("{}/v1beta/{}:generateContent", self.base_url, model);

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..=MAX_RETRIES {
            if attempt > 0 {
                let delay = self.retry_base_delay * attempt;
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            match self.call_once(&url, prompt).await {
                Ok(text) => return Ok(text),
                Err(e) if is_retryable(&e) => {
                    warn!("LLM call to {model} failed: {e}");
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or(LlmError::RetriesExhausted {
            attempts: MAX_RETRIES + 1,
        }))
    }
}

/// HTTP client with the Gemini request timeout; cheap to clone and share.
pub fn http_client() -> Result<Client, LlmError> {
    Ok(Client::builder().timeout(REQUEST_TIMEOUT).build()?)
}

fn is_retryable(error: &LlmError) -> bool {
    match error {
        LlmError::Http(_) | LlmError::EmptyContent => true,
        LlmError::Api { status, .. } => *status == 429 || *status >= 500,
        _ => false,
    }
}

/// Pulls `error.message` out of a Google error body, or returns the raw body.
fn google_error_message(body: String) -> String {
    serde_json::from_str::<GoogleError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}

/// Picks the first generation-capable model containing `flash`, else `pro`.
pub fn pick_model(models: &[ModelInfo]) -> Option<String> {
    let usable: Vec<&ModelInfo> = models
        .iter()
        .filter(|m| {
            m.supported_generation_methods.is_empty()
                || m
                    .supported_generation_methods
                    .iter()
                    .any(|method| method == "generateContent")
        })
        .collect();

    ["flash", "pro"].iter().find_map(|needle| {
        usable
            .iter()
            .find(|m| m.name.contains(needle))
            .map(|m| m.name.clone())
    })
}

fn normalize_model_name(name: &str) -> String {
    let name = name.trim();
    if name.starts_with("models/") {
        name.to_string()
    } else {
        format!("models/{name}")
    }
}

/// Strips a leading ```lang fence and a trailing ``` fence from LLM output.
pub fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = match rest.split_once('\n') {
        Some((tag, body)) if is_fence_tag(tag.trim()) => body,
        // ```json["A"]``` on one line
        _ => rest.trim_start_matches(|c: char| c.is_ascii_alphabetic()),
    };
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// `json`, `markdown`, `c++`, or nothing at all.
fn is_fence_tag(tag: &str) -> bool {
    tag.chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '+' | '_'))
}
