use async_trait::async_trait;
use retail_agents_core::DEFAULT_MODEL;

use crate::ai_types::{AssistantMessage, ChatRequest, ChatResponse, ContentPart, Message};
use crate::error::LlmError;

/// Sampling settings shared by every agent request.
const TEMPERATURE: f32 = 0.0;
const SEED: i64 = 44;
/// Token cap for image captions.
const CAPTION_MAX_TOKENS: u32 = 500;

/// A chat model the agents can talk to. Implemented by [`LlmClient`];
/// tests substitute scripted models.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Model identifier placed in requests.
    fn model(&self) -> &str;

    /// Send one completion request and return the assistant's reply.
    async fn complete(&self, request: &ChatRequest) -> Result<AssistantMessage, LlmError>;

    /// Request with this model and the shared sampling settings.
    fn request(&self, messages: Vec<Message>) -> ChatRequest {
        ChatRequest::new(self.model(), messages).with_temperature(TEMPERATURE).with_seed(SEED)
    }

    /// Ask the model to describe an image.
    async fn describe_image(&self, image_url: &str, instruction: &str) -> Result<String, LlmError> {
        let request = self
            .request(vec![Message::user_parts(vec![
                ContentPart::text(instruction),
                ContentPart::image(image_url),
            ])])
            .with_max_tokens(CAPTION_MAX_TOKENS);
        let reply = self.complete(&request).await?;
        reply.content.ok_or(LlmError::EmptyResponse)
    }
}

/// Client for LLM API calls.
pub struct LlmClient {
    pub(crate) client: reqwest::Client,
    pub(crate) api_key: String,
    pub(crate) base_url: String,
    pub(crate) model: String,
}

impl std::fmt::Debug for LlmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmClient")
            .field("client", &self.client)
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

impl LlmClient {
    /// Creates a new LLM client with the given API key and base URL.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(api_key: String, base_url: String) -> Result<Self, LlmError> {
        let base_url = base_url.trim_end_matches('/').to_owned();
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .map_err(|e| LlmError::ClientInit(e.to_string()))?;
        Ok(Self { client, api_key, base_url, model: DEFAULT_MODEL.to_owned() })
    }

    /// Sets a custom model for this client.
    #[must_use]
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    /// Send a chat completion request and return the first choice's message.
    ///
    /// Transient failures (connection errors, 429, 5xx) are retried with backoff.
    ///
    /// # Errors
    /// Returns an error if the HTTP request fails, the API returns a
    /// non-success status, the response body cannot be parsed, or the choices
    /// array is empty.
    pub async fn send(&self, request: &ChatRequest) -> Result<AssistantMessage, LlmError> {
        const MAX_RETRIES: usize = 3;
        const RETRY_DELAYS: [u64; 4] = [0, 1, 2, 4];
        let mut last_error: Option<LlmError> = None;

        for attempt in 0..=MAX_RETRIES {
            if attempt > 0 {
                let delay_secs = RETRY_DELAYS.get(attempt).copied().unwrap_or(4);
                let delay = std::time::Duration::from_secs(delay_secs);
                tokio::time::sleep(delay).await;
                tracing::warn!("LLM retry attempt {attempt}/{MAX_RETRIES} after {delay:?}");
            }

            let response_result = self
                .client
                .post(format!("{}/v1/chat/completions", self.base_url))
                .header("Authorization", format!("Bearer {}", self.api_key))
                .json(request)
                .send()
                .await;

            let response = match response_result {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::HttpRequest(e));
                    continue;
                },
            };

            let status = response.status();
            if status.is_success() {
                let body = match response.text().await {
                    Ok(b) => b,
                    Err(e) => {
                        last_error = Some(LlmError::HttpRequest(e));
                        continue;
                    },
                };

                let chat_response: ChatResponse =
                    serde_json::from_str(&body).map_err(|e| LlmError::JsonParse {
                        context: format!(
                            "chat completion response (body: {})",
                            truncate(&body, 200)
                        ),
                        source: e,
                    })?;

                let first_choice =
                    chat_response.choices.into_iter().next().ok_or(LlmError::EmptyResponse)?;
                tracing::debug!(
                    model = %request.model,
                    tool_calls = first_choice.message.tool_calls.len(),
                    "chat completion received"
                );
                return Ok(first_choice.message);
            }

            let status_code = status.as_u16();
            let body =
                response.text().await.unwrap_or_else(|_| "Could not read error body".to_owned());

            let err = LlmError::HttpStatus { code: status_code, body };
            if err.is_transient() {
                last_error = Some(err);
                continue;
            }
            return Err(err);
        }

        Err(LlmError::RetriesExhausted(Box::new(last_error.unwrap_or(LlmError::EmptyResponse))))
    }
}

#[async_trait]
impl ChatModel for LlmClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, request: &ChatRequest) -> Result<AssistantMessage, LlmError> {
        self.send(request).await
    }
}

/// Truncates a string to the given maximum length at a char boundary.
#[must_use]
pub fn truncate(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        s
    } else {
        let mut end = max_len;
        while end > 0 && !s.is_char_boundary(end) {
            end = end.saturating_sub(1);
        }
        s.get(..end).unwrap_or("")
    }
}
