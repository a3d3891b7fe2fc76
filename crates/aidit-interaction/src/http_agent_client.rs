//! HttpAgentClient - REST client for an OpenAI-style chat completions agent.
//!
//! The whole composed prompt travels as a single user message; the reply is
//! read from `choices[0].message.content`. Requests are not streamed and not
//! retried.

use aidit_core::{AgentConfig, AgentInvoker, AiditError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const MISSING_CONTENT: &str = "Invalid response: missing choices[0].message.content";

/// Agent implementation that POSTs prompts to a configured HTTP endpoint.
#[derive(Clone)]
pub struct HttpAgentClient {
    client: Client,
    url: String,
    api_key: Option<String>,
    timeout_secs: u64,
}

impl HttpAgentClient {
    /// Creates a client for `url`, sending `api_key` as a bearer token if given.
    pub fn new(url: impl Into<String>, api_key: Option<String>, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|err| AiditError::config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            url: url.into(),
            api_key,
            timeout_secs,
        })
    }

    /// Builds a client from the resolved agent configuration.
    ///
    /// # Errors
    ///
    /// Returns a config error when no endpoint is configured.
    pub fn from_config(config: &AgentConfig) -> Result<Self> {
        Self::new(
            config.request_url()?,
            config.bearer_key().map(str::to_string),
            config.timeout_secs,
        )
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn send_request(&self, body: &ChatCompletionRequest<'_>) -> Result<String> {
        let mut request = self.client.post(&self.url).json(body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|err| self.map_transport_error(err))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            tracing::warn!("[HttpAgentClient] {} returned {}", self.url, status);
            return Err(AiditError::agent_status(status.as_u16(), body_text));
        }

        let body_text = response
            .text()
            .await
            .map_err(|err| self.map_transport_error(err))?;
        extract_text_response(&body_text)
    }

    fn map_transport_error(&self, err: reqwest::Error) -> AiditError {
        if err.is_timeout() {
            AiditError::Timeout {
                seconds: self.timeout_secs,
            }
        } else {
            AiditError::agent(format!("Agent request failed: {err}"))
        }
    }
}

#[async_trait]
impl AgentInvoker for HttpAgentClient {
    async fn invoke(&self, prompt: &str) -> Result<String> {
        tracing::debug!(
            "[HttpAgentClient] Sending {} chars to {}",
            prompt.len(),
            self.url
        );
        let request = ChatCompletionRequest {
            messages: vec![RequestMessage {
                role: "user",
                content: prompt,
            }],
            stream: false,
        };
        self.send_request(&request).await
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    messages: Vec<RequestMessage<'a>>,
    stream: bool,
}

#[derive(Serialize)]
struct RequestMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Pulls `choices[0].message.content` out of a response body.
///
/// Any string is accepted, including an empty one. Anything else
/// (unparseable JSON, no choices, null or non-string content) is an
/// invalid response.
fn extract_text_response(body: &str) -> Result<String> {
    serde_json::from_str::<ChatCompletionResponse>(body)
        .ok()
        .and_then(|parsed| parsed.choices.into_iter().next())
        .and_then(|choice| choice.message)
        .and_then(|message| message.content)
        .ok_or_else(|| AiditError::agent(MISSING_CONTENT))
}
