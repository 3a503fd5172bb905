use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::ports::{
    InvocationParams, ModelClient, ModelClientError, ModelInput, ModelOutput, Turn,
};

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";

/// Model client against the Anthropic Messages API.
///
/// Performs exactly one call per invoke; the invocation and error counters
/// are observability hooks for the surrounding worker, not functional state.
pub struct AnthropicClient {
    client: Client,
    api_key: String,
    invocations: AtomicU64,
    errors: AtomicU64,
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<WireMessage<'a>>,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: Vec<WireContent<'a>>,
}

#[derive(Serialize)]
struct WireContent<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    #[serde(default)]
    input_tokens: u64,
    #[serde(default)]
    output_tokens: u64,
}

impl AnthropicClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            invocations: AtomicU64::new(0),
            errors: AtomicU64::new(0),
        }
    }

    pub fn invocation_count(&self) -> u64 {
        self.invocations.load(Ordering::Relaxed)
    }

    pub fn error_count(&self) -> u64 {
        self.errors.load(Ordering::Relaxed)
    }

    fn record_error<T>(&self, result: Result<T, ModelClientError>) -> Result<T, ModelClientError> {
        if result.is_err() {
            self.errors.fetch_add(1, Ordering::Relaxed);
        }
        result
    }

    async fn call(
        &self,
        system: &str,
        messages: Vec<WireMessage<'_>>,
        params: &InvocationParams,
    ) -> Result<ModelOutput, ModelClientError> {
        let request_body = MessagesRequest {
            model: &params.model_id,
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            system,
            messages,
        };

        let response = self
            .client
            .post(MESSAGES_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| ModelClientError::ApiRequestFailed(e.to_string()))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ModelClientError::Throttled);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ModelClientError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| ModelClientError::InvalidResponse(e.to_string()))?;

        let text = parsed
            .content
            .first()
            .and_then(|block| block.text.clone())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                ModelClientError::InvalidResponse("missing text in model response".to_string())
            })?;

        let total_tokens = parsed.usage.map(|u| u.input_tokens + u.output_tokens);

        Ok(ModelOutput { text, total_tokens })
    }
}

fn to_wire(turns: &[Turn]) -> Vec<WireMessage<'_>> {
    turns
        .iter()
        .map(|t| WireMessage {
            role: t.role.as_str(),
            content: vec![WireContent {
                kind: "text",
                text: &t.text,
            }],
        })
        .collect()
}

#[async_trait]
impl ModelClient for AnthropicClient {
    async fn invoke(
        &self,
        system: &str,
        input: ModelInput<'_>,
        params: &InvocationParams,
    ) -> Result<ModelOutput, ModelClientError> {
        self.invocations.fetch_add(1, Ordering::Relaxed);

        let messages = match &input {
            ModelInput::SingleShot { text } => vec![WireMessage {
                role: "user",
                content: vec![WireContent { kind: "text", text }],
            }],
            ModelInput::Conversation(turns) => to_wire(turns),
        };

        let result = self.call(system, messages, params).await;
        self.record_error(result)
    }
}
