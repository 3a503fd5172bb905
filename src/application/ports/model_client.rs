use async_trait::async_trait;

/// One request/response round-trip with the generative model.
///
/// Implementations perform a single call and never retry: retry policy
/// belongs to the generation loop, which distinguishes "the model did not
/// format its answer" from "the model API failed".
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn invoke(
        &self,
        system: &str,
        input: ModelInput<'_>,
        params: &InvocationParams,
    ) -> Result<ModelOutput, ModelClientError>;
}

#[derive(Debug)]
pub enum ModelInput<'a> {
    /// One user turn; the completion is the whole output.
    SingleShot { text: &'a str },
    /// Ordered role-tagged transcript; the completion is one assistant turn.
    Conversation(&'a [Turn]),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvocationParams {
    pub model_id: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for InvocationParams {
    fn default() -> Self {
        Self {
            model_id: "claude-3-5-sonnet-latest".to_string(),
            max_tokens: 4096,
            temperature: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelOutput {
    pub text: String,
    /// Cumulative token usage for the call, when the provider reports it.
    pub total_tokens: Option<u64>,
}

#[derive(Debug, thiserror::Error)]
pub enum ModelClientError {
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("throttled")]
    Throttled,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
