use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::application::ports::{
    InvocationParams, ModelClient, ModelClientError, ModelInput, ModelOutput,
};

/// Test double that replays a fixed script of results, one per invocation.
/// An exhausted script keeps answering with untagged filler so attempt
/// ceilings can be exercised without scripting every call.
pub struct ScriptedModelClient {
    script: Mutex<VecDeque<Result<ModelOutput, ModelClientError>>>,
    calls: Mutex<u32>,
}

impl ScriptedModelClient {
    pub fn new(script: Vec<Result<ModelOutput, ModelClientError>>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            calls: Mutex::new(0),
        }
    }

    pub fn with_texts(texts: Vec<&str>) -> Self {
        Self::new(
            texts
                .into_iter()
                .map(|t| {
                    Ok(ModelOutput {
                        text: t.to_string(),
                        total_tokens: None,
                    })
                })
                .collect(),
        )
    }

    pub fn call_count(&self) -> u32 {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl ModelClient for ScriptedModelClient {
    async fn invoke(
        &self,
        _system: &str,
        _input: ModelInput<'_>,
        _params: &InvocationParams,
    ) -> Result<ModelOutput, ModelClientError> {
        *self.calls.lock().unwrap() += 1;
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Ok(ModelOutput {
                    text: "still thinking".to_string(),
                    total_tokens: None,
                })
            })
    }
}
