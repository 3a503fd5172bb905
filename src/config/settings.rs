use serde::Deserialize;

use crate::application::ports::InvocationParams;
use crate::application::services::{DelimiterPair, GenerationConfig, GenerationStrategy};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub worker: WorkerSettings,
    pub model: ModelSettings,
    pub generation: GenerationSettings,
    pub storage: StorageSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkerSettings {
    pub batch_size: usize,
    pub poll_interval_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelSettings {
    pub api_key: String,
    pub model_id: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerationSettings {
    pub max_attempts: u32,
    pub token_budget: u64,
    pub strategy: StrategySetting,
    pub open_tag: String,
    pub close_tag: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategySetting {
    Accumulation,
    Conversational,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub input_path: String,
    pub output_path: String,
    pub database_url: Option<String>,
}

impl Settings {
    /// Environment-driven configuration; every knob has a workable local
    /// default except the model API key.
    pub fn from_env() -> Self {
        Self {
            worker: WorkerSettings {
                batch_size: env_parsed("WORKER_BATCH_SIZE", 10),
                poll_interval_secs: env_parsed("WORKER_POLL_INTERVAL_SECS", 5),
            },
            model: ModelSettings {
                api_key: std::env::var("MODEL_API_KEY").unwrap_or_default(),
                model_id: std::env::var("MODEL_ID")
                    .unwrap_or_else(|_| "claude-3-5-sonnet-latest".to_string()),
                max_tokens: env_parsed("MODEL_MAX_TOKENS", 4096),
                temperature: env_parsed("MODEL_TEMPERATURE", 0.1),
            },
            generation: GenerationSettings {
                max_attempts: env_parsed("GENERATION_MAX_ATTEMPTS", 7),
                token_budget: env_parsed("GENERATION_TOKEN_BUDGET", 16384),
                strategy: match std::env::var("GENERATION_STRATEGY").as_deref() {
                    Ok("conversational") => StrategySetting::Conversational,
                    _ => StrategySetting::Accumulation,
                },
                open_tag: std::env::var("RESPONSE_OPEN_TAG")
                    .unwrap_or_else(|_| "<response>".to_string()),
                close_tag: std::env::var("RESPONSE_CLOSE_TAG")
                    .unwrap_or_else(|_| "</response>".to_string()),
            },
            storage: StorageSettings {
                input_path: std::env::var("INPUT_PATH").unwrap_or_else(|_| "data/input".to_string()),
                output_path: std::env::var("OUTPUT_PATH")
                    .unwrap_or_else(|_| "data/output".to_string()),
                database_url: std::env::var("DATABASE_URL").ok(),
            },
        }
    }

    pub fn delimiter_pair(&self) -> DelimiterPair {
        DelimiterPair::new(
            self.generation.open_tag.as_str(),
            self.generation.close_tag.as_str(),
        )
    }

    pub fn generation_config(&self) -> GenerationConfig {
        GenerationConfig {
            params: InvocationParams {
                model_id: self.model.model_id.clone(),
                max_tokens: self.model.max_tokens,
                temperature: self.model.temperature,
            },
            max_attempts: self.generation.max_attempts,
            token_budget: self.generation.token_budget,
            strategy: match self.generation.strategy {
                StrategySetting::Accumulation => GenerationStrategy::Accumulation,
                StrategySetting::Conversational => GenerationStrategy::Conversational,
            },
        }
    }
}

fn env_parsed<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
