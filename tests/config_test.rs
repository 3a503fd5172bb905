use kuching::application::services::GenerationStrategy;
use kuching::config::{
    Environment, GenerationSettings, ModelSettings, Settings, StorageSettings, StrategySetting,
    WorkerSettings,
};

fn settings(strategy: StrategySetting) -> Settings {
    Settings {
        worker: WorkerSettings {
            batch_size: 10,
            poll_interval_secs: 5,
        },
        model: ModelSettings {
            api_key: "key".to_string(),
            model_id: "claude-3-5-sonnet-latest".to_string(),
            max_tokens: 4096,
            temperature: 0.1,
        },
        generation: GenerationSettings {
            max_attempts: 7,
            token_budget: 16384,
            strategy,
            open_tag: "<response>".to_string(),
            close_tag: "</response>".to_string(),
        },
        storage: StorageSettings {
            input_path: "data/input".to_string(),
            output_path: "data/output".to_string(),
            database_url: None,
        },
    }
}

#[test]
fn given_environment_strings_when_parsing_then_aliases_resolve() {
    assert_eq!(
        Environment::try_from("local".to_string()),
        Ok(Environment::Local)
    );
    assert_eq!(
        Environment::try_from("PRODUCTION".to_string()),
        Ok(Environment::Prod)
    );
    assert!(Environment::try_from("staging".to_string()).is_err());
}

#[test]
fn given_settings_when_building_generation_config_then_strategy_maps_through() {
    let config = settings(StrategySetting::Conversational).generation_config();
    assert_eq!(config.strategy, GenerationStrategy::Conversational);
    assert_eq!(config.max_attempts, 7);
    assert_eq!(config.params.model_id, "claude-3-5-sonnet-latest");
    assert_eq!(config.params.max_tokens, 4096);
}

#[test]
fn given_settings_when_building_delimiter_pair_then_tags_carry_over() {
    let pair = settings(StrategySetting::Accumulation).delimiter_pair();
    assert_eq!(pair.open, "<response>");
    assert_eq!(pair.close, "</response>");
}
