mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    GenerationSettings, ModelSettings, Settings, StorageSettings, StrategySetting, WorkerSettings,
};
