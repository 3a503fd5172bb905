mod anthropic_client;
mod scripted_client;

pub use anthropic_client::AnthropicClient;
pub use scripted_client::ScriptedModelClient;
