pub mod models;

pub use models::create_model;

/// Inference backend configuration. `model_name` selects the backend
/// ("groq" or "dummy"), the rest override provider defaults.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model_name: Option<String>,
    pub chat_model: Option<String>,
    pub embedding_model: Option<String>,
}

pub mod prelude {
    pub use super::models::create_model;
    pub use super::Config;
    pub use nq_core::{CompletionOptions, Error, InferenceModel, Result};
}
