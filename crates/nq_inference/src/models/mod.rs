use std::sync::Arc;

use nq_core::{Error, InferenceModel, Result};

use crate::Config;

pub mod dummy;
pub mod groq;

pub use dummy::DummyModel;
pub use groq::GroqModel;

/// Create an inference model from the configuration. Defaults to the
/// Groq backend when no model name is given.
pub fn create_model(config: Option<Config>) -> Result<Arc<dyn InferenceModel>> {
    let config = config.unwrap_or_default();
    match config.model_name.as_deref() {
        Some("dummy") => Ok(Arc::new(DummyModel::new())),
        Some("groq") | None => Ok(Arc::new(GroqModel::new(&config)?)),
        Some(other) => Err(Error::Inference(format!(
            "Unknown model backend: {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_model_dummy() {
        let config = Config {
            model_name: Some("dummy".to_string()),
            ..Default::default()
        };
        let model = create_model(Some(config)).unwrap();
        assert_eq!(model.name(), "Dummy");
    }

    #[test]
    fn test_create_model_unknown_backend() {
        let config = Config {
            model_name: Some("gpt-j".to_string()),
            ..Default::default()
        };
        assert!(create_model(Some(config)).is_err());
    }
}
