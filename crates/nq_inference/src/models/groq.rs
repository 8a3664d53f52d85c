use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use nq_core::{CompletionOptions, Error, InferenceModel, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::Config;

const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_CHAT_MODEL: &str = "openai/gpt-oss-120b";
const DEFAULT_EMBEDDING_MODEL: &str = "all-minilm-l6-v2";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    content: String,
}

#[derive(Serialize)]
struct EmbeddingRequest {
    input: String,
    model: String,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

/// Chat completion and embedding client for Groq's OpenAI-compatible API.
/// Any other OpenAI-compatible endpoint works via `Config::base_url`.
pub struct GroqModel {
    client: Client,
    api_key: String,
    base_url: String,
    chat_model: String,
    embedding_model: String,
}

impl GroqModel {
    pub fn new(config: &Config) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| Error::Inference("Groq API key is required".to_string()))?;
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            api_key,
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            chat_model: config
                .chat_model
                .clone()
                .unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
            embedding_model: config
                .embedding_model
                .clone()
                .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string()),
        })
    }
}

impl fmt::Debug for GroqModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GroqModel")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("chat_model", &self.chat_model)
            .field("embedding_model", &self.embedding_model)
            .finish()
    }
}

#[async_trait]
impl InferenceModel for GroqModel {
    fn name(&self) -> &str {
        "Groq"
    }

    async fn complete(&self, prompt: &str, options: CompletionOptions) -> Result<String> {
        let request = ChatRequest {
            model: self.chat_model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: options.temperature,
            max_tokens: options.max_tokens,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<ChatResponse>()
            .await?;

        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| Error::Inference("Completion response had no choices".to_string()))
    }

    async fn generate_embeddings(&self, text: &str) -> Result<Vec<f32>> {
        let request = EmbeddingRequest {
            input: text.to_string(),
            model: self.embedding_model.clone(),
        };

        let response = self
            .client
            .post(format!("{}/embeddings", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<EmbeddingResponse>()
            .await?;

        response
            .data
            .into_iter()
            .next()
            .map(|data| data.embedding)
            .ok_or_else(|| Error::Inference("Embedding response had no data".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_requires_api_key() {
        let result = GroqModel::new(&Config::default());
        assert!(result.is_err());

        let config = Config {
            api_key: Some("test-key".to_string()),
            ..Default::default()
        };
        assert!(GroqModel::new(&config).is_ok());
    }

    #[test]
    fn test_config_overrides_defaults() {
        let config = Config {
            api_key: Some("test-key".to_string()),
            base_url: Some("http://localhost:11434/v1".to_string()),
            chat_model: Some("llama3".to_string()),
            ..Default::default()
        };
        let model = GroqModel::new(&config).unwrap();
        assert_eq!(model.base_url, "http://localhost:11434/v1");
        assert_eq!(model.chat_model, "llama3");
        assert_eq!(model.embedding_model, DEFAULT_EMBEDDING_MODEL);
    }
}
