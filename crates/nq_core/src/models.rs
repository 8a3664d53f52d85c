use async_trait::async_trait;

use crate::types::{Article, SearchParams};
use crate::Result;

/// Sampling knobs for a single completion call. `None` leaves the
/// provider default in place.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompletionOptions {
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

#[async_trait]
pub trait InferenceModel: Send + Sync {
    /// Returns the name of the model backend
    fn name(&self) -> &str;

    /// Run a single-prompt chat completion
    async fn complete(&self, prompt: &str, options: CompletionOptions) -> Result<String>;

    /// Generate embeddings for a piece of text
    async fn generate_embeddings(&self, text: &str) -> Result<Vec<f32>>;
}

#[async_trait]
pub trait NewsSearch: Send + Sync {
    /// Search for articles matching the given parameters. Result order
    /// carries no relevance meaning.
    async fn search(&self, params: &SearchParams) -> Result<Vec<Article>>;
}

#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Fetch and clean the full text of an article page
    async fn fetch(&self, url: &str) -> Result<String>;
}
