use std::fmt;

use async_trait::async_trait;
use nq_core::{CompletionOptions, InferenceModel, Result};

const EMBEDDING_DIM: usize = 384;

/// Offline backend for tests and dry runs. Completions echo the start of
/// the prompt; embeddings are deterministic character-bucket frequencies,
/// so identical texts always map to identical vectors.
pub struct DummyModel;

impl DummyModel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DummyModel {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel").finish()
    }
}

#[async_trait]
impl InferenceModel for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn complete(&self, prompt: &str, _options: CompletionOptions) -> Result<String> {
        // Echo the first 30 words of the prompt
        let words: Vec<&str> = prompt.split_whitespace().take(30).collect();
        Ok(words.join(" "))
    }

    async fn generate_embeddings(&self, text: &str) -> Result<Vec<f32>> {
        let mut embedding = vec![0.0; EMBEDDING_DIM];
        if text.is_empty() {
            return Ok(embedding);
        }

        let text_len = text.len() as f32;
        embedding[0] = text_len / 1000.0;

        // Bucket character frequencies into the remaining dimensions
        for c in text.chars() {
            let bucket = 1 + (c as usize) % (EMBEDDING_DIM - 1);
            embedding[bucket] += 1.0 / text_len;
        }

        Ok(embedding)
    }
}
