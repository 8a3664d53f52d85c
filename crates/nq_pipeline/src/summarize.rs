use std::sync::Arc;

use nq_core::{Article, CompletionOptions, InferenceModel};

const SUMMARY_TEMPERATURE: f32 = 0.1;
const SUMMARY_MAX_TOKENS: u32 = 300;

/// Produces a grounded per-article answer: the model may only use the
/// fetched page content, never outside knowledge.
pub struct Summarizer {
    model: Arc<dyn InferenceModel>,
}

impl Summarizer {
    pub fn new(model: Arc<dyn InferenceModel>) -> Self {
        Self { model }
    }

    /// Answers the question from one article. Unreachable pages get a
    /// placeholder without spending a model call; a failed model call
    /// becomes inline error text. Either way the pipeline continues.
    pub async fn summarize(
        &self,
        question: &str,
        article: &Article,
        full_content: Option<&str>,
    ) -> String {
        let full_content = match full_content {
            Some(content) => content,
            None => {
                return format!("No full content available for: {}", article.title_str());
            }
        };

        let prompt = format!(
            r#"You are a helpful news assistant. Answer the user's question: "{question}"

Use ONLY the following article content to provide a direct, concise answer:

TITLE: {title}
DESCRIPTION: {description}
FULL CONTENT: {content}

Provide a clear, direct answer to the question based solely on this article.
Keep it concise (2-4 sentences). If the article doesn't contain the answer, say so clearly."#,
            question = question,
            title = article.title_str(),
            description = article.description.as_deref().unwrap_or(""),
            content = full_content,
        );

        let options = CompletionOptions {
            temperature: Some(SUMMARY_TEMPERATURE),
            max_tokens: Some(SUMMARY_MAX_TOKENS),
        };

        match self.model.complete(&prompt, options).await {
            Ok(answer) => answer.trim().to_string(),
            Err(e) => format!("Error processing article: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use nq_core::Result;

    use super::*;

    struct RecordingModel {
        prompts: Mutex<Vec<String>>,
        fail: bool,
    }

    impl RecordingModel {
        fn new(fail: bool) -> Self {
            Self {
                prompts: Mutex::new(Vec::new()),
                fail,
            }
        }
    }

    #[async_trait]
    impl InferenceModel for RecordingModel {
        fn name(&self) -> &str {
            "Recording"
        }

        async fn complete(&self, prompt: &str, _options: CompletionOptions) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            if self.fail {
                Err(nq_core::Error::Inference("quota exceeded".to_string()))
            } else {
                Ok("  The price rose to a record high.  ".to_string())
            }
        }

        async fn generate_embeddings(&self, _text: &str) -> Result<Vec<f32>> {
            Ok(vec![0.0])
        }
    }

    fn article() -> Article {
        Article {
            title: Some("Bitcoin price surges".to_string()),
            description: Some("The price rose sharply.".to_string()),
            url: "https://example.com/bitcoin".to_string(),
            published_at: None,
        }
    }

    #[tokio::test]
    async fn test_missing_content_skips_model_call() {
        let model = Arc::new(RecordingModel::new(false));
        let summarizer = Summarizer::new(model.clone());

        let summary = summarizer.summarize("bitcoin price?", &article(), None).await;

        assert_eq!(
            summary,
            "No full content available for: Bitcoin price surges"
        );
        assert!(model.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_summary_grounds_prompt_in_article() {
        let model = Arc::new(RecordingModel::new(false));
        let summarizer = Summarizer::new(model.clone());

        let summary = summarizer
            .summarize("bitcoin price?", &article(), Some("Full page text here."))
            .await;

        assert_eq!(summary, "The price rose to a record high.");

        let prompts = model.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("bitcoin price?"));
        assert!(prompts[0].contains("TITLE: Bitcoin price surges"));
        assert!(prompts[0].contains("FULL CONTENT: Full page text here."));
        assert!(prompts[0].contains("ONLY"));
    }

    #[tokio::test]
    async fn test_model_failure_becomes_inline_error() {
        let model = Arc::new(RecordingModel::new(true));
        let summarizer = Summarizer::new(model);

        let summary = summarizer
            .summarize("bitcoin price?", &article(), Some("Full page text here."))
            .await;

        assert!(summary.starts_with("Error processing article:"));
    }
}
