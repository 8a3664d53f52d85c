use std::sync::Arc;

use nq_core::{CompletionOptions, InferenceModel, QueryRoute, SearchParams};
use serde::Deserialize;
use tracing::debug;

/// Method label attached to the response: how the route was decided.
pub const METHOD_LLM: &str = "llm";
pub const METHOD_FALLBACK: &str = "fallback";

#[derive(Deserialize)]
struct Classification {
    #[serde(default)]
    is_news: bool,
    #[serde(default)]
    q: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    lang: Option<String>,
    #[serde(default)]
    max: Option<u32>,
}

/// Decides whether a question needs a news search and extracts the search
/// parameters when it does.
pub struct QueryRouter {
    model: Arc<dyn InferenceModel>,
}

impl QueryRouter {
    pub fn new(model: Arc<dyn InferenceModel>) -> Self {
        Self { model }
    }

    /// Classifies the question via one model call expecting strict JSON.
    /// A failed call or unparsable output degrades to the general route;
    /// this never returns an error.
    pub async fn route(&self, question: &str) -> (QueryRoute, &'static str) {
        let prompt = classification_prompt(question);
        let response = match self
            .model
            .complete(&prompt, CompletionOptions::default())
            .await
        {
            Ok(text) => text,
            Err(e) => {
                debug!("Classification call failed, answering directly: {}", e);
                return (QueryRoute::General, METHOD_FALLBACK);
            }
        };

        match serde_json::from_str::<Classification>(strip_code_fences(&response)) {
            Ok(classification) if classification.is_news => {
                let mut params = SearchParams::for_query(
                    classification.q.unwrap_or_else(|| question.to_string()),
                );
                if let Some(category) = classification.category {
                    params.category = category;
                }
                if let Some(lang) = classification.lang {
                    params.lang = lang;
                }
                if let Some(max) = classification.max {
                    params.max = max;
                }
                (QueryRoute::News(params), METHOD_LLM)
            }
            Ok(_) => (QueryRoute::General, METHOD_LLM),
            Err(e) => {
                debug!("Classification output was not valid JSON ({}), answering directly", e);
                (QueryRoute::General, METHOD_FALLBACK)
            }
        }
    }
}

fn classification_prompt(question: &str) -> String {
    format!(
        r#"You are a news classification assistant. Analyze this question: "{question}"

If this is a NEWS question (about current events, recent happenings, today's info, etc.), respond with ONLY a valid JSON object in this exact format:
{{
    "is_news": true,
    "q": "search keywords here",
    "category": "general",
    "lang": "en",
    "max": 10
}}

Categories: general, world, nation, business, technology, entertainment, sports, science, health

If this is NOT a news question, respond with ONLY:
{{"is_news": false}}

Output ONLY the JSON object, nothing else."#
    )
}

/// Strips the Markdown code-fence decoration some models wrap around
/// their JSON output.
fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let trimmed = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix("```").unwrap_or(trimmed);
    trimmed.trim()
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use nq_core::Result;

    use super::*;

    struct ScriptedModel {
        response: Mutex<Option<Result<String>>>,
    }

    impl ScriptedModel {
        fn replies(text: &str) -> Self {
            Self {
                response: Mutex::new(Some(Ok(text.to_string()))),
            }
        }

        fn fails() -> Self {
            Self {
                response: Mutex::new(Some(Err(nq_core::Error::Inference(
                    "timeout".to_string(),
                )))),
            }
        }
    }

    #[async_trait]
    impl InferenceModel for ScriptedModel {
        fn name(&self) -> &str {
            "Scripted"
        }

        async fn complete(&self, _prompt: &str, _options: CompletionOptions) -> Result<String> {
            self.response
                .lock()
                .unwrap()
                .take()
                .expect("model called more than once")
        }

        async fn generate_embeddings(&self, _text: &str) -> Result<Vec<f32>> {
            Ok(vec![0.0])
        }
    }

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("{\"is_news\": false}"), "{\"is_news\": false}");
        assert_eq!(
            strip_code_fences("```json\n{\"is_news\": false}\n```"),
            "{\"is_news\": false}"
        );
        assert_eq!(
            strip_code_fences("```\n{\"is_news\": false}\n```"),
            "{\"is_news\": false}"
        );
        assert_eq!(strip_code_fences("  {\"a\": 1}  "), "{\"a\": 1}");
    }

    #[tokio::test]
    async fn test_news_classification_extracts_params() {
        let model = Arc::new(ScriptedModel::replies(
            r#"{"is_news": true, "q": "bitcoin price", "category": "business", "lang": "en", "max": 5}"#,
        ));
        let router = QueryRouter::new(model);

        let (route, method) = router.route("What is the bitcoin price today?").await;

        assert_eq!(method, METHOD_LLM);
        match route {
            QueryRoute::News(params) => {
                assert_eq!(params.q, "bitcoin price");
                assert_eq!(params.category, "business");
                assert_eq!(params.max, 5);
            }
            QueryRoute::General => panic!("expected news route"),
        }
    }

    #[tokio::test]
    async fn test_fenced_output_still_parses() {
        let model = Arc::new(ScriptedModel::replies(
            "```json\n{\"is_news\": true, \"q\": \"elections\"}\n```",
        ));
        let router = QueryRouter::new(model);

        let (route, method) = router.route("election results?").await;

        assert_eq!(method, METHOD_LLM);
        match route {
            QueryRoute::News(params) => {
                assert_eq!(params.q, "elections");
                // Missing fields fall back to their defaults
                assert_eq!(params.category, "general");
                assert_eq!(params.lang, "en");
                assert_eq!(params.max, 10);
            }
            QueryRoute::General => panic!("expected news route"),
        }
    }

    #[tokio::test]
    async fn test_non_news_routes_general() {
        let model = Arc::new(ScriptedModel::replies(r#"{"is_news": false}"#));
        let router = QueryRouter::new(model);

        let (route, method) = router.route("Explain quicksort").await;

        assert_eq!(method, METHOD_LLM);
        assert!(matches!(route, QueryRoute::General));
    }

    #[tokio::test]
    async fn test_unparsable_output_falls_back() {
        let model = Arc::new(ScriptedModel::replies("Sure! Here is my analysis..."));
        let router = QueryRouter::new(model);

        let (route, method) = router.route("anything").await;

        assert_eq!(method, METHOD_FALLBACK);
        assert!(matches!(route, QueryRoute::General));
    }

    #[tokio::test]
    async fn test_model_error_falls_back() {
        let model = Arc::new(ScriptedModel::fails());
        let router = QueryRouter::new(model);

        let (route, method) = router.route("anything").await;

        assert_eq!(method, METHOD_FALLBACK);
        assert!(matches!(route, QueryRoute::General));
    }
}
