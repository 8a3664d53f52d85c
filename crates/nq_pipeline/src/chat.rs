use std::sync::Arc;
use std::time::Duration;

use nq_core::{
    ChatResponse, CompletionOptions, ContentFetcher, InferenceModel, NewsSearch, QueryRoute,
    Result, SummaryRecord,
};
use tracing::{debug, info};

use crate::ranking::Ranker;
use crate::router::QueryRouter;
use crate::summarize::Summarizer;
use crate::synthesis::Synthesizer;

pub const NO_ARTICLES_MESSAGE: &str = "No articles found for your query.";

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Articles advanced past ranking into fetch + summarization.
    pub top_k: usize,
    /// Pause between per-article model calls to stay under API rate limits.
    pub rate_limit_delay: Duration,
    /// Render the source list into the answer text as well as returning it
    /// structurally.
    pub include_sources: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            top_k: 3,
            rate_limit_delay: Duration::from_millis(500),
            include_sources: true,
        }
    }
}

/// The full question-answering pipeline: classify, search, rank, read,
/// summarize, synthesize. Stateless across requests; every call recomputes
/// scores from scratch.
pub struct NewsAssistant {
    model: Arc<dyn InferenceModel>,
    search: Arc<dyn NewsSearch>,
    fetcher: Arc<dyn ContentFetcher>,
    router: QueryRouter,
    ranker: Ranker,
    summarizer: Summarizer,
    synthesizer: Synthesizer,
    config: PipelineConfig,
}

impl NewsAssistant {
    pub fn new(
        model: Arc<dyn InferenceModel>,
        search: Arc<dyn NewsSearch>,
        fetcher: Arc<dyn ContentFetcher>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            router: QueryRouter::new(model.clone()),
            ranker: Ranker::new(model.clone()),
            summarizer: Summarizer::new(model.clone()),
            synthesizer: Synthesizer::new(model.clone(), config.include_sources),
            model,
            search,
            fetcher,
            config,
        }
    }

    /// Answers one question end to end. Per-article failures degrade to
    /// placeholders, classification failures degrade to a direct answer,
    /// and an empty or failed search surfaces the no-articles message; no
    /// inner stage error escapes this method except batch-level setup
    /// failures.
    pub async fn answer_question(&self, question: &str) -> Result<ChatResponse> {
        let (route, method) = self.router.route(question).await;

        let params = match route {
            QueryRoute::General => {
                let response = self.general_answer(question).await;
                return Ok(ChatResponse {
                    response,
                    method: method.to_string(),
                    is_news: false,
                    articles_found: 0,
                    sources: Vec::new(),
                });
            }
            QueryRoute::News(params) => params,
        };

        info!("🔍 Searching news about '{}'", params.q);
        let articles = match self.search.search(&params).await {
            Ok(articles) => articles,
            Err(e) => {
                debug!("News search failed: {}", e);
                Vec::new()
            }
        };
        let articles_found = articles.len();

        if articles.is_empty() {
            return Ok(ChatResponse {
                response: NO_ARTICLES_MESSAGE.to_string(),
                method: method.to_string(),
                is_news: true,
                articles_found: 0,
                sources: Vec::new(),
            });
        }

        info!("🤖 Ranking {} articles by relevance", articles_found);
        let top_articles = self
            .ranker
            .rank(question, articles, self.config.top_k)
            .await?;

        let total = top_articles.len();
        let mut summaries = Vec::with_capacity(total);
        for (i, scored) in top_articles.iter().enumerate() {
            info!("📖 Processing article {}/{}", i + 1, total);

            let full_content = match self.fetcher.fetch(&scored.article.url).await {
                Ok(content) if !content.is_empty() => Some(content),
                Ok(_) => None,
                Err(e) => {
                    debug!("Error fetching article {}: {}", scored.article.url, e);
                    None
                }
            };

            let summary = self
                .summarizer
                .summarize(question, &scored.article, full_content.as_deref())
                .await;
            summaries.push(SummaryRecord {
                title: scored.article.title_str().to_string(),
                url: scored.article.url.clone(),
                summary,
                relevance_score: scored.relevance_score,
            });

            if self.config.rate_limit_delay > Duration::ZERO {
                tokio::time::sleep(self.config.rate_limit_delay).await;
            }
        }

        let final_answer = self.synthesizer.synthesize(question, &summaries).await;

        Ok(ChatResponse {
            response: final_answer.answer,
            method: method.to_string(),
            is_news: true,
            articles_found,
            sources: final_answer.sources,
        })
    }

    /// Direct answer for non-news questions, default sampling. Failure
    /// degrades to inline error text like every other terminal stage.
    async fn general_answer(&self, question: &str) -> String {
        match self
            .model
            .complete(question, CompletionOptions::default())
            .await
        {
            Ok(answer) => answer.trim().to_string(),
            Err(e) => format!("Error generating response: {}", e),
        }
    }
}
