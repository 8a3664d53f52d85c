use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use nq_core::{Article, InferenceModel, Result, ScoredArticle};
use tracing::debug;

const SEMANTIC_WEIGHT: f32 = 0.40;
const KEYWORD_WEIGHT: f32 = 0.30;
const RECENCY_WEIGHT: f32 = 0.20;
const TITLE_WEIGHT: f32 = 0.10;

// Linear recency decay window: one week
const RECENCY_WINDOW_HOURS: f32 = 168.0;
const DEFAULT_RECENCY: f32 = 0.5;

const STOP_WORDS: [&str; 13] = [
    "a", "an", "the", "is", "are", "was", "were", "what", "when", "where", "who", "how", "about",
];

/// Orders articles by hybrid relevance to a question: semantic similarity,
/// keyword overlap, recency and a title-match bonus.
pub struct Ranker {
    model: Arc<dyn InferenceModel>,
}

impl Ranker {
    pub fn new(model: Arc<dyn InferenceModel>) -> Self {
        Self { model }
    }

    /// Scores every article and returns the `top_k` best. The question
    /// embedding is computed once per batch and shared across articles;
    /// an empty batch makes no embedding calls at all.
    pub async fn rank(
        &self,
        question: &str,
        articles: Vec<Article>,
        top_k: usize,
    ) -> Result<Vec<ScoredArticle>> {
        if articles.is_empty() {
            return Ok(Vec::new());
        }

        let question_embedding = self.model.generate_embeddings(question).await?;

        let mut scored = Vec::with_capacity(articles.len());
        for article in articles {
            let relevance_score = self
                .hybrid_relevance(question, &article, &question_embedding)
                .await;
            scored.push(ScoredArticle {
                article,
                relevance_score,
            });
        }

        // Stable sort, so equal scores keep their input order
        scored.sort_by(|a, b| {
            b.relevance_score
                .partial_cmp(&a.relevance_score)
                .unwrap_or(Ordering::Equal)
        });
        scored.truncate(top_k);

        Ok(scored)
    }

    /// Weighted combination of the four relevance signals. Never fails: a
    /// broken article degrades its own sub-scores without touching the
    /// rest of the batch.
    async fn hybrid_relevance(
        &self,
        question: &str,
        article: &Article,
        question_embedding: &[f32],
    ) -> f32 {
        let article_text = article.text();

        let semantic = match self.model.generate_embeddings(&article_text).await {
            Ok(embedding) => cosine_similarity(question_embedding, &embedding),
            Err(e) => {
                debug!("Embedding failed for {}: {}", article.url, e);
                0.0
            }
        };

        let question_tokens = question_tokens(question);
        let keyword = keyword_score(&question_tokens, &article_text);
        let recency = recency_score(article.published_at.as_deref());
        let title = title_bonus(&question_tokens, article.title_str());

        SEMANTIC_WEIGHT * semantic
            + KEYWORD_WEIGHT * keyword
            + RECENCY_WEIGHT * recency
            + TITLE_WEIGHT * title
    }
}

/// Lowercased question tokens minus stop words.
fn question_tokens(question: &str) -> HashSet<String> {
    let lower = question.to_lowercase();
    lower
        .split_whitespace()
        .filter(|token| !STOP_WORDS.contains(token))
        .map(str::to_string)
        .collect()
}

/// Fraction of question tokens that appear in the article text.
fn keyword_score(question_tokens: &HashSet<String>, article_text: &str) -> f32 {
    if question_tokens.is_empty() {
        return 0.0;
    }
    let lower = article_text.to_lowercase();
    let article_tokens: HashSet<&str> = lower.split_whitespace().collect();
    let overlap = question_tokens
        .iter()
        .filter(|token| article_tokens.contains(token.as_str()))
        .count();
    overlap as f32 / question_tokens.len() as f32
}

/// Linear decay from 1 at publication time to 0 after a week. Missing or
/// unparsable timestamps score a neutral 0.5. Only the lower bound is
/// clamped: a future-dated article scores above 1.
fn recency_score(published_at: Option<&str>) -> f32 {
    match published_at.map(DateTime::parse_from_rfc3339) {
        Some(Ok(published)) => {
            let age = Utc::now() - published.with_timezone(&Utc);
            let hours_old = age.num_seconds() as f32 / 3600.0;
            (1.0 - hours_old / RECENCY_WINDOW_HOURS).max(0.0)
        }
        _ => DEFAULT_RECENCY,
    }
}

/// 1.0 when any question token appears inside the lowercased title, else
/// 0.5. A single match saturates the bonus.
fn title_bonus(question_tokens: &HashSet<String>, title: &str) -> f32 {
    let title_lower = title.to_lowercase();
    if question_tokens
        .iter()
        .any(|token| title_lower.contains(token.as_str()))
    {
        1.0
    } else {
        0.5
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|y| y * y).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
