use serde::{Deserialize, Serialize};

/// An article as returned by the news search API. Everything except the URL
/// may be missing, and `published_at` is kept as the raw wire string since
/// upstream timestamps are occasionally malformed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub url: String,
    #[serde(rename = "publishedAt", default)]
    pub published_at: Option<String>,
}

impl Article {
    /// Title and description joined with a space, absent fields empty.
    pub fn text(&self) -> String {
        format!(
            "{} {}",
            self.title.as_deref().unwrap_or(""),
            self.description.as_deref().unwrap_or("")
        )
    }

    pub fn title_str(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }
}

/// An article with its relevance score attached. Scores are recomputed on
/// every request; they are never cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredArticle {
    #[serde(flatten)]
    pub article: Article,
    pub relevance_score: f32,
}

/// One article's grounded answer, carried into final synthesis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub title: String,
    pub url: String,
    pub summary: String,
    pub relevance_score: f32,
}

/// Citation entry in the final answer, 1-based index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceRef {
    pub index: usize,
    pub title: String,
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalAnswer {
    pub answer: String,
    pub sources: Vec<SourceRef>,
}

/// Parameters for the news search API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default = "default_lang")]
    pub lang: String,
    #[serde(default = "default_max")]
    pub max: u32,
}

fn default_category() -> String {
    "general".to_string()
}

fn default_lang() -> String {
    "en".to_string()
}

fn default_max() -> u32 {
    10
}

impl SearchParams {
    pub fn for_query(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            category: default_category(),
            lang: default_lang(),
            max: default_max(),
        }
    }
}

/// Classifier output: either a news search or a question answered directly.
#[derive(Debug, Clone)]
pub enum QueryRoute {
    News(SearchParams),
    General,
}

/// Response shape returned to the request-handling layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub method: String,
    pub is_news: bool,
    pub articles_found: usize,
    pub sources: Vec<SourceRef>,
}
