pub mod chat;
pub mod ranking;
pub mod router;
pub mod summarize;
pub mod synthesis;

pub use chat::{NewsAssistant, PipelineConfig, NO_ARTICLES_MESSAGE};
pub use ranking::Ranker;
pub use router::QueryRouter;
pub use summarize::Summarizer;
pub use synthesis::Synthesizer;

pub mod prelude {
    pub use super::{NewsAssistant, PipelineConfig};
    pub use nq_core::{Article, ChatResponse, FinalAnswer, Result, ScoredArticle, SummaryRecord};
}
