pub mod error;
pub mod models;
pub mod types;

pub use error::Error;
pub use models::{CompletionOptions, ContentFetcher, InferenceModel, NewsSearch};
pub use types::{
    Article, ChatResponse, FinalAnswer, QueryRoute, ScoredArticle, SearchParams, SourceRef,
    SummaryRecord,
};

pub type Result<T> = std::result::Result<T, Error>;
