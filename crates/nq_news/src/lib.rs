pub mod content;
pub mod search;

pub use content::PageFetcher;
pub use search::GnewsClient;

pub mod prelude {
    pub use super::{GnewsClient, PageFetcher};
    pub use nq_core::{Article, ContentFetcher, Error, NewsSearch, Result, SearchParams};
}
