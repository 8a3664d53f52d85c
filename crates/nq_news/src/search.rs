use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use nq_core::{Article, NewsSearch, Result, SearchParams};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://gnews.io/api/v4";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Serialize)]
struct SearchQuery<'a> {
    q: &'a str,
    category: &'a str,
    lang: &'a str,
    max: u32,
    apikey: &'a str,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    articles: Vec<Article>,
}

/// News search client for the GNews API.
pub struct GnewsClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GnewsClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }
}

impl fmt::Debug for GnewsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GnewsClient")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl NewsSearch for GnewsClient {
    async fn search(&self, params: &SearchParams) -> Result<Vec<Article>> {
        let query = SearchQuery {
            q: &params.q,
            category: &params.category,
            lang: &params.lang,
            max: params.max,
            apikey: &self.api_key,
        };

        let response = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&query)
            .send()
            .await?
            .error_for_status()?
            .json::<SearchResponse>()
            .await?;

        debug!("Search for '{}' returned {} articles", params.q, response.articles.len());
        Ok(response.articles)
    }
}
