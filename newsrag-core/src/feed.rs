//! News feed client: typed access to the NewsAPI `top-headlines` endpoint.

use serde::Deserialize;
use tracing::{debug, error};

use crate::error::{RagError, Result};

/// The NewsAPI top-headlines endpoint.
const TOP_HEADLINES_URL: &str = "https://newsapi.org/v2/top-headlines";

/// One article reference from the news feed.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FeedItem {
    /// The article's headline, when the feed provides one.
    pub title: Option<String>,
    /// The article URL to fetch and ingest.
    pub url: String,
}

#[derive(Deserialize)]
struct HeadlinesResponse {
    articles: Vec<FeedItem>,
}

/// A client for the NewsAPI headlines feed.
pub struct NewsApiClient {
    client: reqwest::Client,
    api_key: String,
    category: String,
    language: String,
    page_size: usize,
}

impl NewsApiClient {
    /// Create a client with the given API key.
    ///
    /// Defaults to the `technology` category, English, 100 items per page.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(RagError::Config("NewsAPI key must not be empty".to_string()));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            category: "technology".to_string(),
            language: "en".to_string(),
            page_size: 100,
        })
    }

    /// Create a client from the `NEWSAPI_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("NEWSAPI_KEY").map_err(|_| {
            RagError::Config("NEWSAPI_KEY environment variable not set".to_string())
        })?;
        Self::new(api_key)
    }

    /// Set the headline category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the feed language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set the number of items requested per page.
    pub fn with_page_size(mut self, size: usize) -> Self {
        self.page_size = size;
        self
    }

    /// Fetch the current top headlines.
    pub async fn top_headlines(&self) -> Result<Vec<FeedItem>> {
        let page_size = self.page_size.to_string();
        let response = self
            .client
            .get(TOP_HEADLINES_URL)
            .query(&[
                ("category", self.category.as_str()),
                ("language", self.language.as_str()),
                ("pageSize", page_size.as_str()),
                ("apiKey", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| RagError::Fetch {
                url: TOP_HEADLINES_URL.to_string(),
                message: format!("request failed: {e}"),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            error!(%status, "NewsAPI request failed");
            return Err(RagError::Fetch {
                url: TOP_HEADLINES_URL.to_string(),
                message: format!("HTTP {status}"),
            });
        }

        let headlines: HeadlinesResponse = response.json().await.map_err(|e| RagError::Fetch {
            url: TOP_HEADLINES_URL.to_string(),
            message: format!("failed to parse response: {e}"),
        })?;

        debug!(articles = headlines.articles.len(), "fetched headlines");
        Ok(headlines.articles)
    }
}
