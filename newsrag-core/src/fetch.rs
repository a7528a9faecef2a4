//! Article content fetching: URL → extracted plain text.

use async_trait::async_trait;
use scraper::{Html, Selector};
use tracing::debug;

use crate::error::{RagError, Result};

/// A capability that resolves an article URL to extracted plain text.
///
/// Implementations own both the transport and the HTML-to-text step; the
/// ingestion pipeline only sees paragraphs of text separated by line breaks.
#[async_trait]
pub trait ArticleFetcher: Send + Sync {
    /// Fetch `url` and return the article's plain text.
    ///
    /// # Errors
    ///
    /// [`RagError::Fetch`] if the content cannot be retrieved and
    /// [`RagError::Extract`] if retrieval succeeds but yields no usable text.
    async fn fetch_text(&self, url: &str) -> Result<String>;
}

/// An [`ArticleFetcher`] that downloads pages over HTTP and extracts text
/// from block-level HTML elements.
pub struct HttpArticleFetcher {
    client: reqwest::Client,
    blocks: Selector,
}

impl HttpArticleFetcher {
    /// Create a fetcher with a default HTTP client.
    pub fn new() -> Self {
        // The selector literal is known valid.
        let blocks = Selector::parse("p, h1, h2, h3, h4, li, blockquote")
            .unwrap_or_else(|e| panic!("invalid block selector: {e}"));
        Self { client: reqwest::Client::new(), blocks }
    }

    /// Pull text out of block-level elements, one line per element, so the
    /// chunker sees the page's paragraph boundaries.
    fn extract_text(&self, raw_html: &str) -> String {
        let document = Html::parse_document(raw_html);
        let mut lines = Vec::new();
        for element in document.select(&self.blocks) {
            let text: String = element.text().collect::<Vec<_>>().join(" ");
            let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
            if !text.is_empty() {
                lines.push(text);
            }
        }
        lines.join("\n")
    }
}

impl Default for HttpArticleFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArticleFetcher for HttpArticleFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await.map_err(|e| RagError::Fetch {
            url: url.to_string(),
            message: format!("request failed: {e}"),
        })?;

        if !response.status().is_success() {
            return Err(RagError::Fetch {
                url: url.to_string(),
                message: format!("HTTP {}", response.status()),
            });
        }

        let raw_html = response.text().await.map_err(|e| RagError::Fetch {
            url: url.to_string(),
            message: format!("failed to read body: {e}"),
        })?;

        let text = self.extract_text(&raw_html);
        if text.trim().is_empty() {
            return Err(RagError::Extract { url: url.to_string() });
        }

        debug!(url, text_len = text.len(), "extracted article text");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_block_elements_as_lines() {
        let fetcher = HttpArticleFetcher::new();
        let html = "<html><body>\
            <h1>Headline</h1>\
            <p>First   paragraph.</p>\
            <script>ignored();</script>\
            <p>Second <b>bold</b> paragraph.</p>\
            </body></html>";
        let text = fetcher.extract_text(html);
        assert_eq!(text, "Headline\nFirst paragraph.\nSecond bold paragraph.");
    }

    #[test]
    fn empty_page_extracts_nothing() {
        let fetcher = HttpArticleFetcher::new();
        assert!(fetcher.extract_text("<html><body></body></html>").is_empty());
    }
}
