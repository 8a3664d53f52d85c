use std::time::Duration;

use async_trait::async_trait;
use nq_core::{ContentFetcher, Result};
use reqwest::Client;
use scraper::Html;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_CONTENT_CHARS: usize = 4000;

// Page chrome that never carries article text
const SKIPPED_ELEMENTS: [&str; 5] = ["script", "style", "nav", "header", "footer"];

/// Fetches an article page and reduces it to plain prose. Failures are
/// per-article: the pipeline substitutes a placeholder and moves on.
#[derive(Debug)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ContentFetcher for PageFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        let html = response.text().await?;
        Ok(extract_text(&html))
    }
}

/// Extracts readable text from an HTML document: drops script/style and
/// page-chrome subtrees, collapses whitespace runs into single spaces and
/// truncates to a length that fits a model prompt.
pub fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut parts = Vec::new();

    for node in document.root_element().descendants() {
        if let Some(text) = node.value().as_text() {
            let in_skipped = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .map_or(false, |el| SKIPPED_ELEMENTS.contains(&el.name()))
            });
            if !in_skipped {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    parts.push(trimmed.to_string());
                }
            }
        }
    }

    let collapsed = parts
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    collapsed.chars().take(MAX_CONTENT_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_skips_page_chrome() {
        let html = r#"
            <html>
              <head>
                <style>body { color: red; }</style>
                <script>var tracking = true;</script>
              </head>
              <body>
                <header>Site Header</header>
                <nav>Home | News | Sports</nav>
                <article>
                  <h1>Bitcoin price surges</h1>
                  <p>The price of   bitcoin
                  rose sharply on Monday.</p>
                </article>
                <footer>Copyright 2024</footer>
              </body>
            </html>
        "#;

        let text = extract_text(html);
        assert!(text.contains("Bitcoin price surges"));
        assert!(text.contains("The price of bitcoin rose sharply on Monday."));
        assert!(!text.contains("tracking"));
        assert!(!text.contains("color: red"));
        assert!(!text.contains("Site Header"));
        assert!(!text.contains("Home | News"));
        assert!(!text.contains("Copyright"));
    }

    #[test]
    fn test_extract_collapses_whitespace() {
        let html = "<body><p>one</p>\n\n<p>two   three</p></body>";
        assert_eq!(extract_text(html), "one two three");
    }

    #[test]
    fn test_extract_truncates_long_pages() {
        let paragraph = "word ".repeat(2000);
        let html = format!("<body><p>{}</p></body>", paragraph);
        let text = extract_text(&html);
        assert_eq!(text.chars().count(), MAX_CONTENT_CHARS);
    }

    #[test]
    fn test_extract_is_char_boundary_safe() {
        let paragraph = "café ".repeat(1200);
        let html = format!("<body><p>{}</p></body>", paragraph);
        let text = extract_text(&html);
        assert_eq!(text.chars().count(), MAX_CONTENT_CHARS);
    }
}
