//! Page scraper extracting headings and paragraphs from HTML.

use super::map_reqwest_error;
use async_trait::async_trait;
use proposal_application::ports::search::{PageScraper, SearchError};
use proposal_application::tools::search_toolset::DEFAULT_MAX_PAGE_CHARS;
use proposal_domain::util::truncate_chars;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use std::time::Duration;
use tracing::debug;

static TEXT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h1, h2, h3, p").expect("text selector should compile"));

/// Text of every `h1`, `h2`, `h3` and `p` element, in document order, one
/// element per line. Elements without text are skipped.
pub fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);
    document
        .select(&TEXT_SELECTOR)
        .map(|element| {
            element
                .text()
                .collect::<String>()
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Scraper over a shared `reqwest` client.
pub struct HtmlPageScraper {
    client: reqwest::Client,
    max_chars: usize,
}

impl HtmlPageScraper {
    pub fn new(timeout: Duration) -> Result<Self, SearchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("proposal-agent/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SearchError::Other(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            max_chars: DEFAULT_MAX_PAGE_CHARS,
        })
    }

    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }
}

#[async_trait]
impl PageScraper for HtmlPageScraper {
    async fn scrape(&self, url: &str) -> Result<String, SearchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await.map_err(map_reqwest_error)?;
        let text = extract_text(&body);
        debug!("Scraped {} chars from {}", text.chars().count(), url);
        Ok(truncate_chars(&text, self.max_chars).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_text_headings_and_paragraphs() {
        let html = r#"
            <html><head><title>Ignored</title><script>var x = 1;</script></head>
            <body>
              <nav><a href="/">Home</a></nav>
              <h1>Fleet  Charging</h1>
              <div>Sidebar text</div>
              <p>Depot chargers need <b>400 kW</b>.</p>
              <h3></h3>
              <p>Grants cover 40%.</p>
            </body></html>"#;

        assert_eq!(
            extract_text(html),
            "Fleet Charging\nDepot chargers need 400 kW.\nGrants cover 40%."
        );
    }

    #[test]
    fn test_extract_text_without_matches() {
        assert_eq!(extract_text("<div>only divs</div>"), "");
    }
}
