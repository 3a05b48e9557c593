//! Search adapters: web index, page scraping and document similarity search.

mod document_index;
mod google;
mod page_scraper;

pub use document_index::InMemoryDocumentIndex;
pub use google::{DEFAULT_SEARCH_ENDPOINT, GoogleWebSearchClient};
pub use page_scraper::{HtmlPageScraper, extract_text};

use proposal_application::ports::search::SearchError;

fn map_reqwest_error(e: reqwest::Error) -> SearchError {
    if e.is_timeout() {
        SearchError::Timeout
    } else {
        SearchError::RequestFailed(e.to_string())
    }
}
