use serde::{Deserialize, Serialize};

/// Everything extracted from a single fetched page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlResult {
    pub url: String,
    pub title: Option<String>,
    /// Hrefs in document order, duplicates kept.
    pub links: Vec<String>,
    pub text: String,
}

impl CrawlResult {
    pub fn new(url: String) -> Self {
        Self {
            url,
            title: None,
            links: Vec::new(),
            text: String::new(),
        }
    }
}

/// The object written to `text.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextDocument {
    pub text: String,
}
