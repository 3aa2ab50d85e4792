//! Document-level types.

use super::PageContent;
use serde::{Deserialize, Serialize};

/// The extractor's view of a whole document: pages of positioned tokens.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractedDocument {
    /// Where the document came from (file name or other label)
    #[serde(default)]
    pub source: Option<String>,

    /// Pages in the document
    #[serde(default)]
    pub pages: Vec<PageContent>,
}

impl ExtractedDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the source label.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Add a page to the document.
    pub fn add_page(&mut self, page: PageContent) {
        self.pages.push(page);
    }

    /// Get a page by its index.
    pub fn page(&self, index: u32) -> Option<&PageContent> {
        self.pages.iter().find(|p| p.index == index)
    }

    /// Index of the document's last page, if it has any.
    pub fn last_page_index(&self) -> Option<u32> {
        self.pages.iter().map(|p| p.index).max()
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Pages sorted by ascending index.
    pub fn pages_in_order(&self) -> Vec<&PageContent> {
        let mut pages: Vec<&PageContent> = self.pages.iter().collect();
        pages.sort_by_key(|p| p.index);
        pages
    }
}
