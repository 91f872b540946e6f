//! Document-level types.

use super::Page;
use serde::{Deserialize, Serialize};

/// A decoded source document: an ordered, finite sequence of pages.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata (title, producer, etc.)
    #[serde(default)]
    pub metadata: Metadata,

    /// Pages in document order
    pub pages: Vec<Page>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from pages already in document order.
    pub fn from_pages(pages: Vec<Page>) -> Self {
        Self {
            metadata: Metadata::default(),
            pages,
        }
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Get a page by index (0-indexed).
    pub fn get_page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    /// Add a page to the document.
    ///
    /// The page's `index` is reset to its position so indices stay dense.
    pub fn add_page(&mut self, mut page: Page) {
        page.index = self.pages.len();
        self.pages.push(page);
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Total number of drawing commands across all pages.
    pub fn command_count(&self) -> usize {
        self.pages.iter().map(|p| p.commands.len()).sum()
    }

    /// Total number of text spans across all pages.
    pub fn span_count(&self) -> usize {
        self.pages.iter().map(|p| p.spans.len()).sum()
    }
}

/// Document metadata carried over from the decoder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,

    /// Document author
    pub author: Option<String>,

    /// Creator application
    pub creator: Option<String>,

    /// Producer of the decoded dump
    pub producer: Option<String>,
}
