//! Conversion options and configuration.

use std::ops::RangeInclusive;

/// Horizontal gap between pages in a merged drawing, in output units.
pub const DEFAULT_PAGE_GAP: f64 = 50.0;

/// Options for converting a document.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// How selected pages are distributed over output files
    pub layout: LayoutMode,

    /// Which source pages to convert
    pub pages: PageSelection,

    /// Gap between consecutive pages in merged layout
    pub page_gap: f64,

    /// Whether to translate pages in parallel
    pub parallel: bool,
}

impl ConvertOptions {
    /// Create new conversion options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set layout mode.
    pub fn with_layout(mut self, layout: LayoutMode) -> Self {
        self.layout = layout;
        self
    }

    /// Merge all selected pages into one drawing.
    pub fn merged(mut self) -> Self {
        self.layout = LayoutMode::Merged;
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.pages = pages;
        self
    }

    /// Set specific pages (0-indexed).
    pub fn with_page_list(mut self, pages: Vec<i64>) -> Self {
        self.pages = PageSelection::Indices(pages);
        self
    }

    /// Set the merged-layout page gap.
    pub fn with_page_gap(mut self, gap: f64) -> Self {
        self.page_gap = gap;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            layout: LayoutMode::PerPage,
            pages: PageSelection::All,
            page_gap: DEFAULT_PAGE_GAP,
            parallel: true,
        }
    }
}

/// How selected pages are laid out over output files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    /// One file per page when several pages are selected
    #[default]
    PerPage,
    /// A single file with pages side by side
    Merged,
}

/// Page selection for conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageSelection {
    /// Convert all pages in document order
    #[default]
    All,
    /// Convert specific pages (0-indexed, in the given order)
    ///
    /// Indices are signed so that out-of-range requests such as `-1`
    /// survive parsing and are reported during page resolution.
    Indices(Vec<i64>),
    /// Convert inclusive page ranges (0-indexed, in the given order)
    ///
    /// Ranges are kept unexpanded and clamped to the document when the
    /// selection is resolved.
    Ranges(Vec<RangeInclusive<i64>>),
}

impl PageSelection {
    /// Requested pages as inclusive spans, `None` for all pages.
    ///
    /// A single index `i` becomes the span `i..=i`.
    pub fn spans(&self) -> Option<Vec<RangeInclusive<i64>>> {
        match self {
            PageSelection::All => None,
            PageSelection::Indices(pages) => Some(pages.iter().map(|&p| p..=p).collect()),
            PageSelection::Ranges(ranges) => Some(ranges.clone()),
        }
    }

    /// Number of explicitly requested indices, `None` for all pages.
    ///
    /// Saturates at `usize::MAX` for huge ranges.
    pub fn requested(&self) -> Option<usize> {
        let spans = self.spans()?;
        let total = spans.iter().fold(0usize, |acc, span| {
            let len = i128::from(*span.end()) - i128::from(*span.start()) + 1;
            let len = usize::try_from(len.max(0)).unwrap_or(usize::MAX);
            acc.saturating_add(len)
        });
        Some(total)
    }

    /// Parse a page selection string (e.g., "0,2,5", "0-3,7", "all").
    ///
    /// Indices are 0-based; ranges are inclusive. Order is preserved and
    /// ranges are never expanded, so "0-4000000000" stays one span.
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();

        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(PageSelection::All);
        }

        let mut spans = Vec::new();
        for part in s.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            if let Ok(p) = part.parse::<i64>() {
                spans.push(p..=p);
                continue;
            }
            let (start, end) = part
                .split_once('-')
                .ok_or_else(|| format!("Invalid page number: {}", part))?;
            let start: i64 = start
                .trim()
                .parse()
                .map_err(|_| format!("Invalid start page: {}", part))?;
            let end: i64 = end
                .trim()
                .parse()
                .map_err(|_| format!("Invalid end page: {}", part))?;
            if start > end {
                return Err(format!("Descending page range: {}", part));
            }
            spans.push(start..=end);
        }

        if spans.is_empty() {
            return Err(format!("No page numbers in: {}", s));
        }
        Ok(PageSelection::Ranges(spans))
    }
}

impl std::str::FromStr for PageSelection {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PageSelection::parse(s).map_err(crate::error::Error::InvalidPageList)
    }
}
