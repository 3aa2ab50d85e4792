//! Segmentation options and configuration.

use std::ops::RangeInclusive;

use super::classifier::ClassifierConfig;
use super::lines::DEFAULT_LINE_TOLERANCE;
use super::resolver::CropConfig;

/// Options for segmenting a document.
#[derive(Debug, Clone)]
pub struct SegmentOptions {
    /// Error handling mode for per-question crop failures
    pub error_mode: ErrorMode,

    /// Vertical tolerance for grouping tokens into lines
    pub line_tolerance: f32,

    /// Number of leading pages treated as front matter and skipped,
    /// counted in page order whatever the first page index is
    pub skip_front_matter: u32,

    /// Page selection (which page indices to scan)
    pub pages: PageSelection,

    /// Classifier tunables
    pub classifier: ClassifierConfig,

    /// Crop resolution tunables
    pub crop: CropConfig,

    /// Whether batch runs process documents in parallel
    pub parallel: bool,
}

impl SegmentOptions {
    /// Create new segment options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Fail on the first unresolvable question.
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Set the line grouping tolerance.
    pub fn with_line_tolerance(mut self, tolerance: f32) -> Self {
        self.line_tolerance = tolerance;
        self
    }

    /// Set how many leading pages to skip.
    pub fn with_front_matter(mut self, pages: u32) -> Self {
        self.skip_front_matter = pages;
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.pages = pages;
        self
    }

    /// Set classifier config.
    pub fn with_classifier(mut self, config: ClassifierConfig) -> Self {
        self.classifier = config;
        self
    }

    /// Set crop config.
    pub fn with_crop(mut self, config: CropConfig) -> Self {
        self.crop = config;
        self
    }

    /// Enable or disable parallel batch processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel batch processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Check whether the page at `position` (0-based, in page order) with
    /// page index `index` is scanned.
    pub fn scans_page(&self, position: usize, index: u32) -> bool {
        position >= self.skip_front_matter as usize && self.pages.includes(index)
    }
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Lenient,
            line_tolerance: DEFAULT_LINE_TOLERANCE,
            skip_front_matter: 1,
            pages: PageSelection::All,
            classifier: ClassifierConfig::default(),
            crop: CropConfig::default(),
            parallel: true,
        }
    }
}

/// How per-question failures are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on the first unresolvable question
    Strict,
    /// Report the failure and continue with the remaining questions
    #[default]
    Lenient,
}

/// Page selection by page index, as the extractor numbers pages.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PageSelection {
    /// Scan all pages
    #[default]
    All,
    /// Scan a range of pages (inclusive)
    Range(RangeInclusive<u32>),
    /// Scan specific pages
    Pages(Vec<u32>),
}

impl PageSelection {
    /// Check if a page index should be included.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Pages(pages) => pages.contains(&page),
        }
    }

    /// Highest page index the selection names, if it is bounded.
    pub fn highest(&self) -> Option<u32> {
        match self {
            PageSelection::All => None,
            PageSelection::Range(range) => Some(*range.end()),
            PageSelection::Pages(pages) => pages.iter().copied().max(),
        }
    }

    /// Parse a page selection string (e.g., "1-10", "1,3,5,7-10").
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();

        if s.is_empty() || s == "all" {
            return Ok(PageSelection::All);
        }

        if let Some((start, end)) = s.split_once('-') {
            if !start.contains(',') && !end.contains(',') {
                let start: u32 = start.trim().parse().map_err(|_| "Invalid start page")?;
                let end: u32 = end.trim().parse().map_err(|_| "Invalid end page")?;
                if start > end {
                    return Err(format!("Range start {} is after end {}", start, end));
                }
                return Ok(PageSelection::Range(start..=end));
            }
        }

        let mut pages = Vec::new();
        for part in s.split(',') {
            let part = part.trim();
            if let Some((start, end)) = part.split_once('-') {
                let start: u32 = start.trim().parse().map_err(|_| "Invalid page number")?;
                let end: u32 = end.trim().parse().map_err(|_| "Invalid page number")?;
                pages.extend(start..=end);
            } else {
                let p: u32 = part.parse().map_err(|_| "Invalid page number")?;
                pages.push(p);
            }
        }

        pages.sort_unstable();
        pages.dedup();
        Ok(PageSelection::Pages(pages))
    }
}
