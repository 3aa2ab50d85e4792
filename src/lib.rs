//! # mcqsplit
//!
//! Multiple-choice question segmentation for exam papers.
//!
//! Given the positioned text tokens and image placements a PDF text
//! extractor reports for each page, this library finds where every
//! numbered question starts and ends and produces one crop rectangle per
//! question, ready to be rasterized onto a slide.
//!
//! ## Quick Start
//!
//! ```no_run
//! use mcqsplit::{segment_file, render};
//!
//! fn main() -> mcqsplit::Result<()> {
//!     // Extractor output for one paper
//!     let seg = segment_file("paper.json")?;
//!
//!     for region in &seg.regions {
//!         println!("Q{} on page {}: {:?}", region.number, region.page, region.rect);
//!     }
//!
//!     println!("{}", render::to_text(&seg)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Line-based detection**: numbered headings, starter phrases, answer rows
//! - **Sequence tracking**: out-of-order numbers are kept as body text
//! - **Crop resolution**: look-ahead pass clamps each crop above the next question
//! - **Slide manifests**: title slide, captions, pixel crops, auto-advance timing
//! - **Parallel batches**: independent documents on the Rayon pool

pub mod batch;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use batch::{segment_directory, segment_files, BatchItem};
pub use error::{CropError, Error, Result};
pub use model::{
    BBox, ContentItem, CropRegion, ExtractedDocument, ImageBox, PageContent, Payload, PixelRect,
    QuestionRecord, Token,
};
pub use parser::{
    ClassifierConfig, CropConfig, CropFailure, ErrorMode, JsonSource, LineClass, PageSelection,
    SegmentOptions, Segmentation, Segmenter, TextSource, TracedLine,
};
pub use render::{JsonFormat, ManifestOptions, SlideManifest};

use std::io::Read;
use std::path::Path;

/// Segment an already loaded document.
///
/// # Example
///
/// ```
/// use mcqsplit::{segment_document, ExtractedDocument, SegmentOptions};
///
/// let seg = segment_document(&ExtractedDocument::new(), SegmentOptions::default()).unwrap();
/// assert!(seg.is_empty());
/// ```
pub fn segment_document(doc: &ExtractedDocument, options: SegmentOptions) -> Result<Segmentation> {
    Segmenter::new(options).segment(doc)
}

/// Segment extractor output stored in a JSON file.
///
/// # Arguments
///
/// * `path` - Path to the extractor's JSON output
///
/// # Example
///
/// ```no_run
/// use mcqsplit::segment_file;
///
/// let seg = segment_file("paper.json").unwrap();
/// println!("Questions: {}", seg.question_count());
/// ```
pub fn segment_file<P: AsRef<Path>>(path: P) -> Result<Segmentation> {
    segment_file_with_options(path, SegmentOptions::default())
}

/// Segment a JSON file with custom options.
///
/// # Example
///
/// ```no_run
/// use mcqsplit::{segment_file_with_options, SegmentOptions};
///
/// let options = SegmentOptions::new().strict().with_front_matter(2);
/// let seg = segment_file_with_options("paper.json", options).unwrap();
/// ```
pub fn segment_file_with_options<P: AsRef<Path>>(
    path: P,
    options: SegmentOptions,
) -> Result<Segmentation> {
    let doc = JsonSource::open(path)?.load()?;
    segment_document(&doc, options)
}

/// Segment extractor output held in memory.
pub fn segment_bytes(data: &[u8]) -> Result<Segmentation> {
    segment_bytes_with_options(data, SegmentOptions::default())
}

/// Segment in-memory extractor output with custom options.
pub fn segment_bytes_with_options(data: &[u8], options: SegmentOptions) -> Result<Segmentation> {
    let doc = JsonSource::from_bytes(data).load()?;
    segment_document(&doc, options)
}

/// Segment extractor output read from a reader.
///
/// # Example
///
/// ```no_run
/// use mcqsplit::segment_reader;
///
/// let seg = segment_reader(std::io::stdin()).unwrap();
/// ```
pub fn segment_reader<R: Read>(reader: R) -> Result<Segmentation> {
    let doc = JsonSource::from_reader(reader)?.load()?;
    segment_document(&doc, SegmentOptions::default())
}

/// Builder for segmenting documents and rendering the result.
///
/// # Example
///
/// ```no_run
/// use mcqsplit::McqSplit;
///
/// let manifest = McqSplit::new()
///     .strict()
///     .with_dpi(150)
///     .with_seconds(45)
///     .segment("paper.json")?
///     .to_manifest()?;
/// # Ok::<(), mcqsplit::Error>(())
/// ```
pub struct McqSplit {
    segment_options: SegmentOptions,
    manifest_options: ManifestOptions,
}

impl McqSplit {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            segment_options: SegmentOptions::default(),
            manifest_options: ManifestOptions::default(),
        }
    }

    /// Fail on the first question whose crop cannot be resolved.
    pub fn strict(mut self) -> Self {
        self.segment_options = self.segment_options.strict();
        self
    }

    /// Report crop failures and keep going (default).
    pub fn lenient(mut self) -> Self {
        self.segment_options = self.segment_options.with_error_mode(ErrorMode::Lenient);
        self
    }

    /// Disable parallel batch processing.
    pub fn sequential(mut self) -> Self {
        self.segment_options = self.segment_options.sequential();
        self
    }

    /// Set how many leading pages to skip.
    pub fn with_front_matter(mut self, pages: u32) -> Self {
        self.segment_options = self.segment_options.with_front_matter(pages);
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.segment_options = self.segment_options.with_pages(pages);
        self
    }

    /// Set the line grouping tolerance.
    pub fn with_line_tolerance(mut self, tolerance: f32) -> Self {
        self.segment_options = self.segment_options.with_line_tolerance(tolerance);
        self
    }

    /// Set the rasterization DPI for manifests.
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.manifest_options = self.manifest_options.with_dpi(dpi);
        self
    }

    /// Auto-advance question slides after `seconds`.
    pub fn with_seconds(mut self, seconds: u32) -> Self {
        self.manifest_options = self.manifest_options.with_seconds(seconds);
        self
    }

    /// Segment a JSON file and return a result wrapper.
    pub fn segment<P: AsRef<Path>>(self, path: P) -> Result<McqSplitResult> {
        let doc = JsonSource::open(path)?.load()?;
        self.segment_document(&doc)
    }

    /// Segment in-memory extractor output.
    pub fn segment_bytes(self, data: &[u8]) -> Result<McqSplitResult> {
        let doc = JsonSource::from_bytes(data).load()?;
        self.segment_document(&doc)
    }

    /// Segment an already loaded document.
    pub fn segment_document(self, doc: &ExtractedDocument) -> Result<McqSplitResult> {
        let segmentation = Segmenter::new(self.segment_options).segment(doc)?;
        Ok(McqSplitResult {
            segmentation,
            manifest_options: self.manifest_options,
        })
    }
}

impl Default for McqSplit {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of segmenting one document.
pub struct McqSplitResult {
    /// The segmentation
    pub segmentation: Segmentation,
    /// Manifest options to use
    manifest_options: ManifestOptions,
}

impl McqSplitResult {
    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.segmentation, format)
    }

    /// Convert to a plain text summary.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.segmentation)
    }

    /// Build the slide manifest.
    pub fn to_manifest(&self) -> Result<SlideManifest> {
        SlideManifest::build(&self.segmentation, &self.manifest_options)
    }

    /// Get the segmentation.
    pub fn segmentation(&self) -> &Segmentation {
        &self.segmentation
    }
}
