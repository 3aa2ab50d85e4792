//! Page-level types supplied by the text extractor.

use super::BBox;
use serde::{Deserialize, Serialize};

/// A single extracted text fragment with position and typography.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The text content
    pub text: String,

    /// Bounding box on the page
    #[serde(flatten)]
    pub bbox: BBox,

    /// Font name (e.g., "Helvetica-Bold")
    #[serde(default)]
    pub fontname: String,

    /// Font size in points
    #[serde(default)]
    pub size: f32,

    /// Page index as numbered by the extractor
    #[serde(default)]
    pub page: u32,
}

impl Token {
    /// Create a new token.
    pub fn new(
        text: impl Into<String>,
        bbox: BBox,
        fontname: impl Into<String>,
        size: f32,
        page: u32,
    ) -> Self {
        Self {
            text: text.into(),
            bbox,
            fontname: fontname.into(),
            size,
            page,
        }
    }

    /// Top edge of the token.
    pub fn top(&self) -> f32 {
        self.bbox.top
    }
}

/// An embedded image's placement on a page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageBox {
    /// Bounding box on the page
    #[serde(flatten)]
    pub bbox: BBox,
}

impl ImageBox {
    /// Create an image placement from its bounding box.
    pub fn new(bbox: BBox) -> Self {
        Self { bbox }
    }
}

/// Everything the extractor reports for one page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageContent {
    /// Page index as numbered by the extractor
    pub index: u32,

    /// Page width in points
    pub width: f32,

    /// Page height in points
    pub height: f32,

    /// Text tokens in extractor order
    #[serde(default)]
    pub tokens: Vec<Token>,

    /// Embedded image placements
    #[serde(default)]
    pub images: Vec<ImageBox>,
}

impl PageContent {
    /// Create an empty page with the given dimensions.
    pub fn new(index: u32, width: f32, height: f32) -> Self {
        Self {
            index,
            width,
            height,
            tokens: Vec::new(),
            images: Vec::new(),
        }
    }

    /// Create an empty page with standard Letter size (8.5 x 11 inches).
    pub fn letter(index: u32) -> Self {
        Self::new(index, 612.0, 792.0)
    }

    /// Create an empty page with standard A4 size (210 x 297 mm).
    pub fn a4(index: u32) -> Self {
        Self::new(index, 595.0, 842.0)
    }

    /// Add a token, stamping it with this page's index.
    pub fn add_token(&mut self, mut token: Token) {
        token.page = self.index;
        self.tokens.push(token);
    }

    /// Add an image placement.
    pub fn add_image(&mut self, bbox: BBox) {
        self.images.push(ImageBox::new(bbox));
    }

    /// Check if the page carries neither text nor images.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty() && self.images.is_empty()
    }

    /// Get page dimensions as (width, height) tuple.
    pub fn dimensions(&self) -> (f32, f32) {
        (self.width, self.height)
    }
}
