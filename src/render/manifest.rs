//! Slide manifest for the downstream presentation builder.
//!
//! The manifest says what each slide should show: a title slide, then one
//! slide per resolved crop region with the crop in layout points and in
//! raster pixels at the chosen DPI. Rasterizing pages and writing the
//! presentation file happen elsewhere.

use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::{BBox, PixelRect};
use crate::parser::Segmentation;

use super::json::{serialize, JsonFormat};

/// Title slide heading.
pub const TITLE: &str = "Multiple Choice Questions";

/// Presentation name used when the document has no source label.
pub const DEFAULT_PRESENTATION: &str = "mcq_presentation.pptx";

/// Options for building a slide manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestOptions {
    /// Rasterization resolution for pixel crops
    pub dpi: u32,

    /// Auto-advance delay per question slide, in seconds
    pub seconds: Option<u32>,

    /// Presentation file name override
    pub presentation: Option<String>,
}

impl ManifestOptions {
    /// Create manifest options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rasterization resolution.
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Advance each question slide automatically after `seconds`.
    pub fn with_seconds(mut self, seconds: u32) -> Self {
        self.seconds = Some(seconds);
        self
    }

    /// Set the presentation file name.
    pub fn with_presentation(mut self, name: impl Into<String>) -> Self {
        self.presentation = Some(name.into());
        self
    }

    /// Reject a zero DPI or a zero slide duration.
    pub fn validate(&self) -> Result<()> {
        if self.dpi == 0 {
            return Err(Error::InvalidInput("DPI must be positive".to_string()));
        }
        if self.seconds == Some(0) {
            return Err(Error::InvalidInput(
                "slide duration must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ManifestOptions {
    fn default() -> Self {
        Self {
            dpi: 200,
            seconds: None,
            presentation: None,
        }
    }
}

/// One question slide.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlideEntry {
    /// Question number
    pub number: u32,
    /// Caption shown above the image
    pub caption: String,
    /// Page index to rasterize
    pub page: u32,
    /// Crop in layout points
    pub rect: BBox,
    /// Crop in pixels at the manifest's DPI
    pub pixels: PixelRect,
    /// Auto-advance delay in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advance_after_ms: Option<u64>,
}

/// Everything the presentation builder needs for one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlideManifest {
    /// Output presentation file name
    pub presentation: String,
    /// Title slide heading
    pub title: String,
    /// Title slide subtitle (source file name)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Rasterization resolution
    pub dpi: u32,
    /// Question slides in ascending question order
    pub slides: Vec<SlideEntry>,
}

impl SlideManifest {
    /// Build the manifest for a segmentation result.
    ///
    /// Questions without a resolved region get no slide.
    pub fn build(seg: &Segmentation, options: &ManifestOptions) -> Result<Self> {
        options.validate()?;

        let subtitle = seg.source.as_deref().map(file_name);
        let presentation = options
            .presentation
            .clone()
            .or_else(|| seg.source.as_deref().map(presentation_name))
            .unwrap_or_else(|| DEFAULT_PRESENTATION.to_string());
        let advance_after_ms = options.seconds.map(|s| u64::from(s) * 1000);

        let slides = seg
            .regions
            .iter()
            .map(|region| SlideEntry {
                number: region.number,
                caption: format!("Question {}", region.number),
                page: region.page,
                rect: region.rect,
                pixels: region.to_pixels(options.dpi),
                advance_after_ms,
            })
            .collect();

        Ok(Self {
            presentation,
            title: TITLE.to_string(),
            subtitle,
            dpi: options.dpi,
            slides,
        })
    }

    /// Number of question slides.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Serialize the manifest.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        serialize(self, format)
    }
}

/// `<stem>_mcq.pptx` for a source such as `dir/paper.pdf`.
pub fn presentation_name(source: &str) -> String {
    let stem = Path::new(source)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.to_string());
    format!("{}_mcq.pptx", stem)
}

fn file_name(source: &str) -> String {
    Path::new(source)
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.to_string())
}
