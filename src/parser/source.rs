//! Extractor input: where the positioned tokens come from.
//!
//! Segmentation never touches PDF bytes. An external extractor writes each
//! page's tokens and image placements as JSON, and a [`TextSource`] turns
//! that into an [`ExtractedDocument`].

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::ExtractedDocument;

/// Abstract provider of extracted page content.
///
/// Implementations hide how the tokens were produced; the segmenter only
/// sees the resulting document.
pub trait TextSource {
    /// Load the document.
    fn load(&self) -> Result<ExtractedDocument>;
}

/// Extractor output serialized as JSON.
///
/// The expected shape is:
///
/// ```json
/// {
///   "source": "paper.pdf",
///   "pages": [
///     {
///       "index": 0, "width": 612.0, "height": 792.0,
///       "tokens": [{"text": "1.", "x0": 50.0, "top": 100.0, "x1": 60.0,
///                   "bottom": 112.0, "fontname": "Times-Bold", "size": 12.0}],
///       "images": [{"x0": 50.0, "top": 130.0, "x1": 200.0, "bottom": 220.0}]
///     }
///   ]
/// }
/// ```
#[derive(Debug, Clone)]
pub struct JsonSource {
    data: Vec<u8>,
    label: Option<String>,
}

impl JsonSource {
    /// Read extractor output from a file.
    ///
    /// When the JSON carries no `source`, the file name is used instead.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let label = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        Ok(Self { data, label })
    }

    /// Use extractor output already in memory.
    pub fn from_bytes(data: &[u8]) -> Self {
        Self {
            data: data.to_vec(),
            label: None,
        }
    }

    /// Read extractor output from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Ok(Self { data, label: None })
    }

    /// Override the source label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl TextSource for JsonSource {
    fn load(&self) -> Result<ExtractedDocument> {
        if self.data.iter().all(u8::is_ascii_whitespace) {
            return Err(Error::InvalidInput("extractor output is empty".to_string()));
        }

        let mut doc: ExtractedDocument = serde_json::from_slice(&self.data)?;
        if doc.source.is_none() {
            doc.source = self.label.clone();
        }

        validate(&mut doc)?;
        log::debug!(
            "Loaded {} pages from {}",
            doc.page_count(),
            doc.source.as_deref().unwrap_or("<memory>")
        );
        Ok(doc)
    }
}

impl TextSource for ExtractedDocument {
    fn load(&self) -> Result<ExtractedDocument> {
        let mut doc = self.clone();
        validate(&mut doc)?;
        Ok(doc)
    }
}

/// Reject geometry the segmenter cannot work with and stamp every token
/// with its page's index.
fn validate(doc: &mut ExtractedDocument) -> Result<()> {
    let mut seen = HashSet::new();

    for page in &mut doc.pages {
        if !seen.insert(page.index) {
            return Err(Error::InvalidInput(format!(
                "page {} appears more than once",
                page.index
            )));
        }

        if !(page.width.is_finite() && page.height.is_finite())
            || page.width <= 0.0
            || page.height <= 0.0
        {
            return Err(Error::InvalidInput(format!(
                "page {} has invalid dimensions {}x{}",
                page.index, page.width, page.height
            )));
        }

        let index = page.index;
        for token in &mut page.tokens {
            if !token.bbox.is_finite() {
                return Err(Error::InvalidInput(format!(
                    "token {:?} on page {} has non-finite coordinates",
                    token.text, index
                )));
            }
            token.page = index;
        }

        if let Some(image) = page.images.iter().find(|i| !i.bbox.is_finite()) {
            return Err(Error::InvalidInput(format!(
                "image at {:?} on page {} has non-finite coordinates",
                image.bbox, index
            )));
        }
    }

    Ok(())
}
