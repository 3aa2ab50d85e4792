//! Data types shared by segmentation and rendering.
//!
//! The extractor-facing types ([`ExtractedDocument`], [`PageContent`],
//! [`Token`]) are the input interchange format; [`QuestionRecord`] is the
//! intermediate list produced by the first pass and [`CropRegion`] is the
//! output of the second.

mod document;
mod geometry;
mod page;
mod question;
mod region;

pub use document::ExtractedDocument;
pub use geometry::BBox;
pub use page::{ImageBox, PageContent, Token};
pub use question::{ContentItem, Payload, QuestionRecord, ReferenceFormatting};
pub use region::{CropRegion, PixelRect};
