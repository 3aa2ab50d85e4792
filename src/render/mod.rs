//! Rendering module for converting segmentation results to output formats.

pub mod json;
pub mod manifest;
pub mod text;

pub use json::{to_json, JsonFormat};
pub use manifest::{presentation_name, ManifestOptions, SlideEntry, SlideManifest};
pub use text::to_text;
