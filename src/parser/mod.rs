//! Question segmentation.
//!
//! Two passes over an [`ExtractedDocument`](crate::model::ExtractedDocument):
//! the [`Classifier`] folds visual lines into question records, then the
//! [`CropResolver`] turns the finished records into crop rectangles.

mod accumulator;
mod classifier;
mod lines;
mod options;
mod patterns;
mod resolver;
mod segmenter;
mod source;

pub use accumulator::Accumulator;
pub use classifier::{
    Classifier, ClassifierConfig, HeadingTrigger, LineClass, NoiseReason, Step,
};
pub use lines::{Line, LineAssembler, DEFAULT_LINE_TOLERANCE};
pub use options::{ErrorMode, PageSelection, SegmentOptions};
pub use patterns::{normalize, numbering, option_row, starts_with_starter, OptionRow};
pub use resolver::{CropConfig, CropFailure, CropResolver};
pub use segmenter::{Segmentation, Segmenter, TracedLine};
pub use source::{JsonSource, TextSource};
