//! Error types for mcqsplit.

use serde::Serialize;
use std::io;
use thiserror::Error;

/// Result type alias for mcqsplit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading or segmenting a document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The extractor output could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The extractor output is structurally unusable.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Invalid page range specification.
    #[error("Invalid page range: {0}")]
    InvalidPageRange(String),

    /// A question's crop region could not be resolved (strict mode).
    #[error("Question {number}: {source}")]
    Crop {
        number: u32,
        #[source]
        source: CropError,
    },

    /// Error during rendering (JSON, text, manifest).
    #[error("Rendering error: {0}")]
    Render(String),
}

/// Why a single question's crop rectangle could not be produced.
///
/// These are local failures: the resolver reports them and moves on to the
/// next question.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CropError {
    /// The record carries no content items.
    #[error("question has no content")]
    EmptyContent,

    /// The record's page is not present in the document.
    #[error("page {page} not found in document")]
    MissingPage { page: u32 },

    /// The resolved rectangle has no area or non-finite edges.
    #[error("resolved rectangle is invalid: ({x0:.1}, {top:.1}, {x1:.1}, {bottom:.1})")]
    InvalidRect {
        x0: f32,
        top: f32,
        x1: f32,
        bottom: f32,
    },
}
