//! Crop region resolution: the second pass over finalized questions.
//!
//! A question's true lower edge is only known once the next question's
//! position is known, so this pass runs over the complete, immutable list of
//! records and looks ahead by question number. It never mutates the records.
//!
//! Per question `i`:
//!
//! 1. Start from the heading bounds.
//! 2. Fold in every content item on the question's own page, except items
//!    that sit at or below the start of question `i + 1` on that page.
//! 3. Bottom edge: just above question `i + 1` when it starts on the same
//!    page; a fixed margin below the content on the document's last page;
//!    otherwise near the bottom of the page.
//! 4. Widen the right edge to absorb answer choices that run past the
//!    measured token boxes, clipped to the page.

use serde::Serialize;

use crate::error::CropError;
use crate::model::{BBox, CropRegion, ExtractedDocument, QuestionRecord};

/// Tunables for crop resolution, in layout units unless noted.
#[derive(Debug, Clone, PartialEq)]
pub struct CropConfig {
    /// Gap kept above the next question's heading
    pub next_gap: f32,

    /// Extra space below the content on the document's last page
    pub last_page_margin: f32,

    /// Distance from the page bottom for questions that run on
    pub page_bottom_margin: f32,

    /// Fractional growth of the right edge (0.2 = 20%)
    pub right_widen: f32,
}

impl CropConfig {
    /// Create a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the gap kept above the next heading.
    pub fn with_next_gap(mut self, gap: f32) -> Self {
        self.next_gap = gap;
        self
    }

    /// Set the last-page bottom margin.
    pub fn with_last_page_margin(mut self, margin: f32) -> Self {
        self.last_page_margin = margin;
        self
    }

    /// Set the page-bottom margin.
    pub fn with_page_bottom_margin(mut self, margin: f32) -> Self {
        self.page_bottom_margin = margin;
        self
    }

    /// Set the right-edge widening factor.
    pub fn with_right_widen(mut self, widen: f32) -> Self {
        self.right_widen = widen;
        self
    }
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            next_gap: 5.0,
            last_page_margin: 30.0,
            page_bottom_margin: 50.0,
            right_widen: 0.20,
        }
    }
}

/// A question whose crop could not be resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CropFailure {
    /// Question number
    pub number: u32,
    /// Page index of the question
    pub page: u32,
    /// What went wrong
    pub error: CropError,
}

/// Second-pass resolver bound to one document's page geometry.
pub struct CropResolver<'a> {
    doc: &'a ExtractedDocument,
    last_page: Option<u32>,
    config: CropConfig,
}

impl<'a> CropResolver<'a> {
    /// Create a resolver for `doc`.
    pub fn new(doc: &'a ExtractedDocument, config: CropConfig) -> Self {
        Self {
            doc,
            last_page: doc.last_page_index(),
            config,
        }
    }

    /// Resolve every question. One entry per input record, in order.
    pub fn resolve(&self, questions: &[QuestionRecord]) -> Vec<Result<CropRegion, CropFailure>> {
        (0..questions.len())
            .map(|index| {
                let question = &questions[index];
                self.resolve_one(questions, index).map_err(|error| {
                    log::warn!("Question {}: crop not resolved: {}", question.number, error);
                    CropFailure {
                        number: question.number,
                        page: question.page,
                        error,
                    }
                })
            })
            .collect()
    }

    /// Resolve the crop rectangle of `questions[index]`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn resolve_one(
        &self,
        questions: &[QuestionRecord],
        index: usize,
    ) -> Result<CropRegion, CropError> {
        let question = &questions[index];
        if question.content.is_empty() {
            return Err(CropError::EmptyContent);
        }

        let page = self
            .doc
            .page(question.page)
            .ok_or(CropError::MissingPage {
                page: question.page,
            })?;

        let next = questions.iter().find(|q| q.number == question.number + 1);
        let next_on_page = next.filter(|n| n.page == question.page);

        let mut rect = question.start_bbox;
        for item in &question.content {
            if item.page != question.page {
                continue;
            }
            if let Some(n) = next_on_page {
                if item.bbox.top >= n.start_bbox.top {
                    continue;
                }
            }
            rect.extend(&item.bbox);
        }

        if let Some(n) = next_on_page {
            rect.bottom = n.start_bbox.top - self.config.next_gap;
        } else if self.last_page == Some(question.page) {
            rect.bottom += self.config.last_page_margin;
        } else {
            rect.bottom = rect.bottom.max(page.height - self.config.page_bottom_margin);
        }

        rect.x1 *= 1.0 + self.config.right_widen;

        let rect = rect.clamp_to(page.width, page.height);
        if !rect.is_valid() {
            return Err(invalid(rect));
        }

        Ok(CropRegion::new(question.number, question.page, rect))
    }
}

fn invalid(rect: BBox) -> CropError {
    CropError::InvalidRect {
        x0: rect.x0,
        top: rect.top,
        x1: rect.x1,
        bottom: rect.bottom,
    }
}
