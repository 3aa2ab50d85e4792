//! Running region accumulation for the open question.
//!
//! The accumulator exclusively owns the one question that is currently open.
//! Opening a new question hands the previous one back, finalized; nothing
//! else can reach a record once it has been handed back.

use crate::model::{BBox, ContentItem, QuestionRecord};

use super::lines::Line;

/// Owner of the open question record.
#[derive(Debug, Default)]
pub struct Accumulator {
    current: Option<QuestionRecord>,
}

impl Accumulator {
    /// Create an accumulator with no open question.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a question is open.
    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    /// Heading bounds of the open question.
    pub fn open_start(&self) -> Option<BBox> {
        self.current.as_ref().map(|q| q.start_bbox)
    }

    /// Open question `number` anchored at `line`, returning the previously
    /// open question finalized.
    pub fn open(&mut self, number: u32, line: &Line) -> Option<QuestionRecord> {
        let record = QuestionRecord::new(number, line.page, line.bbox(), line.text());
        self.current.replace(record)
    }

    /// Append a body or option line to the open question.
    ///
    /// Returns `false` (and does nothing) when no question is open.
    pub fn append_line(&mut self, line: &Line) -> bool {
        match self.current.as_mut() {
            Some(record) => {
                record.push(ContentItem::text(line.page, line.bbox(), line.text()));
                true
            }
            None => false,
        }
    }

    /// Append an image to the open question.
    ///
    /// Returns `false` (and does nothing) when no question is open.
    pub fn append_image(&mut self, page: u32, bbox: BBox) -> bool {
        match self.current.as_mut() {
            Some(record) => {
                record.push(ContentItem::image(page, bbox));
                true
            }
            None => false,
        }
    }

    /// Finalize and return the open question, if any.
    pub fn finish(&mut self) -> Option<QuestionRecord> {
        self.current.take()
    }
}
