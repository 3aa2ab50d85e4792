//! Document driver: runs both segmentation passes over an extracted document.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::model::{CropRegion, ExtractedDocument, QuestionRecord};

use super::classifier::{Classifier, LineClass};
use super::lines::{Line, LineAssembler};
use super::options::{ErrorMode, SegmentOptions};
use super::resolver::{CropFailure, CropResolver};

/// Outcome of segmenting one document.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Segmentation {
    /// Source label of the document
    pub source: Option<String>,

    /// Question records from the first pass, numbered 1..=N
    pub questions: Vec<QuestionRecord>,

    /// Resolved crop regions, ascending by question number
    pub regions: Vec<CropRegion>,

    /// Questions whose crop could not be resolved
    pub failures: Vec<CropFailure>,
}

impl Segmentation {
    /// Number of detected questions.
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Check if no question was detected.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Look up a crop region by question number.
    pub fn region(&self, number: u32) -> Option<&CropRegion> {
        self.regions.iter().find(|r| r.number == number)
    }
}

/// One line as the classifier saw it.
#[derive(Debug, Clone, Serialize)]
pub struct TracedLine {
    /// Page index
    pub page: u32,
    /// Top edge of the line
    pub top: f32,
    /// Line text
    pub text: String,
    /// Classification outcome
    pub class: LineClass,
}

/// Question segmenter.
#[derive(Debug, Clone, Default)]
pub struct Segmenter {
    options: SegmentOptions,
}

impl Segmenter {
    /// Create a segmenter with the given options.
    pub fn new(options: SegmentOptions) -> Self {
        Self { options }
    }

    /// The options in use.
    pub fn options(&self) -> &SegmentOptions {
        &self.options
    }

    /// Run both passes and collect regions and per-question failures.
    ///
    /// In strict mode the first unresolvable question aborts with
    /// [`Error::Crop`]. A document with no scannable pages yields an empty
    /// segmentation, not an error.
    ///
    /// A page selection naming a page past the end of the document is
    /// rejected with [`Error::PageOutOfRange`].
    pub fn segment(&self, doc: &ExtractedDocument) -> Result<Segmentation> {
        if let (Some(wanted), Some(last)) = (self.options.pages.highest(), doc.last_page_index()) {
            if wanted > last {
                return Err(Error::PageOutOfRange(wanted, doc.page_count()));
            }
        }

        let questions = self.detect(doc);

        let resolver = CropResolver::new(doc, self.options.crop.clone());
        let mut regions = Vec::with_capacity(questions.len());
        let mut failures = Vec::new();

        for result in resolver.resolve(&questions) {
            match result {
                Ok(region) => regions.push(region),
                Err(failure) => {
                    if self.options.error_mode == ErrorMode::Strict {
                        return Err(Error::Crop {
                            number: failure.number,
                            source: failure.error,
                        });
                    }
                    failures.push(failure);
                }
            }
        }

        log::info!(
            "{}: {} questions, {} regions, {} failures",
            doc.source.as_deref().unwrap_or("<document>"),
            questions.len(),
            regions.len(),
            failures.len()
        );

        Ok(Segmentation {
            source: doc.source.clone(),
            questions,
            regions,
            failures,
        })
    }

    /// First pass only: the ordered question records.
    pub fn detect(&self, doc: &ExtractedDocument) -> Vec<QuestionRecord> {
        self.scan(doc, |_, _| {})
    }

    /// Classification of every scanned line, for diagnostics.
    pub fn trace(&self, doc: &ExtractedDocument) -> Vec<TracedLine> {
        let mut traced = Vec::new();
        self.scan(doc, |line, class| {
            traced.push(TracedLine {
                page: line.page,
                top: line.bbox().top,
                text: line.text(),
                class: *class,
            })
        });
        traced
    }

    /// Feed pages in ascending order through one classifier: lines first,
    /// then the page's images.
    fn scan<F>(&self, doc: &ExtractedDocument, mut on_line: F) -> Vec<QuestionRecord>
    where
        F: FnMut(&Line, &LineClass),
    {
        let mut classifier = Classifier::new(self.options.classifier.clone());
        let mut questions = Vec::new();

        for (position, page) in doc.pages_in_order().into_iter().enumerate() {
            if !self.options.scans_page(position, page.index) {
                continue;
            }

            let lines =
                LineAssembler::with_tolerance(page.index, &page.tokens, self.options.line_tolerance);
            for line in lines {
                let step = classifier.step(&line);
                on_line(&line, &step.class);
                questions.extend(step.emitted);
            }

            for image in &page.images {
                classifier.associate_image(page.index, image.bbox);
            }
        }

        questions.extend(classifier.finish());
        questions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CropError;
    use crate::model::{BBox, PageContent, Token};
    use crate::parser::PageSelection;

    fn add_line(page: &mut PageContent, text: &str, top: f32) {
        let mut x = 50.0;
        for word in text.split(' ') {
            let width = 6.0 * word.len() as f32;
            page.add_token(Token::new(
                word,
                BBox::new(x, top, x + width, top + 12.0),
                "Times-Bold",
                12.0,
                page.index,
            ));
            x += width + 4.0;
        }
    }

    fn two_question_doc() -> ExtractedDocument {
        let mut doc = ExtractedDocument::new().with_source("paper.pdf");
        let mut cover = PageContent::letter(0);
        add_line(&mut cover, "1. Cover page numbering", 100.0);
        doc.add_page(cover);

        let mut page = PageContent::letter(1);
        let mut top = 100.0;
        for text in [
            "1. What is X?",
            "A) foo",
            "B) bar",
            "C) baz",
            "D) qux",
            "2. What is Y?",
            "A) a",
            "B) b",
            "C) c",
            "D) d",
        ] {
            add_line(&mut page, text, top);
            top += 20.0;
        }
        doc.add_page(page);
        doc
    }

    #[test]
    fn test_front_matter_is_skipped() {
        let doc = two_question_doc();
        let questions = Segmenter::default().detect(&doc);
        assert_eq!(questions.len(), 2);
        assert!(questions.iter().all(|q| q.page == 1));
    }

    #[test]
    fn test_front_matter_is_skipped_with_one_based_pages() {
        let mut doc = ExtractedDocument::new();
        let mut cover = PageContent::letter(1);
        add_line(&mut cover, "1. Read instructions", 100.0);
        doc.add_page(cover);
        let mut page = PageContent::letter(2);
        add_line(&mut page, "1. What is X?", 100.0);
        add_line(&mut page, "2. Why is Y?", 200.0);
        doc.add_page(page);

        let questions = Segmenter::default().detect(&doc);
        assert_eq!(questions.len(), 2);
        assert!(questions.iter().all(|q| q.page == 2));

        let traced = Segmenter::default().trace(&doc);
        assert_eq!(traced.len(), 2);
        assert!(traced.iter().all(|t| t.class.is_new_question()));
    }

    #[test]
    fn test_segment_two_questions() {
        let doc = two_question_doc();
        let seg = Segmenter::default().segment(&doc).unwrap();

        assert_eq!(seg.question_count(), 2);
        assert_eq!(seg.regions.len(), 2);
        assert!(seg.failures.is_empty());
        assert_eq!(seg.source.as_deref(), Some("paper.pdf"));

        let first = seg.region(1).unwrap();
        let second = seg.region(2).unwrap();
        assert_eq!(first.rect.bottom, second.rect.top - 5.0);
    }

    #[test]
    fn test_empty_document_is_empty_result() {
        let seg = Segmenter::default()
            .segment(&ExtractedDocument::new())
            .unwrap();
        assert!(seg.is_empty());
        assert!(seg.regions.is_empty());
    }

    #[test]
    fn test_only_front_matter_is_empty_result() {
        let mut doc = ExtractedDocument::new();
        let mut cover = PageContent::letter(0);
        add_line(&mut cover, "1. What is X?", 100.0);
        doc.add_page(cover);

        let seg = Segmenter::default().segment(&doc).unwrap();
        assert!(seg.is_empty());
    }

    #[test]
    fn test_trace_reports_every_line() {
        let doc = two_question_doc();
        let traced = Segmenter::default().trace(&doc);
        assert_eq!(traced.len(), 10);
        assert!(traced[0].class.is_new_question());
        assert!(matches!(traced[1].class, LineClass::Choice { weight: 1 }));
    }

    #[test]
    fn test_strict_mode_fails_on_unresolvable_question() {
        let mut doc = ExtractedDocument::new();
        doc.add_page(PageContent::letter(0));
        let mut page = PageContent::letter(1);
        add_line(&mut page, "1. What is X?", 100.0);
        add_line(&mut page, "2. What is Y?", 104.0);
        doc.add_page(page);

        let options = SegmentOptions::new().with_line_tolerance(1.0);
        let lenient = Segmenter::new(options.clone()).segment(&doc).unwrap();
        assert_eq!(lenient.regions.len(), 1);
        assert_eq!(lenient.failures.len(), 1);
        assert!(matches!(
            lenient.failures[0].error,
            CropError::InvalidRect { .. }
        ));

        let strict = Segmenter::new(options.strict()).segment(&doc);
        assert!(matches!(strict, Err(Error::Crop { number: 1, .. })));
    }

    #[test]
    fn test_page_selection_past_end_is_rejected() {
        let doc = two_question_doc();
        let options = SegmentOptions::new().with_pages(PageSelection::Range(1..=4));
        let result = Segmenter::new(options).segment(&doc);
        assert!(matches!(result, Err(Error::PageOutOfRange(4, 2))));
    }

    #[test]
    fn test_page_selection_limits_scan() {
        let doc = two_question_doc();
        let options = SegmentOptions::new()
            .with_front_matter(0)
            .with_pages(PageSelection::Pages(vec![0]));
        let questions = Segmenter::new(options).detect(&doc);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].page, 0);
    }
}
