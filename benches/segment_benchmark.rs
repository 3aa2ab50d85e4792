//! Benchmarks for mcqsplit segmentation performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks segment synthetic exam papers built in memory.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use mcqsplit::parser::{numbering, option_row, LineAssembler};
use mcqsplit::{BBox, ExtractedDocument, PageContent, SegmentOptions, Segmenter, Token};

/// Creates a synthetic paper: a cover page and five questions per page,
/// each with a body line and four option lines.
fn create_test_paper(questions: u32) -> ExtractedDocument {
    let mut doc = ExtractedDocument::new().with_source("bench.pdf");
    doc.add_page(PageContent::letter(0));

    let mut page = PageContent::letter(1);
    let mut top = 60.0;
    for number in 1..=questions {
        if number > 1 && (number - 1) % 5 == 0 {
            let next = page.index + 1;
            doc.add_page(std::mem::replace(&mut page, PageContent::letter(next)));
            top = 60.0;
        }
        let lines = [
            format!("{}. Which statement about sample {} is correct?", number, number),
            "Read the passage before answering".to_string(),
            "A) first".to_string(),
            "B) second".to_string(),
            "C) third".to_string(),
            "D) fourth".to_string(),
        ];
        for line in &lines {
            let mut x = 50.0;
            for word in line.split_whitespace() {
                let width = 6.0 * word.len() as f32;
                page.add_token(Token::new(
                    word,
                    BBox::new(x, top, x + width, top + 12.0),
                    "Times-Roman",
                    12.0,
                    page.index,
                ));
                x += width + 4.0;
            }
            top += 20.0;
        }
        top += 20.0;
    }
    doc.add_page(page);
    doc
}

/// Benchmark the per-line pattern tests.
fn bench_patterns(c: &mut Criterion) {
    c.bench_function("numbering", |b| {
        b.iter(|| numbering(black_box("42. Which of the following is true?")));
    });

    c.bench_function("option_row", |b| {
        b.iter(|| option_row(black_box("A) alpha B) beta C) gamma D) delta")));
    });
}

/// Benchmark line assembly on a full page.
fn bench_line_assembly(c: &mut Criterion) {
    let doc = create_test_paper(5);
    let page = doc.page(1).map(|p| p.tokens.clone()).unwrap_or_default();

    c.bench_function("line_assembly_page", |b| {
        b.iter(|| LineAssembler::new(1, black_box(&page)).count());
    });
}

/// Benchmark full segmentation at various sizes.
fn bench_segmentation(c: &mut Criterion) {
    let mut group = c.benchmark_group("segmentation");

    for question_count in [10, 50, 200].iter() {
        let doc = create_test_paper(*question_count);
        let segmenter = Segmenter::new(SegmentOptions::default());

        group.bench_function(format!("{}_questions", question_count), |b| {
            b.iter(|| segmenter.segment(black_box(&doc)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_patterns,
    bench_line_assembly,
    bench_segmentation,
);
criterion_main!(benches);
