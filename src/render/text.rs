//! Plain text summary of a segmentation result.

use std::fmt::Write;

use crate::error::Result;
use crate::parser::Segmentation;

/// Longest heading excerpt shown per question.
const HEADING_EXCERPT: usize = 60;

/// Render a human-readable summary: one line per question with its crop,
/// followed by any failures.
pub fn to_text(seg: &Segmentation) -> Result<String> {
    let mut output = String::new();

    if let Some(source) = &seg.source {
        writeln!(output, "Source: {}", source).ok();
    }
    writeln!(
        output,
        "Questions: {}  Regions: {}  Failures: {}",
        seg.question_count(),
        seg.regions.len(),
        seg.failures.len()
    )
    .ok();

    for question in &seg.questions {
        let heading = excerpt(question.heading().unwrap_or_default());
        match seg.region(question.number) {
            Some(region) => {
                let r = region.rect;
                writeln!(
                    output,
                    "Q{:<4} page {:<3} [{:.1}, {:.1}, {:.1}, {:.1}]  {}",
                    question.number, region.page, r.x0, r.top, r.x1, r.bottom, heading
                )
                .ok();
            }
            None => {
                writeln!(
                    output,
                    "Q{:<4} page {:<3} (no crop)  {}",
                    question.number, question.page, heading
                )
                .ok();
            }
        }
    }

    if !seg.failures.is_empty() {
        writeln!(output).ok();
        writeln!(output, "Failures:").ok();
        for failure in &seg.failures {
            writeln!(
                output,
                "  Q{} (page {}): {}",
                failure.number, failure.page, failure.error
            )
            .ok();
        }
    }

    Ok(output.trim_end().to_string())
}

fn excerpt(text: &str) -> String {
    if text.chars().count() <= HEADING_EXCERPT {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(HEADING_EXCERPT).collect();
    cut.push_str("...");
    cut
}
