//! Line assembly: tokens clustered into visual text rows.
//!
//! Tokens are consumed in the order the extractor supplied them. A new line
//! starts whenever a token's top edge drifts more than the tolerance away from
//! the anchor top of the line being built. The anchor is the first token of
//! each line and is never re-averaged.

use crate::model::{BBox, Token};

/// Default vertical tolerance in layout units.
pub const DEFAULT_LINE_TOLERANCE: f32 = 3.0;

/// Tokens sharing a page and a vertical band.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Page index
    pub page: u32,
    /// Tokens in extractor order (never empty)
    pub tokens: Vec<Token>,
}

impl Line {
    /// Token text joined by single spaces.
    pub fn text(&self) -> String {
        self.tokens
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// First token's left/top to last token's right/bottom.
    pub fn bbox(&self) -> BBox {
        match (self.tokens.first(), self.tokens.last()) {
            (Some(first), Some(last)) => BBox::new(
                first.bbox.x0,
                first.bbox.top,
                last.bbox.x1,
                last.bbox.bottom,
            ),
            _ => BBox::new(0.0, 0.0, 0.0, 0.0),
        }
    }

    /// The token whose typography identifies the line.
    pub fn leading_token(&self) -> Option<&Token> {
        self.tokens.first()
    }

    /// A line with nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.tokens.iter().all(|t| t.text.trim().is_empty())
    }
}

/// Lazy line iterator over one page's tokens.
///
/// Holds no state across pages: build a fresh assembler per page.
pub struct LineAssembler<'a> {
    page: u32,
    tokens: std::slice::Iter<'a, Token>,
    tolerance: f32,
    pending: Option<&'a Token>,
}

impl<'a> LineAssembler<'a> {
    /// Assemble lines with the default tolerance.
    pub fn new(page: u32, tokens: &'a [Token]) -> Self {
        Self::with_tolerance(page, tokens, DEFAULT_LINE_TOLERANCE)
    }

    /// Assemble lines with a custom vertical tolerance.
    pub fn with_tolerance(page: u32, tokens: &'a [Token], tolerance: f32) -> Self {
        let mut tokens = tokens.iter();
        let pending = tokens.next();
        Self {
            page,
            tokens,
            tolerance,
            pending,
        }
    }
}

impl Iterator for LineAssembler<'_> {
    type Item = Line;

    fn next(&mut self) -> Option<Line> {
        let anchor = self.pending.take()?;
        let mut line = vec![anchor.clone()];

        for token in self.tokens.by_ref() {
            if (token.top() - anchor.top()).abs() <= self.tolerance {
                line.push(token.clone());
            } else {
                self.pending = Some(token);
                break;
            }
        }

        Some(Line {
            page: self.page,
            tokens: line,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(text: &str, x0: f32, top: f32) -> Token {
        Token::new(
            text,
            BBox::new(x0, top, x0 + 8.0 * text.len() as f32, top + 12.0),
            "Arial",
            12.0,
            1,
        )
    }

    #[test]
    fn test_empty_page_yields_no_lines() {
        let tokens: Vec<Token> = vec![];
        assert_eq!(LineAssembler::new(1, &tokens).count(), 0);
    }

    #[test]
    fn test_groups_by_vertical_band() {
        let tokens = vec![
            token("1.", 50.0, 100.0),
            token("What", 70.0, 101.5),
            token("is", 110.0, 99.0),
            token("X?", 130.0, 102.9),
            token("A)", 60.0, 120.0),
            token("foo", 80.0, 120.0),
        ];

        let lines: Vec<Line> = LineAssembler::new(1, &tokens).collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text(), "1. What is X?");
        assert_eq!(lines[1].text(), "A) foo");
        assert_eq!(lines[1].page, 1);
    }

    #[test]
    fn test_anchor_does_not_drift() {
        // Each token is within 3 of its neighbour but the third is 4 from the anchor.
        let tokens = vec![
            token("a", 0.0, 100.0),
            token("b", 10.0, 102.0),
            token("c", 20.0, 104.0),
        ];

        let lines: Vec<Line> = LineAssembler::new(0, &tokens).collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text(), "a b");
        assert_eq!(lines[1].text(), "c");
    }

    #[test]
    fn test_trailing_line_is_flushed() {
        let tokens = vec![token("only", 0.0, 10.0)];
        let lines: Vec<Line> = LineAssembler::new(0, &tokens).collect();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text(), "only");
    }

    #[test]
    fn test_line_bbox_spans_first_to_last() {
        let tokens = vec![token("1.", 50.0, 100.0), token("Define", 70.0, 101.0)];
        let line = LineAssembler::new(1, &tokens).next().unwrap();
        let bbox = line.bbox();
        assert_eq!(bbox.x0, 50.0);
        assert_eq!(bbox.top, 100.0);
        assert_eq!(bbox.x1, 70.0 + 48.0);
        assert_eq!(bbox.bottom, 113.0);
    }

    #[test]
    fn test_restartable_per_page() {
        let tokens = vec![token("x", 0.0, 0.0), token("y", 0.0, 50.0)];
        let first: Vec<String> = LineAssembler::new(0, &tokens).map(|l| l.text()).collect();
        let second: Vec<String> = LineAssembler::new(0, &tokens).map(|l| l.text()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_blank_line() {
        let tokens = vec![token("  ", 0.0, 0.0)];
        let line = LineAssembler::new(0, &tokens).next().unwrap();
        assert!(line.is_blank());
    }
}
