//! Question records produced by segmentation.

use super::{BBox, Token};
use serde::{Deserialize, Serialize};

/// What a content item carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Payload {
    /// A text line
    Text(String),
    /// An embedded image
    Image,
}

impl Payload {
    /// Check if this payload is an image.
    pub fn is_image(&self) -> bool {
        matches!(self, Payload::Image)
    }

    /// Get the text if this is a text payload.
    pub fn text(&self) -> Option<&str> {
        match self {
            Payload::Text(s) => Some(s),
            Payload::Image => None,
        }
    }
}

/// One piece of a question's content, in reading order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Page index the item sits on
    pub page: u32,
    /// Bounding box on that page
    pub bbox: BBox,
    /// Line text or image marker
    pub payload: Payload,
}

impl ContentItem {
    /// Create a text item.
    pub fn text(page: u32, bbox: BBox, text: impl Into<String>) -> Self {
        Self {
            page,
            bbox,
            payload: Payload::Text(text.into()),
        }
    }

    /// Create an image item.
    pub fn image(page: u32, bbox: BBox) -> Self {
        Self {
            page,
            bbox,
            payload: Payload::Image,
        }
    }
}

/// A detected question: heading position plus everything captured after it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// Question number (1-based, contiguous)
    pub number: u32,
    /// Page index of the heading line
    pub page: u32,
    /// Heading line bounds, fixed at creation
    pub start_bbox: BBox,
    /// Running union of every appended bbox
    pub end_bbox: BBox,
    /// Content items in reading order, heading first
    pub content: Vec<ContentItem>,
}

impl QuestionRecord {
    /// Start a record from its heading line.
    pub fn new(number: u32, page: u32, bbox: BBox, heading: impl Into<String>) -> Self {
        Self {
            number,
            page,
            start_bbox: bbox,
            end_bbox: bbox,
            content: vec![ContentItem::text(page, bbox, heading)],
        }
    }

    /// Append a content item and grow `end_bbox` over it.
    pub fn push(&mut self, item: ContentItem) {
        self.end_bbox.extend(&item.bbox);
        self.content.push(item);
    }

    /// Heading text (first content item).
    pub fn heading(&self) -> Option<&str> {
        self.content.first().and_then(|item| item.payload.text())
    }

    /// Number of image items.
    pub fn image_count(&self) -> usize {
        self.content.iter().filter(|c| c.payload.is_image()).count()
    }

    /// Pages this question's content touches, ascending and deduplicated.
    pub fn pages(&self) -> Vec<u32> {
        let mut pages: Vec<u32> = self.content.iter().map(|c| c.page).collect();
        pages.sort_unstable();
        pages.dedup();
        pages
    }
}

/// Font signature of the first recognized heading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceFormatting {
    pub fontname: String,
    pub size: f32,
}

impl ReferenceFormatting {
    /// Capture the signature from a token.
    pub fn from_token(token: &Token) -> Self {
        Self {
            fontname: token.fontname.clone(),
            size: token.size,
        }
    }

    /// Same font name and a size within `tolerance`.
    pub fn matches(&self, token: &Token, tolerance: f32) -> bool {
        self.fontname == token.fontname && (self.size - token.size).abs() <= tolerance
    }
}
