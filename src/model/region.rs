//! Crop regions handed to the presentation renderer.

use super::BBox;
use serde::{Deserialize, Serialize};

/// Points per inch in PDF layout space.
const POINTS_PER_INCH: f32 = 72.0;

/// Final crop rectangle for one question.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRegion {
    /// Question number
    pub number: u32,
    /// Page index to crop from
    pub page: u32,
    /// Crop rectangle in layout units
    pub rect: BBox,
}

impl CropRegion {
    /// Create a new crop region.
    pub fn new(number: u32, page: u32, rect: BBox) -> Self {
        Self { number, page, rect }
    }

    /// Convert the rectangle to raster pixels at `dpi`.
    ///
    /// Edges are rounded outward so the pixel box never clips the region.
    pub fn to_pixels(&self, dpi: u32) -> PixelRect {
        let scale = dpi as f32 / POINTS_PER_INCH;
        let left = (self.rect.x0 * scale).floor().max(0.0) as u32;
        let top = (self.rect.top * scale).floor().max(0.0) as u32;
        let right = (self.rect.x1 * scale).ceil().max(0.0) as u32;
        let bottom = (self.rect.bottom * scale).ceil().max(0.0) as u32;

        PixelRect {
            x: left,
            y: top,
            width: right.saturating_sub(left),
            height: bottom.saturating_sub(top),
        }
    }
}

/// Rectangle in raster pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_pixels_at_72_dpi_is_identity() {
        let region = CropRegion::new(1, 1, BBox::new(10.0, 20.0, 110.0, 70.0));
        let px = region.to_pixels(72);
        assert_eq!(
            px,
            PixelRect {
                x: 10,
                y: 20,
                width: 100,
                height: 50
            }
        );
    }

    #[test]
    fn test_to_pixels_rounds_outward() {
        let region = CropRegion::new(1, 1, BBox::new(10.2, 20.7, 30.1, 40.3));
        let px = region.to_pixels(200);
        // 10.2 * 200/72 = 28.33 -> 28, 30.1 * 200/72 = 83.6 -> 84
        assert_eq!(px.x, 28);
        assert_eq!(px.width, 84 - 28);
        // 20.7 * 200/72 = 57.5 -> 57, 40.3 * 200/72 = 111.9 -> 112
        assert_eq!(px.y, 57);
        assert_eq!(px.height, 112 - 57);
    }
}
