use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in integer pixel coordinates.
///
/// Stored in TLWH order: top-left x, top-left y, width, height. Conversions
/// cover the other layouts the trackers work with:
/// - TLBR: Top-Left X, Top-Left Y, Bottom-Right X, Bottom-Right Y
/// - XYAH: Center X, Center Y, Aspect Ratio (w/h), Height
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Top-left x coordinate
    pub x: i32,
    /// Top-left y coordinate
    pub y: i32,
    /// Width of the bounding box
    pub width: i32,
    /// Height of the bounding box
    pub height: i32,
}

impl BoundingBox {
    /// Create a new box from top-left coordinates and dimensions (TLWH format).
    #[inline]
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Box spanned by a marker's top-left and bottom-right corners.
    ///
    /// Coordinates are truncated toward zero before the extent is taken, so
    /// `(x, y)` is exactly the integer part of the top-left corner. A rotated
    /// marker can produce a negative extent; see [`BoundingBox::normalized`].
    #[inline]
    pub fn from_corners(top_left: Point2<f32>, bottom_right: Point2<f32>) -> Self {
        let (x, y) = (top_left.x as i32, top_left.y as i32);
        Self {
            x,
            y,
            width: bottom_right.x as i32 - x,
            height: bottom_right.y as i32 - y,
        }
    }

    /// Create a box from TLBR format (top-left x, top-left y, bottom-right x, bottom-right y).
    #[inline]
    pub fn from_tlbr(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            x: x1,
            y: y1,
            width: x2 - x1,
            height: y2 - y1,
        }
    }

    /// Create a box from XYAH format, rounding to the nearest pixel.
    #[inline]
    pub fn from_xyah(cx: f32, cy: f32, aspect_ratio: f32, height: f32) -> Self {
        let width = aspect_ratio * height;
        Self {
            x: (cx - width / 2.0).round() as i32,
            y: (cy - height / 2.0).round() as i32,
            width: width.round() as i32,
            height: height.round() as i32,
        }
    }

    /// Convert to TLBR format: (x1, y1, x2, y2).
    #[inline]
    pub fn to_tlbr(&self) -> [i32; 4] {
        [self.x, self.y, self.x + self.width, self.y + self.height]
    }

    /// Convert to TLWH format: (x, y, width, height).
    #[inline]
    pub fn to_tlwh(&self) -> [i32; 4] {
        [self.x, self.y, self.width, self.height]
    }

    /// Convert to XYAH format: (center_x, center_y, aspect_ratio, height).
    #[inline]
    pub fn to_xyah(&self) -> [f32; 4] {
        let (cx, cy) = self.center();
        let aspect_ratio = if self.height > 0 {
            self.width as f32 / self.height as f32
        } else {
            0.0
        };
        [cx, cy, aspect_ratio, self.height as f32]
    }

    /// Get the center point of the bounding box.
    #[inline]
    pub fn center(&self) -> (f32, f32) {
        (
            self.x as f32 + self.width as f32 / 2.0,
            self.y as f32 + self.height as f32 / 2.0,
        )
    }

    /// Get the area of the bounding box.
    #[inline]
    pub fn area(&self) -> i64 {
        self.width as i64 * self.height as i64
    }

    /// True when the box covers no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Same region with non-negative width and height.
    pub fn normalized(&self) -> Self {
        let [x1, y1, x2, y2] = self.to_tlbr();
        Self::from_tlbr(x1.min(x2), y1.min(y2), x1.max(x2), y1.max(y2))
    }

    /// Box moved by `(dx, dy)`.
    #[inline]
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Part of the box inside a `width` x `height` image, if any.
    pub fn clipped(&self, width: u32, height: u32) -> Option<Self> {
        let [x1, y1, x2, y2] = self.normalized().to_tlbr();
        let x1 = x1.max(0);
        let y1 = y1.max(0);
        let x2 = x2.min(width as i32);
        let y2 = y2.min(height as i32);
        let clipped = Self::from_tlbr(x1, y1, x2, y2);
        (!clipped.is_empty()).then_some(clipped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_conversions() {
        let bbox = BoundingBox::new(10, 20, 30, 40);

        assert_eq!(bbox.to_tlwh(), [10, 20, 30, 40]);
        assert_eq!(bbox.to_tlbr(), [10, 20, 40, 60]);

        let xyah = bbox.to_xyah();
        assert_eq!(xyah[0], 25.0); // cx
        assert_eq!(xyah[1], 40.0); // cy
        assert!((xyah[2] - 0.75).abs() < 1e-6); // aspect ratio = 30/40
        assert_eq!(xyah[3], 40.0); // height
    }

    #[test]
    fn test_from_tlbr() {
        let bbox = BoundingBox::from_tlbr(10, 20, 40, 60);
        assert_eq!(bbox.to_tlwh(), [10, 20, 30, 40]);
    }

    #[test]
    fn test_from_xyah() {
        let bbox = BoundingBox::from_xyah(25.0, 40.0, 0.75, 40.0);
        assert_eq!(bbox, BoundingBox::new(10, 20, 30, 40));
    }

    #[test]
    fn test_from_corners_truncates() {
        let bbox = BoundingBox::from_corners(Point2::new(10.9, 10.2), Point2::new(50.7, 50.0));
        assert_eq!(bbox, BoundingBox::new(10, 10, 40, 40));
    }

    #[test]
    fn test_normalized_flips_negative_extent() {
        let bbox = BoundingBox::new(50, 50, -40, -40);
        assert!(bbox.is_empty());
        assert_eq!(bbox.normalized(), BoundingBox::new(10, 10, 40, 40));
    }

    #[test]
    fn test_clipped() {
        let bbox = BoundingBox::new(-5, 90, 20, 20);
        assert_eq!(bbox.clipped(100, 100), Some(BoundingBox::new(0, 90, 15, 10)));
        assert_eq!(BoundingBox::new(200, 0, 5, 5).clipped(100, 100), None);
    }
}
