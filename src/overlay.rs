//! Drawing detections, tracked boxes and status labels onto frames.

use std::fs;
use std::path::Path;

use ab_glyph::{FontArc, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_hollow_rect_mut, draw_line_segment_mut, draw_text_mut,
};
use imageproc::rect::Rect;
use log::warn;
use nalgebra::Point2;

use crate::display::DisplayError;
use crate::integration::{BoxSource, FrameOutcome};
use crate::marker::MarkerDetection;
use crate::tracker::BoundingBox;

const BLUE: Rgb<u8> = Rgb([0, 0, 255]);
const GREEN: Rgb<u8> = Rgb([0, 255, 0]);
const RED: Rgb<u8> = Rgb([255, 0, 0]);
const YELLOW: Rgb<u8> = Rgb([255, 255, 0]);

/// Edge colours, starting with top-left to top-right.
const EDGE_COLORS: [Rgb<u8>; 4] = [BLUE, GREEN, RED, YELLOW];

const ID_SCALE: f32 = 16.0;
const LABEL_SCALE: f32 = 20.0;
const LABEL_SPACING: i32 = 20;

/// DejaVu Sans, used when no other font is given.
const BUNDLED_FONT: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

/// Draws the frame annotations.
///
/// Text is set in the bundled DejaVu Sans unless another font is loaded.
pub struct Overlay {
    font: Option<FontArc>,
}

impl Default for Overlay {
    fn default() -> Self {
        Self::new()
    }
}

impl Overlay {
    pub fn new() -> Self {
        let font = FontArc::try_from_slice(BUNDLED_FONT)
            .inspect_err(|e| warn!("bundled font is unusable, labels are skipped: {e}"))
            .ok();
        Self { font }
    }

    pub fn with_font(font: FontArc) -> Self {
        Self { font: Some(font) }
    }

    /// Geometry only, no text.
    pub fn without_font() -> Self {
        Self { font: None }
    }

    /// Load a `.ttf`/`.otf` file.
    pub fn from_font_file(path: &Path) -> Result<Self, DisplayError> {
        let bytes = fs::read(path)?;
        let font = FontArc::try_from_vec(bytes).map_err(|source| DisplayError::Font {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::with_font(font))
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Everything for one frame: markers or tracked boxes, then labels.
    pub fn annotate(
        &self,
        image: &mut RgbImage,
        markers: &[MarkerDetection],
        outcome: &FrameOutcome,
        labels: &[String],
    ) {
        match outcome.source {
            BoxSource::Detector => markers.iter().for_each(|m| self.draw_marker(image, m)),
            BoxSource::Tracker => outcome.boxes.iter().for_each(|b| draw_box(image, b)),
        }
        self.draw_labels(image, labels);
    }

    /// Outline, top-right dot, centre dot and id.
    pub fn draw_marker(&self, image: &mut RgbImage, marker: &MarkerDetection) {
        for (i, color) in EDGE_COLORS.into_iter().enumerate() {
            let a = marker.corners[i];
            let b = marker.corners[(i + 1) % 4];
            draw_thick_line(image, a, b, color);
        }

        let top_right = marker.corners[1];
        draw_filled_circle_mut(image, rounded(top_right), 6, RED);
        let center = marker.center();
        draw_filled_circle_mut(image, rounded(center), 4, RED);

        let top_left = rounded(marker.top_left());
        self.draw_text(
            image,
            &marker.id.to_string(),
            top_left.0,
            top_left.1 - 15 - ID_SCALE as i32,
            ID_SCALE,
            GREEN,
        );
    }

    /// Status lines stacked upwards from the bottom-left corner.
    pub fn draw_labels(&self, image: &mut RgbImage, labels: &[String]) {
        let height = image.height() as i32;
        for (i, label) in labels.iter().enumerate() {
            let baseline = height - (i as i32 * LABEL_SPACING + LABEL_SPACING);
            self.draw_text(image, label, 10, baseline - LABEL_SCALE as i32, LABEL_SCALE, RED);
        }
    }

    fn draw_text(&self, image: &mut RgbImage, text: &str, x: i32, y: i32, scale: f32, color: Rgb<u8>) {
        if let Some(font) = &self.font {
            draw_text_mut(image, color, x, y, PxScale::from(scale), font, text);
        }
    }
}

/// Green two-pixel rectangle; empty boxes are skipped.
pub fn draw_box(image: &mut RgbImage, bbox: &BoundingBox) {
    let bbox = bbox.normalized();
    for inset in 0..2 {
        let (w, h) = (bbox.width - 2 * inset, bbox.height - 2 * inset);
        if w <= 0 || h <= 0 {
            break;
        }
        let rect = Rect::at(bbox.x + inset, bbox.y + inset).of_size(w as u32, h as u32);
        draw_hollow_rect_mut(image, rect, GREEN);
    }
}

fn draw_thick_line(image: &mut RgbImage, a: Point2<f32>, b: Point2<f32>, color: Rgb<u8>) {
    for (dx, dy) in [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)] {
        draw_line_segment_mut(image, (a.x + dx, a.y + dy), (b.x + dx, b.y + dy), color);
    }
}

fn rounded(p: Point2<f32>) -> (i32, i32) {
    (p.x.round() as i32, p.y.round() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::TrackState;

    fn marker() -> MarkerDetection {
        MarkerDetection::new(
            7,
            [
                Point2::new(10.0, 10.0),
                Point2::new(50.0, 10.0),
                Point2::new(50.0, 50.0),
                Point2::new(10.0, 50.0),
            ],
        )
    }

    #[test]
    fn marker_edges_use_distinct_colours() {
        let mut image = RgbImage::new(80, 80);
        Overlay::new().draw_marker(&mut image, &marker());
        assert_eq!(*image.get_pixel(30, 10), BLUE);
        assert_eq!(*image.get_pixel(50, 30), GREEN);
        assert_eq!(*image.get_pixel(30, 50), RED);
        assert_eq!(*image.get_pixel(10, 30), YELLOW);
        assert_eq!(*image.get_pixel(30, 30), RED);
    }

    #[test]
    fn tracked_boxes_are_green_and_clipped() {
        let mut image = RgbImage::new(40, 40);
        let outcome = FrameOutcome {
            state: TrackState::Tracking,
            source: BoxSource::Tracker,
            boxes: vec![BoundingBox::new(5, 5, 10, 10), BoundingBox::new(30, 30, 50, 50)],
            track_updated: true,
        };
        Overlay::new().annotate(&mut image, &[marker()], &outcome, &[]);
        assert_eq!(*image.get_pixel(5, 5), GREEN);
        assert_eq!(*image.get_pixel(14, 9), GREEN);
        assert_eq!(*image.get_pixel(10, 10), Rgb([0, 0, 0]));
        assert_eq!(*image.get_pixel(30, 35), GREEN);
    }

    #[test]
    fn empty_box_draws_nothing() {
        let mut image = RgbImage::new(20, 20);
        draw_box(&mut image, &BoundingBox::new(4, 4, 0, 6));
        assert!(image.pixels().all(|p| *p == Rgb([0, 0, 0])));
    }

    #[test]
    fn default_overlay_draws_labels_bottom_left() {
        let mut image = RgbImage::new(200, 100);
        let overlay = Overlay::new();
        assert!(overlay.has_font());
        overlay.draw_labels(
            &mut image,
            &["Tracker: kcf".to_string(), "Tracking: Yes".to_string()],
        );

        let reddish = |x0: u32, y0: u32, y1: u32| {
            (y0..y1).any(|y| (x0..200).any(|x| {
                let [r, g, b] = image.get_pixel(x, y).0;
                r > 128 && g == 0 && b == 0
            }))
        };
        // First label sits on the bottom line, the second one above it.
        assert!(reddish(10, 60, 100));
        assert!(reddish(10, 40, 60));
        assert!(!reddish(0, 0, 35));
    }

    #[test]
    fn fontless_overlay_skips_text() {
        let mut image = RgbImage::new(60, 60);
        let overlay = Overlay::without_font();
        assert!(!overlay.has_font());
        overlay.draw_labels(&mut image, &["Tracking: No".to_string()]);
        assert!(image.pixels().all(|p| *p == Rgb([0, 0, 0])));
    }

    #[test]
    fn unreadable_font_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ttf");
        fs::write(&path, b"not a font").unwrap();
        assert!(matches!(
            Overlay::from_font_file(&path),
            Err(DisplayError::Font { .. })
        ));
    }
}
