//! Marker detection backends.

use nalgebra::Point2;
use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};

use super::dictionary::{MarkerDictionary, TagDictionary};
use super::homography::Homography;
use super::quad::{self, QuadCandidate};
use crate::frame::Frame;
use crate::tracker::BoundingBox;

/// Errors raised by a marker detector.
#[derive(thiserror::Error, Debug)]
pub enum DetectError {
    #[error("frame {width}x{height} has no pixels")]
    EmptyFrame { width: u32, height: u32 },
}

/// A decoded marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerDetection {
    /// Dictionary index of the marker.
    pub id: u32,
    /// Top-left, top-right, bottom-right, bottom-left in the marker's own
    /// orientation.
    pub corners: [Point2<f32>; 4],
    /// Bit errors corrected while decoding.
    pub hamming: u32,
}

impl MarkerDetection {
    pub fn new(id: u32, corners: [Point2<f32>; 4]) -> Self {
        Self {
            id,
            corners,
            hamming: 0,
        }
    }

    pub fn top_left(&self) -> Point2<f32> {
        self.corners[0]
    }

    pub fn bottom_right(&self) -> Point2<f32> {
        self.corners[2]
    }

    /// Box spanned by the top-left and bottom-right corners.
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_corners(self.top_left(), self.bottom_right())
    }

    /// Midpoint of the top-left/bottom-right diagonal.
    pub fn center(&self) -> Point2<f32> {
        nalgebra::center(&self.corners[0], &self.corners[2])
    }
}

/// Output of one detector pass.
#[derive(Debug, Clone, Default)]
pub struct MarkerScan {
    pub markers: Vec<MarkerDetection>,
    /// Quads that looked like markers but did not decode.
    pub rejected: Vec<[Point2<f32>; 4]>,
}

/// Trait for marker detection backends.
///
/// Implement this trait to plug a different detector into the frame loop.
///
/// # Example
///
/// ```ignore
/// use tagtrack_rs::{DetectError, Frame, MarkerDetector, MarkerScan};
///
/// struct NoMarkers;
///
/// impl MarkerDetector for NoMarkers {
///     type Error = DetectError;
///
///     fn detect(&mut self, _frame: &Frame) -> Result<MarkerScan, Self::Error> {
///         Ok(MarkerScan::default())
///     }
///
///     fn name(&self) -> &str {
///         "none"
///     }
/// }
/// ```
pub trait MarkerDetector {
    /// Error type for detection failures.
    type Error;

    /// Find markers in a frame.
    fn detect(&mut self, frame: &Frame) -> Result<MarkerScan, Self::Error>;

    /// Name shown in the overlay while detections drive the boxes.
    fn name(&self) -> &str;
}

/// Tunables for [`AprilTagDetector`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorParams {
    /// Half-size of the adaptive threshold window.
    pub threshold_radius: u32,
    /// How much darker than the local mean a pixel must be.
    pub threshold_offset: i32,
    pub min_component_pixels: usize,
    /// Minimum quad side in pixels.
    pub min_side: f64,
    pub max_hamming: u32,
    /// Minimum grey-level difference between quiet zone and border.
    pub min_contrast: f32,
}

impl Default for DetectorParams {
    fn default() -> Self {
        Self {
            threshold_radius: 7,
            threshold_offset: 7,
            min_component_pixels: 48,
            min_side: 8.0,
            max_hamming: 2,
            min_contrast: 20.0,
        }
    }
}

/// AprilTag quad detector and decoder.
#[derive(Debug, Clone)]
pub struct AprilTagDetector {
    dictionary: MarkerDictionary,
    params: DetectorParams,
}

impl AprilTagDetector {
    pub fn new(dictionary: MarkerDictionary, params: DetectorParams) -> Self {
        Self { dictionary, params }
    }

    pub fn with_default_params(dictionary: MarkerDictionary) -> Self {
        Self::new(dictionary, DetectorParams::default())
    }

    pub fn dictionary(&self) -> MarkerDictionary {
        self.dictionary
    }

    pub fn params(&self) -> &DetectorParams {
        &self.params
    }

    fn decode_quad(
        &self,
        luma: ArrayView2<'_, f32>,
        quad: &QuadCandidate,
    ) -> Option<MarkerDetection> {
        let dict = self.dictionary.dictionary();
        let canonical = [
            Point2::new(-1.0, -1.0),
            Point2::new(1.0, -1.0),
            Point2::new(1.0, 1.0),
            Point2::new(-1.0, 1.0),
        ];
        let h = Homography::from_correspondences(&canonical, &quad.corners)?;
        let cells = CellSampler::new(&h, luma, dict);

        let border_mean = mean(&cells.border)?;
        let quiet_mean = mean(&cells.quiet)?;
        if quiet_mean - border_mean < self.params.min_contrast {
            return None;
        }
        let threshold = 0.5 * (border_mean + quiet_mean);

        let bright_border = cells.border.iter().filter(|&&v| v >= threshold).count();
        if bright_border * 10 > cells.border.len() {
            return None;
        }

        let bits = cells
            .data
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v >= threshold)
            .fold(0u64, |acc, (i, _)| acc | (1 << i));

        let decoded = dict.decode(bits, self.params.max_hamming)?;
        let k = decoded.rotation as usize;
        let corners = std::array::from_fn(|i| {
            let p = quad.corners[(i + 4 - k) % 4];
            Point2::new(p.x as f32, p.y as f32)
        });

        Some(MarkerDetection {
            id: decoded.id,
            corners,
            hamming: decoded.hamming,
        })
    }
}

impl MarkerDetector for AprilTagDetector {
    type Error = DetectError;

    fn detect(&mut self, frame: &Frame) -> Result<MarkerScan, Self::Error> {
        let (width, height) = (frame.width(), frame.height());
        if width == 0 || height == 0 {
            return Err(DetectError::EmptyFrame { width, height });
        }
        let min_extent = (self.dictionary.dictionary().dimension() as u32 + 4) * 2;
        if width < min_extent || height < min_extent {
            log::debug!("frame {width}x{height} is too small to hold a marker");
            return Ok(MarkerScan::default());
        }

        let gray = frame.gray();
        let mask = quad::dark_mask(
            &gray,
            self.params.threshold_radius,
            self.params.threshold_offset,
        );
        let quads = quad::find_quads(
            &mask,
            self.params.min_component_pixels,
            self.params.min_side,
        );

        let mut scan = MarkerScan::default();
        for quad in &quads {
            match self.decode_quad(frame.luma(), quad) {
                Some(marker) => scan.markers.push(marker),
                None => scan
                    .rejected
                    .push(quad.corners.map(|p| Point2::new(p.x as f32, p.y as f32))),
            }
        }
        log::trace!(
            "{} quads, {} markers, {} rejected",
            quads.len(),
            scan.markers.len(),
            scan.rejected.len()
        );
        Ok(scan)
    }

    fn name(&self) -> &str {
        self.dictionary.name()
    }
}

/// Grey levels sampled at cell centres of the marker grid.
struct CellSampler {
    border: Vec<f32>,
    quiet: Vec<f32>,
    /// Row-major data cells.
    data: Vec<f32>,
}

impl CellSampler {
    fn new(h: &Homography, luma: ArrayView2<'_, f32>, dict: &TagDictionary) -> Self {
        let dim = dict.dimension() as i64;
        let grid = dim + 2;
        let cell = 2.0 / grid as f64;
        let sample = |gx: i64, gy: i64| -> f32 {
            // Average a 3x3 pattern inside the cell.
            let cx = -1.0 + (gx as f64 + 0.5) * cell;
            let cy = -1.0 + (gy as f64 + 0.5) * cell;
            let mut acc = 0.0;
            let mut n = 0;
            for oy in [-0.25, 0.0, 0.25] {
                for ox in [-0.25, 0.0, 0.25] {
                    let p = Point2::new(cx + ox * cell, cy + oy * cell);
                    if let Some(q) = h.project(p) {
                        acc += bilinear(luma, q.x, q.y);
                        n += 1;
                    }
                }
            }
            if n == 0 { 0.0 } else { acc / n as f32 }
        };

        let mut border = Vec::new();
        let mut quiet = Vec::new();
        for i in -1..=grid {
            for j in [-1, grid] {
                quiet.push(sample(i, j));
                if (0..grid).contains(&i) {
                    quiet.push(sample(j, i));
                }
            }
        }
        for i in 0..grid {
            for j in [0, grid - 1] {
                border.push(sample(i, j));
                if (1..grid - 1).contains(&i) {
                    border.push(sample(j, i));
                }
            }
        }
        let data = (0..dim)
            .flat_map(|y| (0..dim).map(move |x| (x, y)))
            .map(|(x, y)| sample(x + 1, y + 1))
            .collect();

        Self {
            border,
            quiet,
            data,
        }
    }
}

fn mean(values: &[f32]) -> Option<f32> {
    (!values.is_empty()).then(|| values.iter().sum::<f32>() / values.len() as f32)
}

/// Bilinear interpolation in pixel-centre coordinates, clamped at the edges.
fn bilinear(luma: ArrayView2<'_, f32>, x: f64, y: f64) -> f32 {
    let (rows, cols) = luma.dim();
    if rows == 0 || cols == 0 {
        return 0.0;
    }
    let fx = (x - 0.5).clamp(0.0, (cols - 1) as f64);
    let fy = (y - 0.5).clamp(0.0, (rows - 1) as f64);
    let x0 = fx.floor() as usize;
    let y0 = fy.floor() as usize;
    let x1 = (x0 + 1).min(cols - 1);
    let y1 = (y0 + 1).min(rows - 1);
    let ax = (fx - x0 as f64) as f32;
    let ay = (fy - y0 as f64) as f32;

    let top = luma[[y0, x0]] * (1.0 - ax) + luma[[y0, x1]] * ax;
    let bottom = luma[[y1, x0]] * (1.0 - ax) + luma[[y1, x1]] * ax;
    top * (1.0 - ay) + bottom * ay
}
