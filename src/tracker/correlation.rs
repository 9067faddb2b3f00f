//! Template tracker driven by normalized cross-correlation.

use ndarray::{Array2, ArrayView2, Zip, s};
use serde::{Deserialize, Serialize};

use crate::frame::Frame;
use crate::tracker::kind::{TrackerError, VisualTracker};
use crate::tracker::rect::BoundingBox;

/// Smallest template side the tracker accepts.
const MIN_TEMPLATE_SIDE: i32 = 4;

/// Tunables for [`CorrelationTracker`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrelationParams {
    /// Search window margin as a fraction of the box's long side.
    pub search_margin: f32,
    /// Correlation score a match needs to count as a successful update.
    pub min_score: f32,
    /// Weight of the newest appearance when blending the template.
    pub learning_rate: f32,
    /// Long side of the template at the coarse search level.
    pub coarse_side: usize,
}

impl Default for CorrelationParams {
    fn default() -> Self {
        Self {
            search_margin: 0.5,
            min_score: 0.5,
            learning_rate: 0.1,
            coarse_side: 32,
        }
    }
}

#[derive(Debug, Clone)]
struct Model {
    bbox: BoundingBox,
    scale: usize,
    fine: Array2<f32>,
    coarse: Array2<f32>,
}

/// Result of a correlation search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Match {
    pub bbox: BoundingBox,
    pub score: f32,
}

/// Appearance tracker for a single region.
///
/// The template is searched for around its last position, first on a
/// block-averaged copy of the frame and then at full resolution around the
/// coarse optimum.
#[derive(Debug, Clone, Default)]
pub struct CorrelationTracker {
    params: CorrelationParams,
    model: Option<Model>,
    last_score: Option<f32>,
}

impl CorrelationTracker {
    pub fn new(params: CorrelationParams) -> Self {
        Self {
            params,
            model: None,
            last_score: None,
        }
    }

    pub fn params(&self) -> &CorrelationParams {
        &self.params
    }

    /// Current region, if initialized.
    pub fn bbox(&self) -> Option<BoundingBox> {
        self.model.as_ref().map(|m| m.bbox)
    }

    /// Score of the most recent search.
    pub fn last_score(&self) -> Option<f32> {
        self.last_score
    }

    /// Search with the window centred on `prior` instead of the last match.
    ///
    /// On success the template is blended with the matched appearance.
    pub fn update_near(&mut self, frame: &Frame, prior: BoundingBox) -> Option<BoundingBox> {
        let found = self.search(frame, prior)?;
        self.last_score = Some(found.score);
        if found.score < self.params.min_score {
            return None;
        }
        let lr = self.params.learning_rate.clamp(0.0, 1.0);
        let model = self.model.as_mut()?;
        let (th, tw) = model.fine.dim();
        let patch = sample_region(frame.luma(), found.bbox.x, found.bbox.y, tw, th, 1);
        model.fine = &model.fine * (1.0 - lr) + &patch * lr;
        model.coarse = block_average(model.fine.view(), model.scale);
        model.bbox = found.bbox;
        Some(found.bbox)
    }

    /// Best match of the template around `prior`, without touching the model.
    pub fn search(&self, frame: &Frame, prior: BoundingBox) -> Option<Match> {
        let model = self.model.as_ref()?;
        let luma = frame.luma();
        let (th, tw) = model.fine.dim();
        let scale = model.scale;

        let margin = (self.params.search_margin.max(0.0) * tw.max(th) as f32).ceil() as usize;
        let steps = margin.div_ceil(scale).max(1);
        let (ch, cw) = model.coarse.dim();
        let reach = (steps * scale) as i32;

        let region = sample_region(
            luma,
            prior.x - reach,
            prior.y - reach,
            cw + 2 * steps,
            ch + 2 * steps,
            scale,
        );
        let (di, dj, coarse_score) = best_offset(model.coarse.view(), region.view())?;
        let cx = prior.x - reach + (dj * scale) as i32;
        let cy = prior.y - reach + (di * scale) as i32;

        let (x, y, score) = if scale == 1 {
            (cx, cy, coarse_score)
        } else {
            let r = scale as i32;
            let region = sample_region(luma, cx - r, cy - r, tw + 2 * scale, th + 2 * scale, 1);
            let (di, dj, score) = best_offset(model.fine.view(), region.view())?;
            (cx - r + dj as i32, cy - r + di as i32, score)
        };

        let bbox = BoundingBox::new(x, y, tw as i32, th as i32);
        bbox.clipped(frame.width(), frame.height())?;
        Some(Match { bbox, score })
    }
}

impl VisualTracker for CorrelationTracker {
    fn init(&mut self, frame: &Frame, bbox: BoundingBox) -> Result<(), TrackerError> {
        let region = bbox
            .clipped(frame.width(), frame.height())
            .filter(|b| b.width >= MIN_TEMPLATE_SIDE && b.height >= MIN_TEMPLATE_SIDE)
            .ok_or(TrackerError::InvalidRegion {
                bbox,
                width: frame.width(),
                height: frame.height(),
            })?;

        let (w, h) = (region.width as usize, region.height as usize);
        let fine = frame
            .luma()
            .slice(s![
                region.y as usize..region.y as usize + h,
                region.x as usize..region.x as usize + w
            ])
            .to_owned();
        if variance(fine.view()) < 1e-3 {
            return Err(TrackerError::Featureless(region));
        }

        let scale = w.max(h).div_ceil(self.params.coarse_side.max(2)).max(1);
        let coarse = block_average(fine.view(), scale);
        self.model = Some(Model {
            bbox: region,
            scale,
            fine,
            coarse,
        });
        self.last_score = None;
        Ok(())
    }

    fn update(&mut self, frame: &Frame) -> Option<BoundingBox> {
        let prior = self.model.as_ref()?.bbox;
        self.update_near(frame, prior)
    }
}

/// Slide `template` over `region`; returns `(row, col, score)` of the best
/// normalized cross-correlation.
fn best_offset(template: ArrayView2<'_, f32>, region: ArrayView2<'_, f32>) -> Option<(usize, usize, f32)> {
    let (th, tw) = template.dim();
    let (rh, rw) = region.dim();
    if th == 0 || tw == 0 || rh < th || rw < tw {
        return None;
    }

    let t_mean = template.mean()?;
    let centered = template.mapv(|v| v - t_mean);
    let t_norm = centered.iter().map(|v| v * v).sum::<f32>().sqrt();
    if t_norm <= f32::EPSILON {
        return None;
    }

    let mut best: Option<(usize, usize, f32)> = None;
    for i in 0..=rh - th {
        for j in 0..=rw - tw {
            let window = region.slice(s![i..i + th, j..j + tw]);
            let score = ncc(centered.view(), t_norm, window);
            if best.is_none_or(|(_, _, b)| score > b) {
                best = Some((i, j, score));
            }
        }
    }
    best
}

/// Correlation of a zero-mean template against a raw window.
fn ncc(centered: ArrayView2<'_, f32>, t_norm: f32, window: ArrayView2<'_, f32>) -> f32 {
    let Some(w_mean) = window.mean() else {
        return 0.0;
    };
    let mut dot = 0.0f32;
    let mut w_sq = 0.0f32;
    Zip::from(centered).and(window).for_each(|&t, &w| {
        let dw = w - w_mean;
        dot += t * dw;
        w_sq += dw * dw;
    });
    if w_sq <= f32::EPSILON {
        return 0.0;
    }
    dot / (t_norm * w_sq.sqrt())
}

fn variance(values: ArrayView2<'_, f32>) -> f32 {
    values.var(0.0)
}

/// Block-average `h x w` cells of `scale x scale` pixels starting at
/// `(x0, y0)`. Pixels outside the frame repeat the nearest edge.
fn sample_region(
    luma: ArrayView2<'_, f32>,
    x0: i32,
    y0: i32,
    w: usize,
    h: usize,
    scale: usize,
) -> Array2<f32> {
    let (rows, cols) = luma.dim();
    if rows == 0 || cols == 0 {
        return Array2::zeros((h, w));
    }
    let clamp_x = |x: i64| x.clamp(0, cols as i64 - 1) as usize;
    let clamp_y = |y: i64| y.clamp(0, rows as i64 - 1) as usize;
    let norm = (scale * scale) as f32;

    Array2::from_shape_fn((h, w), |(r, c)| {
        let mut acc = 0.0;
        for dy in 0..scale {
            let y = clamp_y(y0 as i64 + (r * scale + dy) as i64);
            for dx in 0..scale {
                let x = clamp_x(x0 as i64 + (c * scale + dx) as i64);
                acc += luma[[y, x]];
            }
        }
        acc / norm
    })
}

/// Downsample by averaging `scale x scale` blocks; partial blocks at the
/// right and bottom edges are dropped.
fn block_average(values: ArrayView2<'_, f32>, scale: usize) -> Array2<f32> {
    if scale <= 1 {
        return values.to_owned();
    }
    let (h, w) = values.dim();
    let (bh, bw) = ((h / scale).max(1), (w / scale).max(1));
    Array2::from_shape_fn((bh, bw), |(r, c)| {
        let y1 = (r * scale).min(h);
        let x1 = (c * scale).min(w);
        let block = values.slice(s![y1..(y1 + scale).min(h), x1..(x1 + scale).min(w)]);
        block.mean().unwrap_or(0.0)
    })
}
