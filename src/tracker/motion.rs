//! Correlation tracker steered by a constant-velocity Kalman filter.

use ndarray::{Array1, Array2};

use crate::frame::Frame;
use crate::tracker::correlation::{CorrelationParams, CorrelationTracker};
use crate::tracker::kalman_filter::{KalmanFilter, state_box};
use crate::tracker::kind::{TrackerError, VisualTracker};
use crate::tracker::rect::BoundingBox;

/// The Kalman prediction picks where the template is searched for, and each
/// successful match is fed back as a measurement. Reported boxes are the
/// filtered state.
#[derive(Debug, Clone)]
pub struct MotionTracker {
    appearance: CorrelationTracker,
    kalman_filter: KalmanFilter,
    state: Option<(Array1<f64>, Array2<f64>)>,
}

impl MotionTracker {
    pub fn new(params: CorrelationParams) -> Self {
        Self {
            appearance: CorrelationTracker::new(params),
            kalman_filter: KalmanFilter::new(),
            state: None,
        }
    }

    /// Filtered box after the last call.
    pub fn bbox(&self) -> Option<BoundingBox> {
        self.state.as_ref().map(|(mean, _)| state_box(mean))
    }
}

impl Default for MotionTracker {
    fn default() -> Self {
        Self::new(CorrelationParams::default())
    }
}

impl VisualTracker for MotionTracker {
    fn init(&mut self, frame: &Frame, bbox: BoundingBox) -> Result<(), TrackerError> {
        self.appearance.init(frame, bbox)?;
        let region = self.appearance.bbox().unwrap_or(bbox);
        self.state = Some(self.kalman_filter.initiate(&region));
        Ok(())
    }

    fn update(&mut self, frame: &Frame) -> Option<BoundingBox> {
        let (mean, covariance) = self.state.take()?;
        let (mean, covariance) = self.kalman_filter.predict(&mean, &covariance);

        let template = self.appearance.bbox()?;
        let predicted = state_box(&mean);
        let prior = BoundingBox::new(
            predicted.x + (predicted.width - template.width) / 2,
            predicted.y + (predicted.height - template.height) / 2,
            template.width,
            template.height,
        );

        let Some(measured) = self.appearance.update_near(frame, prior) else {
            // Coast on the prediction.
            self.state = Some((mean, covariance));
            return None;
        };

        match self.kalman_filter.update(&mean, &covariance, &measured) {
            Some(corrected) => {
                let bbox = state_box(&corrected.0);
                self.state = Some(corrected);
                Some(bbox)
            }
            None => {
                self.state = Some((mean, covariance));
                None
            }
        }
    }
}
