//! Constant-velocity Kalman filter over bounding boxes, using ndarray and a
//! nalgebra-based 4x4 inverse.
//!
//! State is `(cx, cy, a, h, vx, vy, va, vh)`: box centre, aspect ratio,
//! height and their per-frame velocities.

use ndarray::{Array1, Array2};

use crate::tracker::rect::BoundingBox;

#[derive(Debug, Clone)]
pub struct KalmanFilter {
    motion_mat: Array2<f64>,
    update_mat: Array2<f64>,
    std_weight_position: f64,
    std_weight_velocity: f64,
}

impl Default for KalmanFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl KalmanFilter {
    pub fn new() -> Self {
        let ndim = 4;
        let mut motion_mat = Array2::eye(2 * ndim);
        for i in 0..ndim {
            motion_mat[[i, ndim + i]] = 1.0;
        }

        let mut update_mat = Array2::zeros((ndim, 2 * ndim));
        for i in 0..ndim {
            update_mat[[i, i]] = 1.0;
        }

        Self {
            motion_mat,
            update_mat,
            std_weight_position: 1.0 / 20.0,
            std_weight_velocity: 1.0 / 160.0,
        }
    }

    /// Start a track at rest on `bbox`.
    pub fn initiate(&self, bbox: &BoundingBox) -> (Array1<f64>, Array2<f64>) {
        let measurement = measurement_of(bbox);
        let mut mean = Array1::zeros(8);
        for i in 0..4 {
            mean[i] = measurement[i];
        }

        let h = measurement[3];
        let std = [
            2.0 * self.std_weight_position * h,
            2.0 * self.std_weight_position * h,
            1e-2,
            2.0 * self.std_weight_position * h,
            10.0 * self.std_weight_velocity * h,
            10.0 * self.std_weight_velocity * h,
            1e-5,
            10.0 * self.std_weight_velocity * h,
        ];

        (mean, diagonal(&std))
    }

    pub fn predict(
        &self,
        mean: &Array1<f64>,
        covariance: &Array2<f64>,
    ) -> (Array1<f64>, Array2<f64>) {
        let h = mean[3];
        let std = [
            self.std_weight_position * h,
            self.std_weight_position * h,
            1e-2,
            self.std_weight_position * h,
            self.std_weight_velocity * h,
            self.std_weight_velocity * h,
            1e-5,
            self.std_weight_velocity * h,
        ];

        let new_mean = self.motion_mat.dot(mean);
        let new_covariance =
            self.motion_mat.dot(covariance).dot(&self.motion_mat.t()) + diagonal(&std);

        (new_mean, new_covariance)
    }

    fn project(&self, mean: &Array1<f64>, covariance: &Array2<f64>) -> (Array1<f64>, Array2<f64>) {
        let h = mean[3];
        let std = [
            self.std_weight_position * h,
            self.std_weight_position * h,
            1e-1,
            self.std_weight_position * h,
        ];

        let mean_proj = self.update_mat.dot(mean);
        let covariance_proj =
            self.update_mat.dot(covariance).dot(&self.update_mat.t()) + diagonal(&std);

        (mean_proj, covariance_proj)
    }

    /// Correct the state with a measured box.
    ///
    /// Returns `None` when the innovation covariance is singular.
    pub fn update(
        &self,
        mean: &Array1<f64>,
        covariance: &Array2<f64>,
        bbox: &BoundingBox,
    ) -> Option<(Array1<f64>, Array2<f64>)> {
        let (projected_mean, projected_cov) = self.project(mean, covariance);
        let innovation = Array1::from_vec(measurement_of(bbox).to_vec()) - projected_mean;

        // K = P * H^T * S^-1; H = [I 0] so P * H^T is the first four columns of P.
        let s_inv = invert_4x4(&projected_cov)?;
        let kalman_gain = covariance.dot(&self.update_mat.t()).dot(&s_inv);

        let new_mean = mean + kalman_gain.dot(&innovation);
        let new_covariance = covariance - kalman_gain.dot(&projected_cov).dot(&kalman_gain.t());

        Some((new_mean, new_covariance))
    }
}

/// Box described by the position part of a state vector.
pub fn state_box(mean: &Array1<f64>) -> BoundingBox {
    BoundingBox::from_xyah(mean[0] as f32, mean[1] as f32, mean[2] as f32, mean[3] as f32)
}

fn measurement_of(bbox: &BoundingBox) -> [f64; 4] {
    bbox.to_xyah().map(|v| v as f64)
}

fn diagonal(std: &[f64]) -> Array2<f64> {
    let mut cov = Array2::zeros((std.len(), std.len()));
    for (i, s) in std.iter().enumerate() {
        cov[[i, i]] = s * s;
    }
    cov
}

fn invert_4x4(m: &Array2<f64>) -> Option<Array2<f64>> {
    let nm = nalgebra::Matrix4::from_fn(|i, j| m[[i, j]]);
    let inv = nm.try_inverse()?;
    Some(Array2::from_shape_fn((4, 4), |(i, j)| inv[(i, j)]))
}
