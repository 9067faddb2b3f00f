//! Video frame with a cached luma plane.

use image::imageops::{self, FilterType};
use image::{GrayImage, RgbImage};
use ndarray::{Array2, ArrayView2};

/// One decoded video frame.
///
/// The luma plane is computed when the frame is built and is what the
/// trackers correlate against. Drawing overlays through [`Frame::image_mut`]
/// does not touch it.
#[derive(Debug, Clone)]
pub struct Frame {
    image: RgbImage,
    luma: Array2<f32>,
}

impl Frame {
    pub fn new(image: RgbImage) -> Self {
        let luma = luma_plane(&image);
        Self { image, luma }
    }

    /// Build an RGB frame from a grayscale image.
    pub fn from_gray(gray: &GrayImage) -> Self {
        let rgb = RgbImage::from_fn(gray.width(), gray.height(), |x, y| {
            let v = gray.get_pixel(x, y).0[0];
            image::Rgb([v, v, v])
        });
        Self::new(rgb)
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn image_mut(&mut self) -> &mut RgbImage {
        &mut self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    /// Luma plane indexed `[[y, x]]`, values in `0.0..=255.0`.
    pub fn luma(&self) -> ArrayView2<'_, f32> {
        self.luma.view()
    }

    /// 8-bit grayscale copy of the frame.
    pub fn gray(&self) -> GrayImage {
        imageops::grayscale(&self.image)
    }

    /// Resize to `width` keeping the aspect ratio. Frames already at that
    /// width are returned untouched.
    pub fn resized_to_width(self, width: u32) -> Self {
        if width == 0 || width == self.width() {
            return self;
        }
        let height = ((self.height() as u64 * width as u64) / self.width().max(1) as u64).max(1);
        let resized = imageops::resize(&self.image, width, height as u32, FilterType::Triangle);
        Self::new(resized)
    }
}

fn luma_plane(image: &RgbImage) -> Array2<f32> {
    let (w, h) = image.dimensions();
    Array2::from_shape_fn((h as usize, w as usize), |(y, x)| {
        let [r, g, b] = image.get_pixel(x as u32, y as u32).0;
        0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32
    })
}
