//! Synthetic marker images.

use image::{GrayImage, Luma};

use super::dictionary::TagDictionary;

/// Draw marker `id` with `cell_px` pixels per cell and a white quiet zone of
/// `quiet_cells` cells around the black border.
///
/// Returns `None` when `id` is not in the dictionary or `cell_px` is zero.
pub fn render_marker(
    dictionary: &TagDictionary,
    id: u32,
    cell_px: u32,
    quiet_cells: u32,
) -> Option<GrayImage> {
    let code = dictionary.code(id)?;
    if cell_px == 0 {
        return None;
    }
    let dim = dictionary.dimension() as u32;
    let grid = dim + 2;
    let size = (grid + 2 * quiet_cells) * cell_px;

    Some(GrayImage::from_fn(size, size, |px, py| {
        let gx = (px / cell_px) as i64 - quiet_cells as i64;
        let gy = (py / cell_px) as i64 - quiet_cells as i64;
        let in_tag = (0..grid as i64).contains(&gx) && (0..grid as i64).contains(&gy);
        if !in_tag {
            return Luma([255]);
        }
        let on_border = gx == 0 || gy == 0 || gx == grid as i64 - 1 || gy == grid as i64 - 1;
        if on_border {
            return Luma([0]);
        }
        let bit = (gy as u64 - 1) * dim as u64 + (gx as u64 - 1);
        if (code >> bit) & 1 == 1 {
            Luma([255])
        } else {
            Luma([0])
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marker::MarkerDictionary;

    #[test]
    fn border_is_black_and_quiet_zone_white() {
        let dict = MarkerDictionary::AprilTag36h11.dictionary();
        let img = render_marker(dict, 0, 4, 1).unwrap();
        assert_eq!(img.dimensions(), (40, 40));
        assert_eq!(img.get_pixel(1, 1).0[0], 255);
        assert_eq!(img.get_pixel(5, 5).0[0], 0);
        assert_eq!(img.get_pixel(34, 34).0[0], 0);
        assert!(render_marker(dict, 10_000, 4, 1).is_none());
    }
}
