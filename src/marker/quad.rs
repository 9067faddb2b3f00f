//! Candidate quad extraction: thresholding, connected components, corner fit.

use image::{GrayImage, Luma};
use imageproc::contrast::otsu_level;
use imageproc::integral_image::{integral_image, sum_image_pixels};
use imageproc::region_labelling::{Connectivity, connected_components};
use nalgebra::{Point2, Vector2};

/// Dark-region outline approximated by four corners, clockwise in image
/// coordinates starting from the corner nearest the image origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct QuadCandidate {
    pub corners: [Point2<f64>; 4],
    pub pixel_count: usize,
}

/// Mark pixels that are darker than their neighbourhood, or no brighter
/// than the global Otsu level, with 255.
pub(crate) fn dark_mask(gray: &GrayImage, radius: u32, offset: i32) -> GrayImage {
    let (w, h) = gray.dimensions();
    let global = otsu_level(gray);
    let integral = integral_image::<_, u32>(gray);

    GrayImage::from_fn(w, h, |x, y| {
        let x1 = x.saturating_sub(radius);
        let y1 = y.saturating_sub(radius);
        let x2 = x.saturating_add(radius).min(w - 1);
        let y2 = y.saturating_add(radius).min(h - 1);
        let sum = sum_image_pixels(&integral, x1, y1, x2, y2)[0] as i64;
        let area = ((x2 - x1 + 1) * (y2 - y1 + 1)) as i64;

        let v = gray.get_pixel(x, y).0[0];
        let locally_dark = (v as i64 + offset as i64) * area < sum;
        // otsu_level is the brightest level of the dark class.
        if locally_dark || v <= global {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

#[derive(Default)]
struct Component {
    pixels: Vec<(u32, u32)>,
    min: (u32, u32),
    max: (u32, u32),
    touches_border: bool,
}

/// Find quad-shaped dark components.
pub(crate) fn find_quads(
    mask: &GrayImage,
    min_pixels: usize,
    min_side: f64,
) -> Vec<QuadCandidate> {
    let (w, h) = mask.dimensions();
    let labels = connected_components(mask, Connectivity::Eight, Luma([0u8]));

    let mut components: Vec<Component> = Vec::new();
    for (x, y, label) in labels.enumerate_pixels() {
        let label = label.0[0] as usize;
        if label == 0 {
            continue;
        }
        if components.len() < label {
            components.resize_with(label, Component::default);
        }
        let c = &mut components[label - 1];
        if c.pixels.is_empty() {
            c.min = (x, y);
            c.max = (x, y);
        }
        c.min = (c.min.0.min(x), c.min.1.min(y));
        c.max = (c.max.0.max(x), c.max.1.max(y));
        c.touches_border |= x == 0 || y == 0 || x + 1 == w || y + 1 == h;
        c.pixels.push((x, y));
    }

    components
        .iter()
        .filter(|c| c.pixels.len() >= min_pixels && !c.touches_border)
        .filter(|c| {
            let side_x = (c.max.0 - c.min.0 + 1) as f64;
            let side_y = (c.max.1 - c.min.1 + 1) as f64;
            side_x >= min_side && side_y >= min_side
        })
        .filter_map(|c| fit_quad(&c.pixels, min_side))
        .collect()
}

/// Farthest-point corner search over the component's pixel centres.
fn fit_quad(pixels: &[(u32, u32)], min_side: f64) -> Option<QuadCandidate> {
    let points: Vec<Point2<f64>> = pixels
        .iter()
        .map(|&(x, y)| Point2::new(x as f64 + 0.5, y as f64 + 0.5))
        .collect();
    let n = points.len() as f64;
    let centroid = Point2::from(points.iter().map(|p| p.coords).sum::<Vector2<f64>>() / n);

    let farthest_from = |origin: Point2<f64>| {
        points
            .iter()
            .copied()
            .max_by(|a, b| (a - origin).norm_squared().total_cmp(&(b - origin).norm_squared()))
    };
    let p0 = farthest_from(centroid)?;
    let p2 = farthest_from(p0)?;

    let diagonal = p2 - p0;
    if diagonal.norm() < min_side {
        return None;
    }
    let side = |p: &Point2<f64>| diagonal.perp(&(p - p0));
    let p1 = points.iter().copied().max_by(|a, b| side(a).total_cmp(&side(b)))?;
    let p3 = points.iter().copied().min_by(|a, b| side(a).total_cmp(&side(b)))?;

    let diag_len = diagonal.norm();
    if side(&p1) / diag_len < min_side / 2.0 || -side(&p3) / diag_len < min_side / 2.0 {
        return None;
    }

    let mut corners = [p0, p1, p2, p3].map(|p| {
        let d = p - centroid;
        Point2::new(p.x + 0.5 * d.x.signum(), p.y + 0.5 * d.y.signum())
    });
    order_clockwise(&mut corners, centroid);

    if !is_convex(&corners) {
        return None;
    }

    Some(QuadCandidate {
        corners,
        pixel_count: pixels.len(),
    })
}

/// Clockwise on screen (y down), starting nearest the image origin.
fn order_clockwise(corners: &mut [Point2<f64>; 4], center: Point2<f64>) {
    corners.sort_by(|a, b| {
        let ta = (a.y - center.y).atan2(a.x - center.x);
        let tb = (b.y - center.y).atan2(b.x - center.x);
        ta.total_cmp(&tb)
    });
    let start = (0..4)
        .min_by(|&i, &j| {
            (corners[i].x + corners[i].y).total_cmp(&(corners[j].x + corners[j].y))
        })
        .unwrap_or(0);
    corners.rotate_left(start);
}

fn is_convex(corners: &[Point2<f64>; 4]) -> bool {
    (0..4).all(|i| {
        let a = corners[i];
        let b = corners[(i + 1) % 4];
        let c = corners[(i + 2) % 4];
        (b - a).perp(&(c - b)) > 0.0
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_image(size: u32, x0: u32, y0: u32, side: u32) -> GrayImage {
        GrayImage::from_fn(size, size, |x, y| {
            let inside = (x0..x0 + side).contains(&x) && (y0..y0 + side).contains(&y);
            Luma([if inside { 20 } else { 230 }])
        })
    }

    #[test]
    fn dark_square_yields_outer_corners() {
        let gray = square_image(100, 20, 30, 40);
        let mask = dark_mask(&gray, 7, 7);
        let quads = find_quads(&mask, 48, 8.0);
        assert_eq!(quads.len(), 1);

        let expected = [(20.0, 30.0), (60.0, 30.0), (60.0, 70.0), (20.0, 70.0)];
        for (c, (ex, ey)) in quads[0].corners.iter().zip(expected) {
            assert!((c.x - ex).abs() < 1e-9 && (c.y - ey).abs() < 1e-9, "{c:?}");
        }
        assert_eq!(quads[0].pixel_count, 1600);
    }

    #[test]
    fn border_touching_and_tiny_regions_are_skipped() {
        let gray = square_image(100, 0, 0, 40);
        let mask = dark_mask(&gray, 7, 7);
        assert!(find_quads(&mask, 48, 8.0).is_empty());

        let gray = square_image(100, 50, 50, 5);
        let mask = dark_mask(&gray, 7, 7);
        assert!(find_quads(&mask, 48, 8.0).is_empty());
    }

    #[test]
    fn dark_square_interior_is_masked() {
        let gray = square_image(100, 20, 20, 60);
        let mask = dark_mask(&gray, 7, 7);
        assert_eq!(mask.get_pixel(50, 50).0, [255]);
        assert_eq!(mask.get_pixel(5, 5).0, [0]);
        let marked = mask.pixels().filter(|p| p.0[0] == 255).count();
        assert_eq!(marked, 3600);
    }

    #[test]
    fn local_darkness_uses_the_clipped_window() {
        let gray = GrayImage::from_fn(23, 17, |x, y| Luma([100 + ((x * 7 + y * 13) % 97) as u8]));
        let global = otsu_level(&gray);
        let (radius, offset) = (3i64, 5i64);
        let mask = dark_mask(&gray, radius as u32, offset as i32);

        for (x, y, p) in gray.enumerate_pixels() {
            let (mut sum, mut area) = (0i64, 0i64);
            for wy in (y as i64 - radius).max(0)..=(y as i64 + radius).min(16) {
                for wx in (x as i64 - radius).max(0)..=(x as i64 + radius).min(22) {
                    sum += gray.get_pixel(wx as u32, wy as u32).0[0] as i64;
                    area += 1;
                }
            }
            let v = p.0[0];
            let dark = (v as i64 + offset) * area < sum || v <= global;
            assert_eq!(mask.get_pixel(x, y).0[0] == 255, dark, "pixel ({x}, {y})");
        }
    }
}
