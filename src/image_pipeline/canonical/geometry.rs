//! Grid helpers for the canonicalization steps.

use image::{GrayImage, Luma};

use crate::image_pipeline::canonical::config::RecenterMode;
use crate::image_pipeline::canonical::types::{BoundingBox, CENTER_OF_MASS_TARGET, FIT_SIDE};

/// Bounding box of every sample `> 0`, `None` if there is none.
pub(crate) fn bounding_box(image: &GrayImage) -> Option<BoundingBox> {
    let mut bbox: Option<BoundingBox> = None;

    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel.0[0] == 0 {
            continue;
        }
        bbox = Some(match bbox {
            None => BoundingBox { left: x, top: y, right: x + 1, bottom: y + 1 },
            Some(b) => BoundingBox {
                left: b.left.min(x),
                top: b.top.min(y),
                right: b.right.max(x + 1),
                bottom: b.bottom.max(y + 1),
            },
        });
    }

    bbox
}

/// Scales `(width, height)` so the longer side becomes [`FIT_SIDE`].
///
/// Both sides are multiplied by the same `FIT_SIDE / longest` factor, then
/// rounded half to even; neither side drops below 1.
pub(crate) fn fit_dimensions(width: u32, height: u32) -> (u32, u32) {
    let scale = FIT_SIDE as f64 / width.max(height).max(1) as f64;
    let fit = |side: u32| {
        let scaled = (side as f64 * scale).round_ties_even();
        (scaled as u32).clamp(1, FIT_SIDE)
    };
    (fit(width), fit(height))
}

/// Intensity-weighted `(x, y)` center over the whole image.
pub(crate) fn center_of_mass(image: &GrayImage) -> Option<(f64, f64)> {
    let (mut mass, mut sum_x, mut sum_y) = (0.0f64, 0.0f64, 0.0f64);

    for (x, y, pixel) in image.enumerate_pixels() {
        let m = pixel.0[0] as f64;
        mass += m;
        sum_x += x as f64 * m;
        sum_y += y as f64 * m;
    }

    if mass == 0.0 {
        return None;
    }
    Some((sum_x / mass, sum_y / mass))
}

/// Integer shift that moves `centroid` onto the target center.
pub(crate) fn recenter_shift(centroid: (f64, f64)) -> (i64, i64) {
    let (x_c, y_c) = centroid;
    (
        (CENTER_OF_MASS_TARGET - x_c).round_ties_even() as i64,
        (CENTER_OF_MASS_TARGET - y_c).round_ties_even() as i64,
    )
}

/// Translates the image by `(dx, dy)`.
pub(crate) fn shift(image: &GrayImage, dx: i64, dy: i64, mode: RecenterMode) -> GrayImage {
    let (width, height) = (image.width() as i64, image.height() as i64);

    GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let sx = x as i64 - dx;
        let sy = y as i64 - dy;
        match mode {
            RecenterMode::Wrap => {
                *image.get_pixel(sx.rem_euclid(width) as u32, sy.rem_euclid(height) as u32)
            }
            RecenterMode::Clip => {
                if (0..width).contains(&sx) && (0..height).contains(&sy) {
                    *image.get_pixel(sx as u32, sy as u32)
                } else {
                    Luma([0])
                }
            }
        }
    })
}
