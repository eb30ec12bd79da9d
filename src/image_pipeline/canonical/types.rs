//! Canonical digit representation types

use image::{GrayImage, Luma};

use crate::image_pipeline::stroke::RawImage;

/// Side of the canonical grid.
pub const CANVAS_SIDE: u32 = 28;

/// Side of the square the cropped digit is scaled into before pasting.
pub const FIT_SIDE: u32 = 20;

/// Number of samples in a [`CanonicalVector`].
pub const CANONICAL_LEN: usize = (CANVAS_SIDE * CANVAS_SIDE) as usize;

/// Grid coordinate the center of mass is pulled towards.
pub const CENTER_OF_MASS_TARGET: f64 = 14.0;

const MAX_INTENSITY: f32 = 255.0;

/// Tightest rectangle around all non-background samples.
///
/// `right` and `bottom` are exclusive, so `width = right - left`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl BoundingBox {
    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }
}

/// 28x28 row-major digit with samples in `[0.0, 1.0]`, bright ink on black.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalVector {
    values: Box<[f32; CANONICAL_LEN]>,
}

impl CanonicalVector {
    /// The vector produced for a blank canvas.
    pub fn zeros() -> Self {
        Self {
            values: Box::new([0.0; CANONICAL_LEN]),
        }
    }

    /// Normalizes a canvas allocated with [`CANVAS_SIDE`].
    pub(crate) fn from_canvas(canvas: &GrayImage) -> Self {
        debug_assert_eq!(canvas.dimensions(), (CANVAS_SIDE, CANVAS_SIDE));

        let mut values = Box::new([0.0; CANONICAL_LEN]);
        for (dst, &src) in values.iter_mut().zip(canvas.as_raw()) {
            *dst = src as f32 / MAX_INTENSITY;
        }
        Self { values }
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values[..]
    }

    /// Sample at grid column `x`, row `y`.
    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        if x >= CANVAS_SIDE || y >= CANVAS_SIDE {
            return None;
        }
        Some(self.values[(y * CANVAS_SIDE + x) as usize])
    }

    pub fn is_blank(&self) -> bool {
        self.values.iter().all(|&v| v == 0.0)
    }

    /// Total intensity.
    pub fn mass(&self) -> f64 {
        self.values.iter().map(|&v| v as f64).sum()
    }

    /// Intensity-weighted `(x, y)` center, `None` when blank.
    pub fn centroid(&self) -> Option<(f64, f64)> {
        let mass = self.mass();
        if mass == 0.0 {
            return None;
        }

        let (mut sum_x, mut sum_y) = (0.0, 0.0);
        for (i, &v) in self.values.iter().enumerate() {
            let x = (i as u32 % CANVAS_SIDE) as f64;
            let y = (i as u32 / CANVAS_SIDE) as f64;
            sum_x += x * v as f64;
            sum_y += y * v as f64;
        }
        Some((sum_x / mass, sum_y / mass))
    }

    /// The grid as an 8-bit image in dataset polarity (bright ink on black).
    pub fn to_luma_image(&self) -> GrayImage {
        GrayImage::from_fn(CANVAS_SIDE, CANVAS_SIDE, |x, y| {
            let v = self.values[(y * CANVAS_SIDE + x) as usize];
            Luma([(v * MAX_INTENSITY).round().clamp(0.0, MAX_INTENSITY) as u8])
        })
    }

    /// The grid as a drawing-surface bitmap (dark ink on white), ready to be
    /// canonicalized again.
    pub fn to_stroke_image(&self) -> RawImage {
        let mut image = self.to_luma_image();
        image::imageops::invert(&mut image);
        RawImage::from(image)
    }
}
