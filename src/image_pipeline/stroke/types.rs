//! Stroke image data types

use image::{GrayImage, Luma};

use crate::image_pipeline::common::error::{PipelineError, Result};

/// Luminance of an untouched drawing surface.
pub const CANVAS_WHITE: u8 = 255;

/// Decoded single-channel stroke bitmap.
///
/// Samples are luminance: `255` is the white canvas, `0` is black ink.
/// Zero-sized images are valid and canonicalize to the blank vector.
#[derive(Debug, Clone, PartialEq)]
pub struct RawImage {
    pixels: GrayImage,
}

impl RawImage {
    /// Wraps a row-major sample buffer. Fails when `data.len() != width * height`.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        // from_raw alone accepts oversized buffers
        if data.len() as u64 != width as u64 * height as u64 {
            return Err(PipelineError::InvalidDimensions(width as usize, height as usize));
        }
        GrayImage::from_raw(width, height, data)
            .map(|pixels| Self { pixels })
            .ok_or(PipelineError::InvalidDimensions(width as usize, height as usize))
    }

    /// An image where every sample equals `value`.
    pub fn filled(width: u32, height: u32, value: u8) -> Self {
        Self {
            pixels: GrayImage::from_pixel(width, height, Luma([value])),
        }
    }

    /// A white canvas with nothing drawn on it.
    pub fn blank(width: u32, height: u32) -> Self {
        Self::filled(width, height, CANVAS_WHITE)
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.width() == 0 || self.pixels.height() == 0
    }

    /// Row-major samples.
    pub fn data(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        self.pixels.get_pixel_checked(x, y).map(|p| p.0[0])
    }

    /// Sets one sample. Out-of-bounds writes are ignored.
    pub fn put(&mut self, x: u32, y: u32, value: u8) {
        if let Some(pixel) = self.pixels.get_pixel_mut_checked(x, y) {
            *pixel = Luma([value]);
        }
    }

    /// Mean sample value, `0.0` for an empty image.
    pub fn mean_intensity(&self) -> f64 {
        let samples = self.pixels.as_raw();
        if samples.is_empty() {
            return 0.0;
        }
        let sum: u64 = samples.iter().map(|&v| v as u64).sum();
        sum as f64 / samples.len() as f64
    }

    pub fn into_gray_image(self) -> GrayImage {
        self.pixels
    }
}

impl From<GrayImage> for RawImage {
    fn from(pixels: GrayImage) -> Self {
        Self { pixels }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_checks_buffer_length() {
        assert!(RawImage::new(2, 2, vec![0; 4]).is_ok());
        assert!(matches!(
            RawImage::new(2, 2, vec![0; 5]),
            Err(PipelineError::InvalidDimensions(2, 2))
        ));
        assert!(RawImage::new(0, 0, Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn test_put_and_mean() {
        let mut image = RawImage::blank(2, 1);
        image.put(1, 0, 55);
        image.put(9, 9, 0);

        assert_eq!(image.data(), &[CANVAS_WHITE, 55]);
        assert_eq!(image.mean_intensity(), 155.0);
        assert_eq!(RawImage::blank(0, 3).mean_intensity(), 0.0);
    }
}
