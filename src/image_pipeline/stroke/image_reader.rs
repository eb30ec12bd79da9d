//! Stroke reader implementation using the image crate.
//!
//! Any format the `image` crate can sniff and decode is accepted (PNG from a
//! browser canvas being the usual case). Colour input is reduced to a single
//! luminance channel with ITU-R 601-2 weights, alpha is dropped.

use std::io::Cursor;

use image::{DynamicImage, GrayImage, ImageError, ImageReader, Limits, Luma, RgbImage};
use tracing::{debug, warn};

use crate::image_pipeline::common::error::{PipelineError, Result};
use crate::image_pipeline::stroke::reader::StrokeImageReader;
use crate::image_pipeline::stroke::types::RawImage;

/// Fixed-point 601-2 luma weights, scaled by 2^16.
const LUMA_R: u32 = 19595;
const LUMA_G: u32 = 38470;
const LUMA_B: u32 = 7471;
const LUMA_ROUND: u32 = 1 << 15;

/// Decodes canvas uploads with the `image` crate.
///
/// With a maximum dimension set, oversized images are refused from their
/// header, before any pixel buffer is allocated.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCrateReader {
    max_dimension: Option<u32>,
}

impl ImageCrateReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_dimension(max_dimension: u32) -> Self {
        Self {
            max_dimension: Some(max_dimension),
        }
    }

    pub fn max_dimension(&self) -> Option<u32> {
        self.max_dimension
    }

    fn decode(&self, data: &[u8]) -> Result<DynamicImage> {
        let mut reader = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|e| PipelineError::DecodeError(e.to_string()))?;

        let mut limits = Limits::default();
        limits.max_image_width = self.max_dimension;
        limits.max_image_height = self.max_dimension;
        reader.limits(limits);

        reader.decode().map_err(|e| match e {
            ImageError::Limits(limit) => {
                warn!("Refusing stroke image: {}", limit);
                PipelineError::DecodeError(format!(
                    "image exceeds the {}px dimension limit: {}",
                    self.max_dimension.unwrap_or_default(),
                    limit
                ))
            }
            other => PipelineError::DecodeError(other.to_string()),
        })
    }
}

impl StrokeImageReader for ImageCrateReader {
    /// Decodes encoded image bytes into an 8-bit grayscale [`RawImage`].
    ///
    /// # Returns
    ///
    /// * `Ok(RawImage)` - decoded luminance grid
    /// * `Err(PipelineError::DecodeError)` - the bytes are not a supported image
    fn read_stroke(&self, data: &[u8]) -> Result<RawImage> {
        debug!("Decoding stroke image, {} bytes", data.len());

        let decoded = self.decode(data)?;

        let gray = match decoded {
            DynamicImage::ImageLuma8(gray) => gray,
            other => luma_601(&other.to_rgb8()),
        };

        debug!("Decoded stroke image: {}x{}", gray.width(), gray.height());

        Ok(RawImage::from(gray))
    }

    fn limit_dimensions(&mut self, max_dimension: Option<u32>) {
        self.max_dimension = max_dimension;
    }
}

fn luma_601(rgb: &RgbImage) -> GrayImage {
    GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        let l = (r as u32 * LUMA_R + g as u32 * LUMA_G + b as u32 * LUMA_B + LUMA_ROUND) >> 16;
        Luma([l as u8])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, Rgba, RgbaImage};

    fn encode_png(image: DynamicImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png).unwrap();
        bytes
    }

    #[test]
    fn test_grayscale_png_passes_through() {
        let mut gray = GrayImage::from_pixel(4, 3, Luma([255]));
        gray.put_pixel(1, 2, Luma([7]));
        let bytes = encode_png(DynamicImage::ImageLuma8(gray));

        let raw = ImageCrateReader::new().read_stroke(&bytes).unwrap();

        assert_eq!((raw.width(), raw.height()), (4, 3));
        assert_eq!(raw.get(1, 2), Some(7));
        assert_eq!(raw.get(0, 0), Some(255));
    }

    #[test]
    fn test_rgba_canvas_uses_601_luma() {
        let mut rgba = RgbaImage::from_pixel(2, 1, Rgba([255, 255, 255, 255]));
        rgba.put_pixel(1, 0, Rgba([255, 0, 0, 255]));
        let bytes = encode_png(DynamicImage::ImageRgba8(rgba));

        let raw = ImageCrateReader::new().read_stroke(&bytes).unwrap();

        assert_eq!(raw.get(0, 0), Some(255));
        // 255 * 0.299 = 76.2
        assert_eq!(raw.get(1, 0), Some(76));
    }

    #[test]
    fn test_gray_rgb_keeps_level() {
        let rgb = RgbImage::from_pixel(1, 1, Rgb([128, 128, 128]));

        assert_eq!(luma_601(&rgb).get_pixel(0, 0).0[0], 128);
    }

    #[test]
    fn test_garbage_bytes_fail_to_decode() {
        let result = ImageCrateReader::new().read_stroke(b"definitely not a png");

        assert!(matches!(result.unwrap_err(), PipelineError::DecodeError(_)));
    }

    #[test]
    fn test_max_dimension_refuses_oversized_header() {
        let bytes = encode_png(DynamicImage::ImageLuma8(GrayImage::new(64, 8)));

        let result = ImageCrateReader::with_max_dimension(32).read_stroke(&bytes);
        assert!(matches!(result.unwrap_err(), PipelineError::DecodeError(_)));

        let raw = ImageCrateReader::with_max_dimension(64).read_stroke(&bytes).unwrap();
        assert_eq!((raw.width(), raw.height()), (64, 8));
    }

    #[test]
    fn test_limit_dimensions_can_be_lifted() {
        let bytes = encode_png(DynamicImage::ImageLuma8(GrayImage::new(8, 64)));
        let mut reader = ImageCrateReader::with_max_dimension(16);
        assert!(reader.read_stroke(&bytes).is_err());

        reader.limit_dimensions(None);

        assert_eq!(reader.max_dimension(), None);
        assert!(reader.read_stroke(&bytes).is_ok());
    }
}
