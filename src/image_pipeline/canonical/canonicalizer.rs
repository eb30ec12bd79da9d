use image::GrayImage;
use image::imageops::{self, FilterType};
use tracing::{debug, instrument};

use crate::image_pipeline::canonical::config::{CanonicalConfig, Polarity, RecenterMode};
use crate::image_pipeline::canonical::geometry::{
    bounding_box, center_of_mass, fit_dimensions, recenter_shift, shift,
};
use crate::image_pipeline::canonical::types::{CANVAS_SIDE, CanonicalVector};
use crate::image_pipeline::stroke::RawImage;

/// Turns a stroke bitmap into the 28x28 vector a digit classifier was fit on.
///
/// The steps are, in order:
/// 1. invert so ink is bright on a black background
/// 2. find the bounding box of the ink, returning the blank vector if there is none
/// 3. crop to that box
/// 4. Lanczos-resample so the longer side is 20 pixels, keeping the aspect ratio
/// 5. paste centered into a black 28x28 canvas
/// 6. shift the canvas so its center of mass lands on (14, 14)
/// 7. scale samples to `[0.0, 1.0]`
///
/// Canonicalization is pure: the same input always yields the same vector and
/// no state is shared between calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Canonicalizer {
    polarity: Polarity,
    recenter: RecenterMode,
}

impl Canonicalizer {
    pub fn new(polarity: Polarity, recenter: RecenterMode) -> Self {
        Self { polarity, recenter }
    }

    pub fn from_config(config: &CanonicalConfig) -> Self {
        Self::new(config.polarity, config.recenter)
    }

    #[instrument(skip_all, fields(width = raw.width(), height = raw.height()))]
    pub fn canonicalize(&self, raw: RawImage) -> CanonicalVector {
        let invert = self.polarity.should_invert(&raw);
        let mut image = raw.into_gray_image();
        if invert {
            imageops::invert(&mut image);
        }

        let Some(bbox) = bounding_box(&image) else {
            debug!("No ink found, returning blank vector");
            return CanonicalVector::zeros();
        };

        let cropped = imageops::crop_imm(&image, bbox.left, bbox.top, bbox.width(), bbox.height())
            .to_image();

        let (fit_width, fit_height) = fit_dimensions(bbox.width(), bbox.height());
        let resized = imageops::resize(&cropped, fit_width, fit_height, FilterType::Lanczos3);
        debug!(
            ?bbox,
            fit_width,
            fit_height,
            "Cropped and resampled ink"
        );

        let mut canvas = GrayImage::new(CANVAS_SIDE, CANVAS_SIDE);
        let left = (CANVAS_SIDE - fit_width) / 2;
        let top = (CANVAS_SIDE - fit_height) / 2;
        imageops::replace(&mut canvas, &resized, left as i64, top as i64);

        // Lanczos can ring a faint stroke down to nothing.
        if let Some(centroid) = center_of_mass(&canvas) {
            let (dx, dy) = recenter_shift(centroid);
            debug!(x_c = centroid.0, y_c = centroid.1, dx, dy, "Recentering");
            if (dx, dy) != (0, 0) {
                canvas = shift(&canvas, dx, dy, self.recenter);
            }
        }

        CanonicalVector::from_canvas(&canvas)
    }
}

/// Canonicalizes a drawing-surface bitmap with the default settings.
pub fn canonicalize(raw: RawImage) -> CanonicalVector {
    Canonicalizer::default().canonicalize(raw)
}
