use std::io::Write;
use image::{ExtendedColorType, ImageEncoder};
use image::codecs::png::PngEncoder;
use tracing::debug;
use crate::image_pipeline::common::error::{Result, PipelineError};
use crate::image_pipeline::canonical::types::CanonicalVector;
use crate::image_pipeline::preview::writer::PreviewWriter;

/// Writes the 28x28 grid as an 8-bit grayscale PNG, bright ink on black.
pub struct PngPreviewWriter;

impl PreviewWriter for PngPreviewWriter {
    fn write_preview(&self, vector: &CanonicalVector, output: &mut dyn Write) -> Result<()> {
        let image = vector.to_luma_image();
        debug!("Encoding preview PNG: {}x{}", image.width(), image.height());

        let mut buffer = Vec::new();
        PngEncoder::new(&mut buffer)
            .write_image(image.as_raw(), image.width(), image.height(), ExtendedColorType::L8)
            .map_err(|e| PipelineError::EncodeError(e.to_string()))?;

        output.write_all(&buffer)?;

        debug!("Preview encoding complete, {} bytes", buffer.len());
        Ok(())
    }
}
