use tracing::{info, instrument, warn};
use std::io::Write;
use std::path::Path;

use crate::image_pipeline::{
    common::error::{PipelineError, Result},
    canonical::{CanonicalConfig, CanonicalVector, Canonicalizer},
    classify::{DigitClassifier, Recognition},
    preview::{PngPreviewWriter, PreviewWriter},
    stroke::{DataUrl, ImageCrateReader, StrokeImageReader},
};

const DATA_URL_PREFIX: &[u8] = b"data:";

pub struct CanvasToVectorPipeline<R: StrokeImageReader, W: PreviewWriter> {
    reader: R,
    writer: W,
    canonicalizer: Canonicalizer,
    config: CanonicalConfig,
}

impl CanvasToVectorPipeline<ImageCrateReader, PngPreviewWriter> {
    pub fn new(config: CanonicalConfig) -> Self {
        Self::with_custom(ImageCrateReader::new(), PngPreviewWriter, config)
    }
}

/// The limit handed to the reader so oversized uploads fail before decoding.
fn decode_limit(config: &CanonicalConfig) -> Option<u32> {
    if !config.validate_dimensions {
        return None;
    }
    config
        .max_dimension
        .map(|max| u32::try_from(max).unwrap_or(u32::MAX))
}

impl<R: StrokeImageReader, W: PreviewWriter> CanvasToVectorPipeline<R, W> {
    pub fn with_custom(mut reader: R, writer: W, config: CanonicalConfig) -> Self {
        reader.limit_dimensions(decode_limit(&config));
        Self {
            reader,
            writer,
            canonicalizer: Canonicalizer::from_config(&config),
            config,
        }
    }

    fn validate_dimensions(&self, width: usize, height: usize) -> Result<()> {
        if !self.config.validate_dimensions {
            return Ok(());
        }

        if let Some(max) = self.config.max_dimension {
            if width > max || height > max {
                warn!(
                    "Image dimensions {}x{} exceed maximum {}",
                    width, height, max
                );
                return Err(PipelineError::InvalidDimensions(width, height));
            }
        }

        Ok(())
    }

    /// Decodes an encoded canvas image and canonicalizes it.
    #[instrument(skip(self, input_data), fields(input_size = input_data.len()))]
    pub fn convert(&self, input_data: &[u8]) -> Result<CanonicalVector> {
        info!("Starting canvas canonicalization");

        let raw_image = {
            let _span = tracing::info_span!("decode_stroke").entered();
            self.reader.read_stroke(input_data)?
        };

        let (width, height) = (raw_image.width() as usize, raw_image.height() as usize);

        {
            let _span = tracing::info_span!("validate_dimensions", width, height).entered();
            self.validate_dimensions(width, height)?;
        }

        let vector = {
            let _span = tracing::info_span!("canonicalize").entered();
            self.canonicalizer.canonicalize(raw_image)
        };

        info!(
            width,
            height,
            blank = vector.is_blank(),
            "Canonicalization complete"
        );
        Ok(vector)
    }

    /// Same as [`convert`](Self::convert) for a `data:image/...;base64,` payload.
    #[instrument(skip(self, data_url), fields(url_len = data_url.len()))]
    pub fn convert_data_url(&self, data_url: &str) -> Result<CanonicalVector> {
        let parsed = {
            let _span = tracing::info_span!("parse_data_url").entered();
            DataUrl::parse(data_url)?
        };
        info!(mime_type = parsed.mime_type(), "Parsed data URL");

        self.convert(parsed.bytes())
    }

    /// Reads an image file, or a text file holding a data URL.
    #[instrument(skip(self, input_path))]
    pub fn convert_file<P: AsRef<Path>>(&self, input_path: P) -> Result<CanonicalVector> {
        let input_path = input_path.as_ref();

        info!(input = %input_path.display(), "Converting file");

        let input_data = {
            let _span = tracing::info_span!("read_input_file").entered();
            std::fs::read(input_path).map_err(|e| {
                PipelineError::InputReadError(format!("{}: {}", input_path.display(), e))
            })?
        };

        if input_data.trim_ascii_start().starts_with(DATA_URL_PREFIX) {
            let text = std::str::from_utf8(&input_data).map_err(|e| {
                PipelineError::InvalidPayload(format!("{}: {}", input_path.display(), e))
            })?;
            return self.convert_data_url(text);
        }

        self.convert(&input_data)
    }

    /// Canonicalizes the input and asks `classifier` for a digit.
    #[instrument(skip_all)]
    pub fn classify<C: DigitClassifier>(
        &self,
        input_data: &[u8],
        classifier: &C,
    ) -> Result<Recognition> {
        let vector = self.convert(input_data)?;

        let label = {
            let _span = tracing::info_span!("predict").entered();
            classifier.predict(&vector)?
        };

        info!(%label, "Prediction complete");
        Ok(Recognition { label, vector })
    }

    pub fn write_preview(&self, vector: &CanonicalVector, output: &mut dyn Write) -> Result<()> {
        let _span = tracing::info_span!("encode_preview").entered();
        self.writer.write_preview(vector, output)
    }

    #[instrument(skip(self, vector, output_path))]
    pub fn write_preview_file<P: AsRef<Path>>(
        &self,
        vector: &CanonicalVector,
        output_path: P,
    ) -> Result<()> {
        let output_path = output_path.as_ref();

        let mut output_file = {
            let _span = tracing::info_span!("create_output_file").entered();
            std::fs::File::create(output_path).map_err(|e| {
                PipelineError::OutputWriteError(format!("{}: {}", output_path.display(), e))
            })?
        };

        self.write_preview(vector, &mut output_file)?;

        info!(output = %output_path.display(), "Preview written");
        Ok(())
    }

    pub fn config(&self) -> &CanonicalConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: CanonicalConfig) {
        self.reader.limit_dimensions(decode_limit(&config));
        self.canonicalizer = Canonicalizer::from_config(&config);
        self.config = config;
    }
}
