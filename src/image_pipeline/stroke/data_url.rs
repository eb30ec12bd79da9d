//! `data:<mime>;base64,<payload>` parsing for canvas uploads.

use base64::{Engine as _, engine::general_purpose};

use crate::image_pipeline::common::error::{PipelineError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    mime_type: String,
    bytes: Vec<u8>,
}

impl DataUrl {
    /// Parses a base64 data URL such as the one produced by `canvas.toDataURL()`.
    pub fn parse(input: &str) -> Result<Self> {
        let (header, payload) = input
            .trim()
            .split_once(',')
            .ok_or_else(|| PipelineError::InvalidPayload("missing ',' separator".to_string()))?;

        let meta = header
            .strip_prefix("data:")
            .ok_or_else(|| PipelineError::InvalidPayload(format!("not a data URL: {header:?}")))?;

        let mime_type = meta
            .strip_suffix(";base64")
            .ok_or_else(|| PipelineError::InvalidPayload(format!("payload is not base64: {header:?}")))?;

        // Payloads pasted from files or mail are often wrapped at 76 columns.
        let payload: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        let bytes = general_purpose::STANDARD
            .decode(&payload)
            .map_err(|e| PipelineError::InvalidPayload(format!("could not decode base64 image: {e}")))?;

        Ok(Self {
            mime_type: mime_type.to_string(),
            bytes,
        })
    }

    pub fn encode(mime_type: &str, bytes: &[u8]) -> String {
        format!("data:{};base64,{}", mime_type, general_purpose::STANDARD.encode(bytes))
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
