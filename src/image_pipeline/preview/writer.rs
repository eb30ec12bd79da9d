use std::io::Write;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::canonical::types::CanonicalVector;

pub trait PreviewWriter {
    fn write_preview(&self, vector: &CanonicalVector, output: &mut dyn Write) -> Result<()>;
}
