use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::stroke::types::RawImage;

pub trait StrokeImageReader {
    fn read_stroke(&self, data: &[u8]) -> Result<RawImage>;

    /// Largest width or height to accept, enforced before pixel data is
    /// allocated. Readers that cannot check headers early ignore it.
    fn limit_dimensions(&mut self, _max_dimension: Option<u32>) {}
}
