//! Preview writing module
//!
//! Renders canonical vectors back into viewable images.

mod writer;
mod png_preview_writer;

pub use writer::PreviewWriter;
pub use png_preview_writer::PngPreviewWriter;
