//! Stroke image reading module
//!
//! Turns encoded canvas uploads (raw image bytes or base64 data URLs) into
//! single-channel [`RawImage`] grids.

mod reader;
mod image_reader;
mod data_url;
pub mod types;

pub use reader::StrokeImageReader;
pub use image_reader::ImageCrateReader;
pub use data_url::DataUrl;
pub use types::{RawImage, CANVAS_WHITE};
