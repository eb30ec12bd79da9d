//! Canonicalization module
//!
//! Converts an arbitrary stroke bitmap into the fixed 28x28, centered,
//! intensity-normalized vector a handwritten-digit classifier expects.

mod canonicalizer;
mod geometry;
pub mod config;
pub mod types;

#[cfg(test)]
mod tests;

pub use canonicalizer::{Canonicalizer, canonicalize};
pub use config::{CanonicalConfig, CanonicalConfigBuilder, Polarity, RecenterMode};
pub use types::{
    BoundingBox, CanonicalVector, CANONICAL_LEN, CANVAS_SIDE, CENTER_OF_MASS_TARGET, FIT_SIDE,
};
