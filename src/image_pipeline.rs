//! Image processing pipeline module
//!
//! This module turns hand-drawn canvas uploads into the canonical 28x28 digit
//! vectors a classifier consumes, with separate modules for stroke decoding,
//! canonicalization, preview rendering, classification and orchestration.

pub mod stroke;
pub mod canonical;
pub mod preview;
pub mod classify;
pub mod conversions;
pub mod common;

pub use common::{
    PipelineError,
    Result,
};

pub use stroke::{
    DataUrl,
    ImageCrateReader,
    RawImage,
    StrokeImageReader,
};

pub use canonical::{
    canonicalize,
    BoundingBox,
    CanonicalConfig,
    CanonicalConfigBuilder,
    CanonicalVector,
    Canonicalizer,
    Polarity,
    RecenterMode,
    CANONICAL_LEN,
};

pub use preview::{
    PngPreviewWriter,
    PreviewWriter,
};

pub use classify::{
    DigitClassifier,
    DigitLabel,
    Recognition,
};

pub use conversions::{
    CanvasToVectorPipeline,
};
