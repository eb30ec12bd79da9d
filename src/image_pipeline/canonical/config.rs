//! Canonicalization configuration types

use crate::image_pipeline::stroke::RawImage;

/// Mean intensity above which [`Polarity::Auto`] treats the image as a light canvas.
const AUTO_POLARITY_THRESHOLD: f64 = 128.0;

/// Which extreme of the input marks ink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Polarity {
    /// Dark strokes on a white canvas (browser drawing surface, default)
    #[default]
    DarkOnLight,
    /// Bright strokes on black, already in dataset polarity
    LightOnDark,
    /// Guess from the mean intensity
    Auto,
}

impl Polarity {
    pub fn should_invert(&self, image: &RawImage) -> bool {
        match self {
            Polarity::DarkOnLight => true,
            Polarity::LightOnDark => false,
            Polarity::Auto => image.mean_intensity() > AUTO_POLARITY_THRESHOLD,
        }
    }
}

/// How the center-of-mass shift treats pixels pushed past the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecenterMode {
    /// Cyclic offset: pixels leaving one edge re-enter on the opposite edge.
    /// Matches the vectors existing classifiers were fit against.
    #[default]
    Wrap,
    /// Pixels leaving the frame are dropped.
    Clip,
}

/// Configuration for canvas canonicalization
#[derive(Debug, Clone)]
pub struct CanonicalConfig {
    /// Input polarity
    pub polarity: Polarity,
    /// Edge handling of the recentering shift
    pub recenter: RecenterMode,
    /// Whether to check decoded dimensions against `max_dimension`
    pub validate_dimensions: bool,
    /// Largest accepted width or height of a decoded upload
    pub max_dimension: Option<usize>,
}

impl Default for CanonicalConfig {
    fn default() -> Self {
        Self {
            polarity: Polarity::DarkOnLight,
            recenter: RecenterMode::Wrap,
            validate_dimensions: true,
            max_dimension: Some(4096),
        }
    }
}

impl CanonicalConfig {
    pub fn builder() -> CanonicalConfigBuilder {
        CanonicalConfigBuilder::default()
    }
}

/// Builder for CanonicalConfig
#[derive(Default)]
pub struct CanonicalConfigBuilder {
    polarity: Option<Polarity>,
    recenter: Option<RecenterMode>,
    validate_dimensions: Option<bool>,
    max_dimension: Option<Option<usize>>,
}

impl CanonicalConfigBuilder {
    pub fn polarity(mut self, polarity: Polarity) -> Self {
        self.polarity = Some(polarity);
        self
    }

    pub fn recenter(mut self, recenter: RecenterMode) -> Self {
        self.recenter = Some(recenter);
        self
    }

    pub fn validate_dimensions(mut self, validate: bool) -> Self {
        self.validate_dimensions = Some(validate);
        self
    }

    pub fn max_dimension(mut self, max_dimension: Option<usize>) -> Self {
        self.max_dimension = Some(max_dimension);
        self
    }

    pub fn build(self) -> CanonicalConfig {
        let default = CanonicalConfig::default();
        CanonicalConfig {
            polarity: self.polarity.unwrap_or(default.polarity),
            recenter: self.recenter.unwrap_or(default.recenter),
            validate_dimensions: self.validate_dimensions.unwrap_or(default.validate_dimensions),
            max_dimension: self.max_dimension.unwrap_or(default.max_dimension),
        }
    }
}
