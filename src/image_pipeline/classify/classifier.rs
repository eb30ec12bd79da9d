use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::canonical::types::CanonicalVector;
use crate::image_pipeline::classify::types::DigitLabel;

/// A pre-trained model that maps a canonical vector to a digit.
///
/// A blank canvas arrives as the all-zero vector; implementations are
/// expected to answer with some label rather than fail.
pub trait DigitClassifier {
    fn predict(&self, vector: &CanonicalVector) -> Result<DigitLabel>;
}
