//! Classification result types

use std::fmt;

use crate::image_pipeline::common::error::PipelineError;
use crate::image_pipeline::canonical::types::CanonicalVector;

/// A digit `0..=9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DigitLabel(u8);

impl DigitLabel {
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for DigitLabel {
    type Error = PipelineError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value > 9 {
            return Err(PipelineError::ClassifierError(format!("{value} is not a digit")));
        }
        Ok(Self(value))
    }
}

impl fmt::Display for DigitLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A predicted label together with the vector it was predicted from.
#[derive(Debug, Clone, PartialEq)]
pub struct Recognition {
    pub label: DigitLabel,
    pub vector: CanonicalVector,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_label_range() {
        assert_eq!(DigitLabel::try_from(0).unwrap().value(), 0);
        assert_eq!(DigitLabel::try_from(9).unwrap().to_string(), "9");
        assert!(matches!(
            DigitLabel::try_from(10),
            Err(PipelineError::ClassifierError(_))
        ));
    }
}
