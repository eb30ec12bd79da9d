//! Classification seam
//!
//! The digit model itself lives outside this crate; it plugs in through
//! [`DigitClassifier`].

mod classifier;
pub mod types;

pub use classifier::DigitClassifier;
pub use types::{DigitLabel, Recognition};
