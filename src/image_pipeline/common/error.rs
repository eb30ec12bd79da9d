use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to decode stroke image: {0}")]
    DecodeError(String),

    #[error("Failed to encode preview image: {0}")]
    EncodeError(String),

    #[error("Invalid image payload: {0}")]
    InvalidPayload(String),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Classifier failed: {0}")]
    ClassifierError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
