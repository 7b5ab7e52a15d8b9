//! Error types for the bonro-core library.
//!
//! The receipt parser itself is total and has no error type. Everything here
//! belongs to the layers around it: loading and normalizing the photograph,
//! and running the external recognition engine.

use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Main error type for the bonro library.
#[derive(Error, Debug)]
pub enum BonroError {
    /// Image preprocessing error.
    #[error("preprocessing error: {0}")]
    Preprocess(#[from] PreprocessError),

    /// Text recognition error.
    #[error("recognition error: {0}")]
    Recognition(#[from] RecognitionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to image normalization.
#[derive(Error, Debug)]
pub enum PreprocessError {
    /// The input image does not exist.
    #[error("image not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The input could not be opened or decoded as an image.
    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    /// The normalized image could not be written.
    #[error("failed to write normalized image: {0}")]
    Write(String),
}

/// Errors related to the external recognition engine.
#[derive(Error, Debug)]
pub enum RecognitionError {
    /// The image handed to the engine does not exist.
    #[error("image not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The engine binary could not be started.
    #[error("recognition engine '{}' is not available: {source}", binary.display())]
    EngineUnavailable {
        binary: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The engine ran but exited unsuccessfully.
    #[error("recognition engine failed ({status}): {stderr}")]
    EngineInvocationFailed { status: ExitStatus, stderr: String },

    /// The engine's output file could not be read.
    #[error("failed to read recognition output: {0}")]
    Output(#[source] std::io::Error),
}

/// Result type for the bonro library.
pub type Result<T> = std::result::Result<T, BonroError>;
