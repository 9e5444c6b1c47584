// ============================================================
// Layer 3 — Dataset Errors
// ============================================================
// Every failure the data layer can report. The application
// and CLI layers wrap these in anyhow; below that boundary
// callers can still match on the variant.
//
// Reference: Rust Book §9 (Recoverable Errors with Result)
//            thiserror crate documentation

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    /// A shard file the loader expected is not on disk.
    #[error("Batch file not found: {}", .0.display())]
    MissingFile(PathBuf),

    /// Reading a shard failed.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path:   PathBuf,
        source: std::io::Error,
    },

    /// The shard is empty or not a whole number of records.
    #[error("Malformed batch: {len} bytes is not a non-zero multiple of the {record_size}-byte record")]
    MalformedBatch { len: usize, record_size: usize },

    /// ndarray refused a reshape or concatenation.
    #[error("Array shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    /// Images and labels disagree on the number of samples.
    #[error("images.shape[0]: {images}, labels.shape[0]: {labels}")]
    LengthMismatch { images: usize, labels: usize },

    #[error("Dataset is empty")]
    EmptyDataset,

    #[error("Label {label} is out of range for {num_classes} classes")]
    LabelOutOfRange { label: usize, num_classes: usize },

    #[error("Validation size should be between 0 and {max}. Received: {got}.")]
    InvalidValidationSize { max: usize, got: usize },

    #[error("fraction_same must lie in [0, 1], got {0}")]
    InvalidFraction(f64),

    #[error("Batch size must be at least 1")]
    EmptyBatch,

    /// Sampling without replacement ran out of candidates.
    #[error("Anchor class {class}: need {needed} {pool} samples but only {available} are available")]
    InsufficientSamples {
        class:     usize,
        needed:    usize,
        available: usize,
        pool:      SamplePool,
    },
}

/// Which candidate pool a pair sampler drew from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplePool {
    SameClass,
    OtherClass,
}

impl std::fmt::Display for SamplePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SamplePool::SameClass  => write!(f, "same-class"),
            SamplePool::OtherClass => write!(f, "other-class"),
        }
    }
}

pub type DatasetResult<T> = Result<T, DatasetError>;
