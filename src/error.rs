//! Error types for segmentation, model loading and dictionary parsing.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when building or running a segmenter
#[derive(Debug, Error)]
pub enum SegmentError {
    /// The tagging model behind `path` could not be produced
    #[error("failed to load segmentation model {path:?} after {elapsed_ms} ms: {source}")]
    ModelLoad {
        path: PathBuf,
        elapsed_ms: u128,
        #[source]
        source: io::Error,
    },

    /// The caller asked for something this segmenter does not implement
    #[error("unsupported operation: {operation}")]
    Unsupported { operation: String },

    /// The normalizer changed the number of characters, so tagged atoms no
    /// longer line up with the input
    #[error("normalization changed the input length from {expected} to {actual} characters")]
    Alignment { expected: usize, actual: usize },

    /// A dictionary or matrix source could not be parsed
    #[error("dictionary error at line {line}: {message}")]
    Dictionary { line: usize, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl SegmentError {
    pub(crate) fn unsupported(operation: impl Into<String>) -> Self {
        SegmentError::Unsupported {
            operation: operation.into(),
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, SegmentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_load_message_names_path_and_time() {
        let err = SegmentError::ModelLoad {
            path: PathBuf::from("data/model/crf.txt"),
            elapsed_ms: 42,
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        let msg = err.to_string();
        assert!(msg.contains("data/model/crf.txt"));
        assert!(msg.contains("42 ms"));
    }

    #[test]
    fn test_unsupported_message() {
        let err = SegmentError::unsupported("number/quantifier recognition");
        assert_eq!(
            err.to_string(),
            "unsupported operation: number/quantifier recognition"
        );
    }

    #[test]
    fn test_alignment_message() {
        let err = SegmentError::Alignment {
            expected: 4,
            actual: 5,
        };
        assert_eq!(
            err.to_string(),
            "normalization changed the input length from 4 to 5 characters"
        );
    }
}
