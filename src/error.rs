//! Error types for dataset construction, sample access and rendering.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the dataset adapter and its collaborators.
#[derive(Error, Debug)]
pub enum DatasetError {
    /// Invalid or incomplete configuration (missing `data_dir`, empty label
    /// list, unknown transform name).
    #[error("Configuration error: {0}")]
    Config(String),

    /// The configuration file is not valid JSON for the schema.
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// A directory or file could not be listed, opened or read.
    #[error("I/O error at '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but could not be decoded as an image.
    #[error("Failed to decode image at '{path}': {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Random access past the end of the dataset.
    #[error("Index {index} out of range for dataset of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// Image and mask at the same index disagree on resolution.
    #[error("Sample {index}: image is {image:?} (HxW) but mask is {mask:?}")]
    ShapeMismatch {
        index: usize,
        image: (usize, usize),
        mask: (usize, usize),
    },

    /// A pixel buffer does not fill the array shape it was given.
    #[error("Array layout error: {0}")]
    Layout(#[from] ndarray::ShapeError),

    /// A figure could not be assembled or written.
    #[error("Render error: {0}")]
    Render(String),
}

impl DatasetError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DatasetError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias used across the library.
pub type Result<T> = std::result::Result<T, DatasetError>;
