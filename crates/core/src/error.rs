//! Error types for pdfmage layout reconstruction.

use thiserror::Error;

/// Primary error type for layout reconstruction.
#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("bounding box union requested over zero boxes")]
    EmptyUnion,

    #[error("cluster of {words} word(s) has an empty content signature")]
    UnknownSignature { words: usize },

    #[error("invalid word: {0}")]
    InvalidWord(String),

    #[error("invalid layout parameters: {0}")]
    InvalidParams(String),

    #[error("page {0} is out of range")]
    PageOutOfRange(usize),

    #[error("page {0} appears more than once in the word dump")]
    DuplicatePage(usize),

    #[error("word extraction failed on page {page}: {message}")]
    Source { page: usize, message: String },

    #[error("rasterization failed on page {page}: {message}")]
    Render { page: usize, message: String },

    #[error("thread pool error: {0}")]
    ThreadPool(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience Result type alias for LayoutError.
pub type Result<T> = std::result::Result<T, LayoutError>;
