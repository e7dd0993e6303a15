//! Crate-level error type and `Result` alias for structured error handling.
//! Converts underlying I/O, image codec and JSON errors, and provides semantic
//! variants for cell configuration problems and argument validation.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image codec error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Resize error: {0}")]
    Resize(String),

    /// A cell cannot be cut from the sheet. Batch drivers skip the cell and continue.
    #[error("Invalid cell '{cell}': {reason}")]
    Config { cell: String, reason: String },

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("Processing error: {0}")]
    Processing(String),
}

impl Error {
    pub fn config(cell: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Config {
            cell: cell.into(),
            reason: reason.into(),
        }
    }

    /// True for per-cell configuration problems that a batch run may skip past.
    pub fn is_cell_error(&self) -> bool {
        matches!(self, Error::Config { .. })
    }
}
