//! Error types for order validation and template export.

use thiserror::Error;

/// Error codes for export processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Contact name or phone missing (-1)
    MissingContact = -1,
    /// Order has no parts (-2)
    EmptyOrder = -2,
    /// Part field outside the accepted range (-3)
    InvalidPart = -3,
    /// Sheet dimensions unusable (-4)
    InvalidSheet = -4,
    /// Order file could not be decoded (-5)
    ParseError = -5,
    /// Document writer failure (E100)
    WriteFailed = 100,
}

/// Main error type for the export engine.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Missing contact field: {field}")]
    MissingContact { field: &'static str },

    #[error("Order contains no parts")]
    EmptyOrder,

    #[error("Invalid part #{index}: {message}")]
    InvalidPart { index: usize, message: String },

    #[error("Invalid sheet: {message}")]
    InvalidSheet { message: String },

    #[error("Invalid order file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("ZIP archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExportError {
    /// Get the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ExportError::MissingContact { .. } => ErrorCode::MissingContact,
            ExportError::EmptyOrder => ErrorCode::EmptyOrder,
            ExportError::InvalidPart { .. } => ErrorCode::InvalidPart,
            ExportError::InvalidSheet { .. } => ErrorCode::InvalidSheet,
            ExportError::Json(_) => ErrorCode::ParseError,
            ExportError::Zip(_) => ErrorCode::WriteFailed,
            ExportError::Io(_) => ErrorCode::WriteFailed,
        }
    }

    /// Get the numeric error code value.
    pub fn code_value(&self) -> i32 {
        self.code() as i32
    }

    /// Whether the error blocks an export before any document is built.
    pub fn is_blocking(&self) -> bool {
        matches!(
            self,
            ExportError::MissingContact { .. }
                | ExportError::EmptyOrder
                | ExportError::InvalidPart { .. }
                | ExportError::InvalidSheet { .. }
        )
    }
}

/// Result type alias for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;
