//! Store error types.

use std::path::PathBuf;

use thiserror::Error;

/// Store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Table not found: {0}")]
    NotFound(PathBuf),

    #[error("Sheet '{0}' not found in workbook")]
    SheetNotFound(String),

    #[error("Failed to read workbook {path}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("Failed to write workbook {path}: {message}")]
    Write { path: PathBuf, message: String },

    #[error("Sheet error: {0}")]
    Sheet(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::NotFound(PathBuf::from("outputs/results.xlsx"));
        assert_eq!(err.to_string(), "Table not found: outputs/results.xlsx");

        let err = StoreError::SheetNotFound("Data".to_string());
        assert_eq!(err.to_string(), "Sheet 'Data' not found in workbook");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: StoreError = io.into();
        assert!(matches!(err, StoreError::Io(_)));
    }
}
