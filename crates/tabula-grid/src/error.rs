//! Error types for tabula-grid.
//!
//! The row pipeline itself never fails; only configuration loading and
//! export I/O surface errors.

use thiserror::Error;

/// Errors raised by configuration loading and export.
#[derive(Debug, Error)]
pub enum GridError {
    /// YAML configuration could not be parsed.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON configuration could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV encoding failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error while saving an export.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration value out of range.
    #[error("Invalid value for '{field}': {message}")]
    InvalidConfig {
        /// Field name
        field: String,
        /// Error message
        message: String,
    },

    /// A command referenced a column that is not declared.
    #[error("Unknown column: {0}")]
    UnknownColumn(String),
}

impl GridError {
    /// Build an [`GridError::InvalidConfig`].
    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Result alias for fallible grid operations.
pub type GridResult<T> = Result<T, GridError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_error_invalid_config() {
        let err = GridError::invalid("rows_per_page_options", "must not be empty");
        assert_eq!(
            err.to_string(),
            "Invalid value for 'rows_per_page_options': must not be empty"
        );
    }

    #[test]
    fn test_grid_error_unknown_column() {
        let err = GridError::UnknownColumn("owner".to_string());
        assert_eq!(err.to_string(), "Unknown column: owner");
    }

    #[test]
    fn test_grid_error_io_from() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = GridError::from(io_err);
        assert!(matches!(err, GridError::Io(_)));
        assert!(err.to_string().contains("access denied"));
    }

    #[test]
    fn test_grid_error_json_from() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: GridError = json_err.into();
        assert!(err.to_string().starts_with("JSON error"));
    }
}
