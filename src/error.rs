//! Error types for loading, forecasting and writing price tables

use std::path::PathBuf;
use thiserror::Error;

/// Result type for forecaster operations
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Errors that abort a forecast run
#[derive(Error, Debug)]
pub enum ForecastError {
    /// Input unreadable or output unwritable
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed delimited file (ragged rows, bad UTF-8, ...)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A data row with more fields than the header row
    #[error("Row {row} has {found} fields, header has {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A required input column is not in the header row
    #[error("Missing required column '{column}'")]
    MissingColumn { column: String },

    /// A non-missing cell in a numeric column that does not parse as a number
    #[error("Invalid number '{value}' in column '{column}' at row {row}")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },

    /// Unreadable or invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ForecastError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ForecastError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ForecastError::MissingColumn {
            column: "Price_per_SQFT".to_string(),
        };
        assert_eq!(err.to_string(), "Missing required column 'Price_per_SQFT'");

        let err = ForecastError::InvalidNumber {
            row: 3,
            column: "City_Level_Annual_CAGR".to_string(),
            value: "abc".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid number 'abc' in column 'City_Level_Annual_CAGR' at row 3"
        );
    }

    #[test]
    fn test_io_error_names_path() {
        let err = ForecastError::io(
            "missing.csv",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        assert!(err.to_string().contains("missing.csv"));
    }
}
