//! Error types for the persona and quote engines.
//!
//! Only caller misuse ([`ClassifyError`]) and reference-data loading
//! ([`CatalogError`]) ever reach a caller.  [`SourceError`] is produced by
//! row sources and consumed inside the aggregator, which recovers from it.

use thiserror::Error;

/// Errors raised by the persona classifier.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClassifyError {
    /// The answer vector has the wrong length or an out-of-range value.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Errors raised while loading persona reference data.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// File I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The reference data is structurally invalid.
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Failures of a tabular row source.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceError {
    /// The source does not exist (e.g. missing file).
    #[error("Source '{source_name}' is unavailable")]
    Unavailable { source_name: String },

    /// The source exists but failed while being read.
    #[error("Error reading '{source_name}': {message}")]
    Read {
        source_name: String,
        message: String,
    },
}

impl SourceError {
    pub fn unavailable(source_name: impl Into<String>) -> Self {
        Self::Unavailable {
            source_name: source_name.into(),
        }
    }

    pub fn read(source_name: impl Into<String>, message: impl ToString) -> Self {
        Self::Read {
            source_name: source_name.into(),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_error_messages() {
        let e = SourceError::unavailable("quotes.csv");
        assert_eq!(e.to_string(), "Source 'quotes.csv' is unavailable");

        let e = SourceError::read("quotes.csv", "bad utf-8 at line 4");
        assert!(e.to_string().contains("line 4"));
    }

    #[test]
    fn test_catalog_error_from_json() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let e: CatalogError = err.into();
        assert!(matches!(e, CatalogError::Json(_)));
    }
}
