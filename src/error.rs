//! Error types for the pdf-loom pipeline.

use thiserror::Error;

/// Result type alias for pdf-loom operations.
pub type Result<T> = std::result::Result<T, Error>;

/// A single failed payload check, surfaced verbatim to the caller.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct FieldError {
    /// Dotted path of the offending field, e.g. `invoice.number`.
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Error types that can occur while assembling or rendering a document.
#[derive(Error, Debug)]
pub enum Error {
    /// Unknown design, page size, or an impossible layout constant.
    #[error("configuration error: {0}")]
    Config(String),

    /// The caller payload violates one or more declared field constraints.
    /// Never recovered; each entry names the field it refers to.
    #[error("payload validation failed ({} field{})", .0.len(), if .0.len() == 1 { "" } else { "s" })]
    Validation(Vec<FieldError>),

    /// A referenced asset (logo image) could not be retrieved or decoded.
    /// Recovered locally by omitting the asset from the document.
    #[error("asset fetch failed: {0}")]
    AssetFetch(String),

    /// The PDF backend failed to serialise the document.
    #[error("render error: {0}")]
    Render(String),

    /// I/O error when reading payloads or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Convenience constructor for single-field validation failures.
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Validation(vec![FieldError::new(field, message)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_display_counts_fields() {
        let err = Error::Validation(vec![
            FieldError::new("invoice.number", "too long"),
            FieldError::new("filename", "too long"),
        ]);
        assert_eq!(err.to_string(), "payload validation failed (2 fields)");

        let err = Error::invalid_field("invoice.tax", "cannot be greater than 10");
        assert_eq!(err.to_string(), "payload validation failed (1 field)");
    }

    #[test]
    fn field_error_display() {
        let fe = FieldError::new("invoice.subtotal", "cannot be greater than 9999");
        assert_eq!(
            fe.to_string(),
            "invoice.subtotal: cannot be greater than 9999"
        );
    }
}
