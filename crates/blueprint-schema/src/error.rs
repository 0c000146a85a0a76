//! # Error Types
//!
//! Two disjoint classes: [`DecodeError`] for text that cannot be decoded
//! into the model, and [`BlueprintError::Invalid`] for decoded blueprints
//! that break validation rules. [`BlueprintError`] is what the facade
//! returns and wraps whichever class occurred, plus I/O failures reading
//! the source unchanged.

use thiserror::Error;

use crate::report::ValidationReport;

/// Error decoding blueprint text into the model.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The document has no content (empty, whitespace or comments only).
    #[error("blueprint document is empty")]
    Empty,

    /// The source bytes are not UTF-8.
    #[error("blueprint document is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    /// A key outside the blueprint grammar was found.
    #[error("unknown field `{field}` at {path}")]
    UnknownField {
        /// Location of the mapping holding the key, e.g. `blueprint[0].fields[2]`.
        path: String,
        /// The unrecognized key.
        field: String,
    },

    /// Malformed YAML, or a value of the wrong type for its key.
    #[error("malformed blueprint document: {0}")]
    Syntax(#[from] serde_yaml::Error),

    /// The document could not be re-read for its source scalar text.
    #[error("malformed blueprint document: {0}")]
    Scan(#[from] yaml_rust::scanner::ScanError),
}

impl DecodeError {
    /// Whether this is an unknown-field rejection.
    pub fn is_unknown_field(&self) -> bool {
        matches!(self, Self::UnknownField { .. })
    }
}

/// Error returned by the build facade.
#[derive(Error, Debug)]
pub enum BlueprintError {
    /// Reading the blueprint source failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The text could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The blueprint decoded but broke one or more validation rules.
    #[error("{0}")]
    Invalid(ValidationReport),
}

impl BlueprintError {
    /// The validation report, if this is a validation failure.
    pub fn report(&self) -> Option<&ValidationReport> {
        match self {
            Self::Invalid(report) => Some(report),
            _ => None,
        }
    }
}

impl From<ValidationReport> for BlueprintError {
    fn from(report: ValidationReport) -> Self {
        Self::Invalid(report)
    }
}
