//! # Error Types
//!
//! Errors raised by the model layer. Decoding and validation errors live in
//! `blueprint-schema`; this crate only fails when text is converted into a
//! vocabulary enum it does not recognize.

use thiserror::Error;

/// Error produced by the blueprint model layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// The text is not a member of the named vocabulary.
    #[error("unrecognized {kind}: {value:?}")]
    Unrecognized {
        /// Vocabulary that was consulted (e.g. "file extension").
        kind: &'static str,
        /// The rejected text, verbatim.
        value: String,
    },
}

impl ModelError {
    pub(crate) fn unrecognized(kind: &'static str, value: &str) -> Self {
        Self::Unrecognized {
            kind,
            value: value.to_string(),
        }
    }
}
