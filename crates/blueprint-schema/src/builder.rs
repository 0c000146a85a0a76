//! # Builder Facade
//!
//! The single entry point from blueprint text to a validated [`Blueprint`].
//! Decoding runs first; a document that fails to decode is never validated.
//! A decoded document is then validated in full, and any violations come
//! back together as one [`ValidationReport`].

use std::path::Path;

use blueprint_core::Blueprint;

use crate::decode::{decode, decode_bytes};
use crate::error::BlueprintError;
use crate::report::aggregate;
use crate::validate::validate;

/// Decode and validate blueprint text.
///
/// # Errors
///
/// - [`BlueprintError::Decode`] if the text cannot be decoded.
/// - [`BlueprintError::Invalid`] with every violation if validation fails.
pub fn build(text: &str) -> Result<Blueprint, BlueprintError> {
    let blueprint = decode(text)?;
    check(blueprint)
}

/// Decode and validate UTF-8 blueprint bytes.
///
/// # Errors
///
/// As [`build`], plus [`DecodeError::Encoding`](crate::DecodeError::Encoding)
/// for non-UTF-8 input.
pub fn build_from_bytes(bytes: &[u8]) -> Result<Blueprint, BlueprintError> {
    let blueprint = decode_bytes(bytes)?;
    check(blueprint)
}

/// Read a blueprint file, then decode and validate it.
///
/// # Errors
///
/// [`BlueprintError::Io`] with the read error unchanged if the file cannot
/// be read, otherwise as [`build_from_bytes`].
pub fn build_from_path(path: impl AsRef<Path>) -> Result<Blueprint, BlueprintError> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "reading blueprint");
    let bytes = std::fs::read(path)?;
    build_from_bytes(&bytes)
}

fn check(blueprint: Blueprint) -> Result<Blueprint, BlueprintError> {
    match aggregate(validate(&blueprint)) {
        Some(report) => {
            tracing::debug!(errors = report.len(), "blueprint rejected");
            Err(BlueprintError::Invalid(report))
        }
        None => Ok(blueprint),
    }
}
