//! # Field Format Parser
//!
//! A field's `format` is a compact token `<code>%<parameter>`:
//!
//! | Token | Code | Parameter |
//! |-------|------|-----------|
//! | `f%2` | [`FormatCode::Float`] | `2` (decimals) |
//! | `d%Y-m-d` | [`FormatCode::Date`] | `Y-m-d` |
//! | `s%upper` | [`FormatCode::String`] | `upper` |
//! | `x%` | [`FormatCode::Default`] | empty |
//! | empty | none | empty |
//!
//! The parameter is stored verbatim; interpreting it is the job of whatever
//! consumes the validated blueprint. Parsing is lenient and never fails. A
//! token that cannot be decomposed cleanly is recorded under
//! [`FormatCode::Default`] and rejected later by validation.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::scalar;
use crate::vocabulary::FormatCode;

/// Separator between the code and the parameter of a format token.
pub const FORMAT_SEPARATOR: char = '%';

/// Decoded field format: an optional code plus its parameter.
///
/// `code == None` means no format was given. When a code is present the
/// parameter is required; that pairing is enforced by validation, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldFormat {
    /// Format code, or `None` when the field has no format.
    pub code: Option<FormatCode>,
    /// Parameter text after the separator, verbatim.
    pub parameter: String,
}

impl FieldFormat {
    /// Whether no format code was given.
    pub fn is_unset(&self) -> bool {
        self.code.is_none()
    }

    /// Render back to the compact token form.
    ///
    /// An unset format renders as the empty string. Parsing the result
    /// yields an equal `FieldFormat`.
    pub fn to_token(&self) -> String {
        match self.code {
            None => String::new(),
            Some(code) => format!("{}{FORMAT_SEPARATOR}{}", code.as_str(), self.parameter),
        }
    }
}

/// Parse a compact format token.
///
/// - Empty input yields the unset format.
/// - `s`, `f` and `d` prefixes map to their codes; anything else, and any
///   token with more than one separator, maps to [`FormatCode::Default`].
/// - A non-empty token with no separator maps to `Default` with an empty
///   parameter.
pub fn parse_format_token(token: &str) -> FieldFormat {
    if token.is_empty() {
        return FieldFormat::default();
    }

    match token.split_once(FORMAT_SEPARATOR) {
        Some((prefix, parameter)) => {
            let code = if parameter.contains(FORMAT_SEPARATOR) {
                FormatCode::Default
            } else {
                FormatCode::from_prefix(prefix)
            };
            FieldFormat {
                code: Some(code),
                parameter: parameter.to_string(),
            }
        }
        None => FieldFormat {
            code: Some(FormatCode::Default),
            parameter: String::new(),
        },
    }
}

impl std::fmt::Display for FieldFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_token())
    }
}

impl Serialize for FieldFormat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_token())
    }
}

impl<'de> Deserialize<'de> for FieldFormat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = scalar::text(deserializer)?;
        Ok(parse_format_token(&token))
    }
}
