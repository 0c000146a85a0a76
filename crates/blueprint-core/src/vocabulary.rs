//! # Vocabularies: Enumerated Value Sets
//!
//! Every enumerated attribute of a blueprint draws from one of the sets
//! below. Each set has exactly one definition here; the validation engine
//! checks membership by parsing through [`FromStr`], and downstream
//! consumers match exhaustively on the enums.
//!
//! | Attribute | Enum | Members |
//! |-----------|------|---------|
//! | `meta.file.extension` | [`SupportedFile`] | `xlsx`, `xls`, `csv` |
//! | component `type` | [`ComponentType`] | `hit`, `next` |
//! | field `type` | [`FieldType`] | `int`, `float`, `bool`, `bool-strict`, `date` |
//! | field `format` code | [`FormatCode`] | `s`, `f`, `d`, `default` |
//!
//! Parsing is case-sensitive, matching the schema files as written.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ModelError;

/// Source document formats a blueprint can describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportedFile {
    /// Office Open XML workbook.
    Xlsx,
    /// Legacy binary Excel workbook.
    Xls,
    /// Comma-separated values.
    Csv,
}

impl SupportedFile {
    /// All supported file formats, in canonical order.
    pub fn all() -> &'static [SupportedFile] {
        &[Self::Xlsx, Self::Xls, Self::Csv]
    }

    /// The extension as written in schema files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Xls => "xls",
            Self::Csv => "csv",
        }
    }
}

impl std::fmt::Display for SupportedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SupportedFile {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "xlsx" => Ok(Self::Xlsx),
            "xls" => Ok(Self::Xls),
            "csv" => Ok(Self::Csv),
            other => Err(ModelError::unrecognized("file extension", other)),
        }
    }
}

/// How a component is located in the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    /// The component is the row its conditions match.
    Hit,
    /// The component is the row following the one its conditions match.
    Next,
}

impl ComponentType {
    /// All component types, in canonical order.
    pub fn all() -> &'static [ComponentType] {
        &[Self::Hit, Self::Next]
    }

    /// The type as written in schema files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hit => "hit",
            Self::Next => "next",
        }
    }
}

impl std::fmt::Display for ComponentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComponentType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hit" => Ok(Self::Hit),
            "next" => Ok(Self::Next),
            other => Err(ModelError::unrecognized("component type", other)),
        }
    }
}

/// Value type of an extracted field.
///
/// An absent or empty `type` means the field is an untyped string; that case
/// is represented by `None` at the accessor, not by a variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    /// Signed integer.
    #[serde(rename = "int")]
    Int,
    /// Floating point number.
    #[serde(rename = "float")]
    Float,
    /// Boolean accepting loose spellings (yes/no, 1/0, ...).
    #[serde(rename = "bool")]
    Bool,
    /// Boolean accepting only `true`/`false`.
    #[serde(rename = "bool-strict")]
    BoolStrict,
    /// Calendar date.
    #[serde(rename = "date")]
    Date,
}

impl FieldType {
    /// All field types, in canonical order.
    pub fn all() -> &'static [FieldType] {
        &[
            Self::Int,
            Self::Float,
            Self::Bool,
            Self::BoolStrict,
            Self::Date,
        ]
    }

    /// The type as written in schema files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::BoolStrict => "bool-strict",
            Self::Date => "date",
        }
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "int" => Ok(Self::Int),
            "float" => Ok(Self::Float),
            "bool" => Ok(Self::Bool),
            "bool-strict" => Ok(Self::BoolStrict),
            "date" => Ok(Self::Date),
            other => Err(ModelError::unrecognized("field type", other)),
        }
    }
}

/// Code half of a compact field format such as `f%2`.
///
/// `String`, `Float` and `Date` are the canonical codes. `Default` is what
/// the format parser records when a format was written but its prefix is
/// none of the canonical letters; it round-trips through the model so that
/// validation can reject it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormatCode {
    /// `s`: string format. The parameter is a pattern.
    #[serde(rename = "s")]
    String,
    /// `f`: float format. The parameter is the number of decimals.
    #[serde(rename = "f")]
    Float,
    /// `d`: date format. The parameter is a date pattern.
    #[serde(rename = "d")]
    Date,
    /// A format was given but its code is not recognized.
    #[serde(rename = "default")]
    Default,
}

impl FormatCode {
    /// All format codes, canonical ones first.
    pub fn all() -> &'static [FormatCode] {
        &[Self::String, Self::Float, Self::Date, Self::Default]
    }

    /// The code as written in schema files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "s",
            Self::Float => "f",
            Self::Date => "d",
            Self::Default => "default",
        }
    }

    /// Whether this is one of the three codes a schema may legally use.
    pub fn is_canonical(&self) -> bool {
        !matches!(self, Self::Default)
    }

    /// Map the prefix of a format token to its code.
    ///
    /// Unlike [`FromStr`], this never fails: unknown prefixes are `Default`.
    pub fn from_prefix(prefix: &str) -> Self {
        match prefix {
            "s" => Self::String,
            "f" => Self::Float,
            "d" => Self::Date,
            _ => Self::Default,
        }
    }
}

impl std::fmt::Display for FormatCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormatCode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "s" => Ok(Self::String),
            "f" => Ok(Self::Float),
            "d" => Ok(Self::Date),
            "default" => Ok(Self::Default),
            other => Err(ModelError::unrecognized("format code", other)),
        }
    }
}
