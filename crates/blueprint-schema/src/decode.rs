//! # Decoder
//!
//! Strict decoding of blueprint YAML into the model.
//!
//! The document is first parsed into a `serde_yaml::Value`, then every
//! mapping is checked against the key set the grammar allows at that level.
//! The first unknown key stops decoding with [`DecodeError::UnknownField`],
//! naming the key and where it was found. Plain scalars under text keys get
//! their source text back (`is: 1.50` stays `"1.50"`). Only then is the
//! value deserialized into [`Blueprint`], which applies defaults and runs
//! the format-token parser for each field.
//!
//! Decoding never checks required-ness, vocabulary membership or
//! cross-field constraints. Those belong to [`crate::validate`].

use serde_yaml::{Mapping, Value};

use blueprint_core::Blueprint;

use crate::error::DecodeError;
use crate::source;

/// Keys allowed at the document root.
pub const ROOT_KEYS: &[&str] = &["version", "meta", "blueprint"];
/// Keys allowed under `meta`.
pub const META_KEYS: &[&str] = &["file"];
/// Keys allowed under `meta.file`.
pub const FILE_KEYS: &[&str] = &["extension", "name"];
/// Keys allowed in a component.
pub const COMPONENT_KEYS: &[&str] = &[
    "name",
    "mandatory",
    "table",
    "page",
    "type",
    "conditions",
    "fields",
];
/// Keys allowed in a condition.
pub const CONDITION_KEYS: &[&str] = &["column", "is", "isNot", "anyOf", "noneOf"];
/// Keys allowed in a field.
pub const FIELD_KEYS: &[&str] = &["name", "position", "type", "format"];

/// Path label for the document root in error messages.
const ROOT_PATH: &str = "(root)";

/// Decode blueprint text.
///
/// # Errors
///
/// - [`DecodeError::Empty`] if the document has no content.
/// - [`DecodeError::UnknownField`] for any key outside the grammar.
/// - [`DecodeError::Syntax`] or [`DecodeError::Scan`] for malformed YAML or
///   mistyped values.
pub fn decode(text: &str) -> Result<Blueprint, DecodeError> {
    if !has_content(text) {
        return Err(DecodeError::Empty);
    }

    let mut document: Value = serde_yaml::from_str(text)?;
    if document.is_null() {
        return Err(DecodeError::Empty);
    }

    check_known_keys(&document)?;

    if let Some(written) = source::parse(text)? {
        source::restore_text(&mut document, &written);
    }

    let blueprint: Blueprint = serde_yaml::from_value(document)?;
    tracing::debug!(
        version = %blueprint.version,
        components = blueprint.components.len(),
        "decoded blueprint"
    );
    Ok(blueprint)
}

/// Decode blueprint bytes, which must be UTF-8.
///
/// # Errors
///
/// [`DecodeError::Encoding`] for non-UTF-8 input, otherwise as [`decode`].
pub fn decode_bytes(bytes: &[u8]) -> Result<Blueprint, DecodeError> {
    decode(std::str::from_utf8(bytes)?)
}

/// Whether any line holds something other than whitespace or a comment.
fn has_content(text: &str) -> bool {
    text.lines().any(|line| {
        let line = line.trim();
        !line.is_empty() && !line.starts_with('#')
    })
}

/// Walk the document and reject the first key outside the grammar.
///
/// Values of the wrong shape (a scalar where a mapping belongs, and so on)
/// are skipped here; deserialization reports them as syntax errors.
fn check_known_keys(document: &Value) -> Result<(), DecodeError> {
    let Some(root) = document.as_mapping() else {
        return Ok(());
    };
    check_mapping(root, ROOT_KEYS, ROOT_PATH)?;

    if let Some(meta) = root.get("meta").and_then(Value::as_mapping) {
        check_mapping(meta, META_KEYS, "meta")?;
        if let Some(file) = meta.get("file").and_then(Value::as_mapping) {
            check_mapping(file, FILE_KEYS, "meta.file")?;
        }
    }

    for (i, component) in mappings(root.get("blueprint")) {
        let path = format!("blueprint[{i}]");
        check_mapping(component, COMPONENT_KEYS, &path)?;

        for (j, condition) in mappings(component.get("conditions")) {
            check_mapping(condition, CONDITION_KEYS, &format!("{path}.conditions[{j}]"))?;
        }
        for (k, field) in mappings(component.get("fields")) {
            check_mapping(field, FIELD_KEYS, &format!("{path}.fields[{k}]"))?;
        }
    }

    Ok(())
}

fn check_mapping(mapping: &Mapping, allowed: &[&str], path: &str) -> Result<(), DecodeError> {
    for key in mapping.keys() {
        let known = key.as_str().is_some_and(|k| allowed.contains(&k));
        if !known {
            return Err(DecodeError::UnknownField {
                path: path.to_string(),
                field: key_text(key),
            });
        }
    }
    Ok(())
}

/// Indexed mapping items of a sequence value; empty for anything else.
fn mappings(value: Option<&Value>) -> impl Iterator<Item = (usize, &Mapping)> {
    value
        .and_then(Value::as_sequence)
        .into_iter()
        .flatten()
        .enumerate()
        .filter_map(|(i, item)| item.as_mapping().map(|m| (i, m)))
}

fn key_text(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null => "~".to_string(),
        other => format!("{other:?}"),
    }
}
