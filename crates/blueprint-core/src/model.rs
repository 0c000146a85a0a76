//! # Blueprint Model
//!
//! The typed tree a blueprint document decodes into:
//!
//! ```text
//! Blueprint
//! ├── version
//! ├── meta: Metadata
//! │   └── file: File { extension, name }
//! └── blueprint: [Component]
//!     ├── name, mandatory, table, page, type
//!     ├── conditions: [Condition { column, is, isNot, anyOf, noneOf }]
//!     └── fields: [Field { name, position, type, format }]
//! ```
//!
//! Serde names follow the schema grammar (`meta`, `blueprint`, `isNot`, ...);
//! Rust names follow the model. Every struct denies unknown keys. Absent
//! optional attributes take their defaults (`false`, `0`, empty), and a key
//! written with no value decodes like an absent one.
//!
//! The tree is a plain owned value. Nothing here checks required-ness or
//! vocabulary membership; a decoded tree may be invalid until the validation
//! engine in `blueprint-schema` has accepted it.

use serde::{Deserialize, Serialize};

use crate::format::FieldFormat;
use crate::scalar;
use crate::vocabulary::{ComponentType, FieldType, SupportedFile};

/// Root of a blueprint document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Blueprint {
    /// Schema version, as written.
    #[serde(default, deserialize_with = "scalar::text")]
    pub version: String,

    /// Description of the source document.
    #[serde(rename = "meta", default)]
    pub metadata: Option<Metadata>,

    /// Components in declaration order.
    #[serde(rename = "blueprint", default, deserialize_with = "scalar::or_default")]
    pub components: Vec<Component>,
}

impl Blueprint {
    /// Look up the first component with the given name.
    pub fn component(&self, name: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.name == name)
    }

    /// The file descriptor, if both `meta` and `meta.file` are present.
    pub fn file(&self) -> Option<&File> {
        self.metadata.as_ref().and_then(|m| m.file.as_ref())
    }

    /// Total number of conditions across all components.
    pub fn condition_count(&self) -> usize {
        self.components.iter().map(|c| c.conditions.len()).sum()
    }

    /// Total number of fields across all components.
    pub fn field_count(&self) -> usize {
        self.components.iter().map(|c| c.fields.len()).sum()
    }
}

/// Description of the source document a blueprint reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Metadata {
    /// The source file descriptor.
    #[serde(default)]
    pub file: Option<File>,
}

/// Source file descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct File {
    /// File extension, raw. See [`File::supported_file`].
    #[serde(default, deserialize_with = "scalar::text")]
    pub extension: String,

    /// File name.
    #[serde(default, deserialize_with = "scalar::text")]
    pub name: String,
}

impl File {
    /// The extension as a [`SupportedFile`], if recognized.
    pub fn supported_file(&self) -> Option<SupportedFile> {
        self.extension.parse().ok()
    }
}

/// A named region of the source document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Component {
    /// Component name.
    #[serde(default, deserialize_with = "scalar::text")]
    pub name: String,

    /// Whether extraction must find this component.
    #[serde(default, deserialize_with = "scalar::or_default")]
    pub mandatory: bool,

    /// Whether the component repeats as table rows.
    #[serde(default, deserialize_with = "scalar::or_default")]
    pub table: bool,

    /// Zero-based page (sheet) index.
    #[serde(default, deserialize_with = "scalar::or_default")]
    pub page: u32,

    /// Component type, raw. See [`Component::component_type`].
    #[serde(rename = "type", default, deserialize_with = "scalar::text")]
    pub kind: String,

    /// Conditions selecting the row this component applies to.
    #[serde(default, deserialize_with = "scalar::or_default")]
    pub conditions: Vec<Condition>,

    /// Fields extracted from the matched row.
    #[serde(default, deserialize_with = "scalar::or_default")]
    pub fields: Vec<Field>,
}

impl Component {
    /// The type as a [`ComponentType`], if recognized.
    pub fn component_type(&self) -> Option<ComponentType> {
        self.kind.parse().ok()
    }

    /// Look up the first field with the given name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A predicate over one or more columns of a row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Condition {
    /// Zero-based columns the predicates inspect.
    #[serde(default, deserialize_with = "scalar::or_default")]
    pub column: Vec<u32>,

    /// Cell must equal this text.
    #[serde(default, deserialize_with = "scalar::text", skip_serializing_if = "String::is_empty")]
    pub is: String,

    /// Cell must not equal this text.
    #[serde(
        rename = "isNot",
        default,
        deserialize_with = "scalar::text",
        skip_serializing_if = "String::is_empty"
    )]
    pub is_not: String,

    /// Cell must equal one of these alternatives.
    #[serde(
        rename = "anyOf",
        default,
        deserialize_with = "scalar::text",
        skip_serializing_if = "String::is_empty"
    )]
    pub any_of: String,

    /// Cell must equal none of these alternatives.
    #[serde(
        rename = "noneOf",
        default,
        deserialize_with = "scalar::text",
        skip_serializing_if = "String::is_empty"
    )]
    pub none_of: String,
}

impl Condition {
    /// Non-empty predicates as `(key, text)` pairs, in declaration order.
    pub fn predicates(&self) -> Vec<(&'static str, &str)> {
        [
            ("is", self.is.as_str()),
            ("isNot", self.is_not.as_str()),
            ("anyOf", self.any_of.as_str()),
            ("noneOf", self.none_of.as_str()),
        ]
        .into_iter()
        .filter(|(_, text)| !text.is_empty())
        .collect()
    }

    /// Whether at least one predicate is non-empty.
    pub fn has_predicate(&self) -> bool {
        !self.predicates().is_empty()
    }
}

/// A single value extracted from a component's row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Field {
    /// Field name.
    #[serde(default, deserialize_with = "scalar::text")]
    pub name: String,

    /// One-based column position.
    #[serde(default, deserialize_with = "scalar::or_default")]
    pub position: u32,

    /// Value type, raw. Empty means untyped. See [`Field::field_type`].
    #[serde(rename = "type", default, deserialize_with = "scalar::text")]
    pub kind: String,

    /// Compact format, unset when absent.
    #[serde(default)]
    pub format: FieldFormat,
}

impl Field {
    /// The type as a [`FieldType`]; `None` when untyped or unrecognized.
    pub fn field_type(&self) -> Option<FieldType> {
        self.kind.parse().ok()
    }

    /// Whether the field has no declared type.
    pub fn is_untyped(&self) -> bool {
        self.kind.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocabulary::FormatCode;
    use serde_json::json;

    fn sample() -> Blueprint {
        serde_json::from_value(json!({
            "version": "1.0",
            "meta": { "file": { "extension": "csv", "name": "statement" } },
            "blueprint": [
                {
                    "name": "header",
                    "type": "hit",
                    "conditions": [ { "column": [0], "is": "Account" } ],
                    "fields": [ { "name": "account", "position": 2 } ]
                },
                {
                    "name": "rows",
                    "type": "next",
                    "table": true,
                    "fields": [
                        { "name": "amount", "position": 3, "type": "float", "format": "f%2" },
                        { "name": "date", "position": 1, "type": "date", "format": "d%Y-m-d" }
                    ]
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_defaults_for_absent_attributes() {
        let bp = sample();
        let header = bp.component("header").unwrap();
        assert!(!header.mandatory);
        assert!(!header.table);
        assert_eq!(header.page, 0);
        let rows = bp.component("rows").unwrap();
        assert!(rows.conditions.is_empty());
        assert!(rows.table);
    }

    #[test]
    fn test_typed_accessors() {
        let bp = sample();
        assert_eq!(bp.file().unwrap().supported_file(), Some(SupportedFile::Csv));
        assert_eq!(
            bp.component("rows").unwrap().component_type(),
            Some(ComponentType::Next)
        );
        let amount = bp.component("rows").unwrap().field("amount").unwrap();
        assert_eq!(amount.field_type(), Some(FieldType::Float));
        assert_eq!(amount.format.code, Some(FormatCode::Float));
        assert_eq!(amount.format.parameter, "2");
        let account = bp.component("header").unwrap().field("account").unwrap();
        assert!(account.is_untyped());
        assert!(account.format.is_unset());
    }

    #[test]
    fn test_unrecognized_values_are_kept_raw() {
        let file = File {
            extension: "exe".to_string(),
            name: "x".to_string(),
        };
        assert_eq!(file.supported_file(), None);
        assert_eq!(file.extension, "exe");
    }

    #[test]
    fn test_counts() {
        let bp = sample();
        assert_eq!(bp.components.len(), 2);
        assert_eq!(bp.condition_count(), 1);
        assert_eq!(bp.field_count(), 3);
    }

    #[test]
    fn test_condition_predicates_in_declaration_order() {
        let condition = Condition {
            column: vec![1],
            none_of: "b".to_string(),
            is: "a".to_string(),
            ..Condition::default()
        };
        assert_eq!(condition.predicates(), vec![("is", "a"), ("noneOf", "b")]);
        assert!(condition.has_predicate());
        assert!(!Condition::default().has_predicate());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result: Result<Field, _> =
            serde_json::from_value(json!({ "name": "x", "position": 1, "width": 3 }));
        assert!(result.is_err());
    }

    #[test]
    fn test_null_values_take_defaults() {
        let component: Component = serde_json::from_value(json!({
            "name": "c",
            "mandatory": null,
            "page": null,
            "conditions": null,
            "fields": null
        }))
        .unwrap();
        assert!(!component.mandatory);
        assert_eq!(component.page, 0);
        assert!(component.conditions.is_empty());
        assert!(component.fields.is_empty());
    }

    #[test]
    fn test_scalar_text_coercion() {
        let condition: Condition =
            serde_json::from_value(json!({ "column": [0], "is": 100, "isNot": true })).unwrap();
        assert_eq!(condition.is, "100");
        assert_eq!(condition.is_not, "true");
        let bp: Blueprint = serde_json::from_value(json!({ "version": 1.0 })).unwrap();
        assert_eq!(bp.version, "1.0");
    }

    #[test]
    fn test_serialize_uses_schema_names() {
        let value = serde_json::to_value(sample()).unwrap();
        assert!(value.get("meta").is_some());
        assert!(value.get("blueprint").is_some());
        assert_eq!(value["blueprint"][1]["fields"][0]["format"], "f%2");
        assert_eq!(value["blueprint"][0]["type"], "hit");
        assert!(value["blueprint"][0]["conditions"][0].get("isNot").is_none());
    }
}
