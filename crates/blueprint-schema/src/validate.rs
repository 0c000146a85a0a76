//! # Validation Engine
//!
//! Semantic validation of a decoded [`Blueprint`].
//!
//! ## Rule Tables
//!
//! A [`RuleSet`] holds one [`RuleTable`] per model type. A table has two kinds
//! of entries, applied in registration order:
//!
//! - **Attribute rules** read one attribute of the node and run an ordered
//!   list of checks on it. Only the first failing check of an attribute is
//!   reported, so a blank extension is `required`, not also unsupported.
//! - **Node rules** are predicates over the whole node, for constraints that
//!   span attributes (a condition needs at least one predicate, a format code
//!   needs a parameter).
//!
//! The walk is pre-order in declaration order: a node's own rules, then its
//! children. Every violation is collected; nothing stops the walk early.
//!
//! ## Rule Identifiers
//!
//! | Rule | Applies to |
//! |------|------------|
//! | `required` | Version, Metadata, Metadata.File, File.Extension, File.Name, Components, component Name and Fields, condition Column, field Name and Position |
//! | `is-supported-file` | File.Extension |
//! | `is-valid-component-type` | component Type |
//! | `is-valid-field-type` | field Type |
//! | `is-valid-field-format` | field Format.Code |
//! | `no-condition` | condition (is / isNot / anyOf / noneOf) |
//! | `required-with-code` | field Format.Parameter |
//!
//! ## Thread Safety
//!
//! A `RuleSet` holds only `fn` pointers and static strings. It is built per
//! call by [`validate`] and shares nothing with other calls.

use std::fmt;

use serde::Serialize;

use blueprint_core::{
    Blueprint, Component, ComponentType, Condition, Field, FieldFormat, FieldType, File,
    Metadata, SupportedFile,
};

/// Stable rule identifiers carried by violations.
pub mod rule {
    /// Attribute must be present and non-empty / non-zero.
    pub const REQUIRED: &str = "required";
    /// File extension must be a supported format.
    pub const IS_SUPPORTED_FILE: &str = "is-supported-file";
    /// Component type must be `hit` or `next`.
    pub const IS_VALID_COMPONENT_TYPE: &str = "is-valid-component-type";
    /// Field type must be a known type or empty.
    pub const IS_VALID_FIELD_TYPE: &str = "is-valid-field-type";
    /// Format code must be `s`, `f`, `d` or unset.
    pub const IS_VALID_FIELD_FORMAT: &str = "is-valid-field-format";
    /// At least one condition predicate must be non-empty.
    pub const NO_CONDITION: &str = "no-condition";
    /// A format code requires a non-empty parameter.
    pub const REQUIRED_WITH_CODE: &str = "required-with-code";
}

/// One rule failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Location of the offending node, e.g. `Components[2].Fields[0].Name`.
    pub path: String,
    /// Stable rule identifier, see [`rule`].
    pub rule: &'static str,
    /// The offending value as text; empty when absent.
    pub value: String,
}

impl Violation {
    /// Final path segment without any index, e.g. `Extension` for
    /// `Metadata.File.Extension`.
    pub fn attribute(&self) -> &str {
        let last = self.path.rsplit('.').next().unwrap_or(&self.path);
        match last.find('[') {
            Some(i) if i > 0 => &last[..i],
            _ => last,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} (value \"{}\")", self.path, self.rule, self.value)
    }
}

/// An attribute as seen by the checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attr<'a> {
    /// Text attribute.
    Text(&'a str),
    /// Unsigned integer attribute.
    Number(u64),
    /// Sequence attribute, by length.
    List(usize),
    /// Child node, by presence.
    Node(bool),
}

impl Attr<'_> {
    /// Whether the attribute holds its zero value.
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::Number(n) => *n == 0,
            Self::List(len) => *len == 0,
            Self::Node(present) => !present,
        }
    }

    fn render(&self) -> String {
        match self {
            Self::Text(s) => (*s).to_string(),
            Self::Number(n) => n.to_string(),
            Self::List(0) => "[]".to_string(),
            Self::List(len) => format!("[{len} items]"),
            Self::Node(true) => "{...}".to_string(),
            Self::Node(false) => String::new(),
        }
    }
}

/// A named predicate over one attribute.
#[derive(Clone, Copy)]
pub struct Check {
    /// Rule identifier reported when the predicate fails.
    pub rule: &'static str,
    test: fn(&Attr<'_>) -> bool,
}

impl Check {
    /// Attribute is non-empty / non-zero / present.
    pub const REQUIRED: Check = Check {
        rule: rule::REQUIRED,
        test: is_present,
    };
    /// Text parses as a [`SupportedFile`].
    pub const SUPPORTED_FILE: Check = Check {
        rule: rule::IS_SUPPORTED_FILE,
        test: is_supported_file,
    };
    /// Text parses as a [`ComponentType`].
    pub const COMPONENT_TYPE: Check = Check {
        rule: rule::IS_VALID_COMPONENT_TYPE,
        test: is_valid_component_type,
    };
    /// Text is empty or parses as a [`FieldType`].
    pub const FIELD_TYPE: Check = Check {
        rule: rule::IS_VALID_FIELD_TYPE,
        test: is_valid_field_type,
    };
    /// Text is empty or a canonical format code.
    pub const FIELD_FORMAT: Check = Check {
        rule: rule::IS_VALID_FIELD_FORMAT,
        test: is_valid_field_format,
    };

    /// Whether the attribute passes.
    pub fn passes(&self, attr: &Attr<'_>) -> bool {
        (self.test)(attr)
    }
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Check").field("rule", &self.rule).finish()
    }
}

fn is_present(attr: &Attr<'_>) -> bool {
    !attr.is_zero()
}

fn text<'a>(attr: &Attr<'a>) -> Option<&'a str> {
    match attr {
        Attr::Text(s) => Some(*s),
        _ => None,
    }
}

fn is_supported_file(attr: &Attr<'_>) -> bool {
    text(attr).is_some_and(|s| s.parse::<SupportedFile>().is_ok())
}

fn is_valid_component_type(attr: &Attr<'_>) -> bool {
    text(attr).is_some_and(|s| s.parse::<ComponentType>().is_ok())
}

fn is_valid_field_type(attr: &Attr<'_>) -> bool {
    text(attr).is_some_and(|s| s.is_empty() || s.parse::<FieldType>().is_ok())
}

fn is_valid_field_format(attr: &Attr<'_>) -> bool {
    text(attr).is_some_and(|s| {
        s.is_empty()
            || s.parse::<blueprint_core::FormatCode>()
                .is_ok_and(|code| code.is_canonical())
    })
}

struct AttributeRule<T> {
    attribute: &'static str,
    read: fn(&T) -> Attr<'_>,
    checks: Vec<Check>,
}

struct NodeRule<T> {
    rule: &'static str,
    attribute: &'static str,
    test: fn(&T) -> bool,
    value: fn(&T) -> String,
}

/// Rules registered against one model type.
pub struct RuleTable<T> {
    attributes: Vec<AttributeRule<T>>,
    nodes: Vec<NodeRule<T>>,
}

impl<T> Default for RuleTable<T> {
    fn default() -> Self {
        Self {
            attributes: Vec::new(),
            nodes: Vec::new(),
        }
    }
}

impl<T> RuleTable<T> {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register checks on an attribute. Checks run in order; the first
    /// failure is reported.
    pub fn attribute(
        mut self,
        attribute: &'static str,
        read: fn(&T) -> Attr<'_>,
        checks: &[Check],
    ) -> Self {
        self.attributes.push(AttributeRule {
            attribute,
            read,
            checks: checks.to_vec(),
        });
        self
    }

    /// Register a predicate over the whole node. `attribute` is the path
    /// segment reported on failure and `value` renders the offending value.
    pub fn node(
        mut self,
        rule: &'static str,
        attribute: &'static str,
        test: fn(&T) -> bool,
        value: fn(&T) -> String,
    ) -> Self {
        self.nodes.push(NodeRule {
            rule,
            attribute,
            test,
            value,
        });
        self
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.attributes.len() + self.nodes.len()
    }

    /// Whether no rules are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Apply every rule to `node`, appending failures under `path`.
    pub fn apply(&self, node: &T, path: &str, out: &mut Vec<Violation>) {
        for rule in &self.attributes {
            let attr = (rule.read)(node);
            if let Some(check) = rule.checks.iter().find(|c| !c.passes(&attr)) {
                out.push(Violation {
                    path: join(path, rule.attribute),
                    rule: check.rule,
                    value: attr.render(),
                });
            }
        }
        for rule in &self.nodes {
            if !(rule.test)(node) {
                out.push(Violation {
                    path: join(path, rule.attribute),
                    rule: rule.rule,
                    value: (rule.value)(node),
                });
            }
        }
    }
}

fn join(base: &str, segment: &str) -> String {
    if base.is_empty() {
        segment.to_string()
    } else {
        format!("{base}.{segment}")
    }
}

/// The complete set of blueprint rules, one table per model type.
pub struct RuleSet {
    blueprint: RuleTable<Blueprint>,
    metadata: RuleTable<Metadata>,
    file: RuleTable<File>,
    component: RuleTable<Component>,
    condition: RuleTable<Condition>,
    field: RuleTable<Field>,
    format: RuleTable<FieldFormat>,
}

impl RuleSet {
    /// The standard blueprint rules.
    pub fn standard() -> Self {
        Self {
            blueprint: RuleTable::<Blueprint>::new()
                .attribute("Version", |b| Attr::Text(&b.version), &[Check::REQUIRED])
                .attribute("Metadata", |b| Attr::Node(b.metadata.is_some()), &[Check::REQUIRED])
                .attribute("Components", |b| Attr::List(b.components.len()), &[Check::REQUIRED]),
            metadata: RuleTable::<Metadata>::new()
                .attribute("File", |m| Attr::Node(m.file.is_some()), &[Check::REQUIRED]),
            file: RuleTable::<File>::new()
                .attribute(
                    "Extension",
                    |f| Attr::Text(&f.extension),
                    &[Check::REQUIRED, Check::SUPPORTED_FILE],
                )
                .attribute("Name", |f| Attr::Text(&f.name), &[Check::REQUIRED]),
            component: RuleTable::<Component>::new()
                .attribute("Name", |c| Attr::Text(&c.name), &[Check::REQUIRED])
                .attribute("Type", |c| Attr::Text(&c.kind), &[Check::COMPONENT_TYPE])
                .attribute("Fields", |c| Attr::List(c.fields.len()), &[Check::REQUIRED]),
            condition: RuleTable::<Condition>::new()
                .attribute("Column", |c| Attr::List(c.column.len()), &[Check::REQUIRED])
                .node(
                    rule::NO_CONDITION,
                    "{Is,IsNot,AnyOf,NoneOf}",
                    Condition::has_predicate,
                    |c| c.is.clone(),
                ),
            field: RuleTable::<Field>::new()
                .attribute("Name", |f| Attr::Text(&f.name), &[Check::REQUIRED])
                .attribute(
                    "Position",
                    |f| Attr::Number(u64::from(f.position)),
                    &[Check::REQUIRED],
                )
                .attribute("Type", |f| Attr::Text(&f.kind), &[Check::FIELD_TYPE]),
            format: RuleTable::<FieldFormat>::new()
                .attribute(
                    "Code",
                    |f| Attr::Text(f.code.map_or("", |c| c.as_str())),
                    &[Check::FIELD_FORMAT],
                )
                .node(
                    rule::REQUIRED_WITH_CODE,
                    "Parameter",
                    |f| f.code.is_none() || !f.parameter.is_empty(),
                    |f| f.parameter.clone(),
                ),
        }
    }

    /// Total number of registered rules.
    pub fn len(&self) -> usize {
        self.blueprint.len()
            + self.metadata.len()
            + self.file.len()
            + self.component.len()
            + self.condition.len()
            + self.field.len()
            + self.format.len()
    }

    /// Whether the set has no rules.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Walk the whole tree and collect every violation, in traversal order.
    pub fn validate(&self, blueprint: &Blueprint) -> Vec<Violation> {
        let mut out = Vec::new();

        self.blueprint.apply(blueprint, "", &mut out);

        if let Some(metadata) = &blueprint.metadata {
            self.metadata.apply(metadata, "Metadata", &mut out);
            if let Some(file) = &metadata.file {
                self.file.apply(file, "Metadata.File", &mut out);
            }
        }

        for (i, component) in blueprint.components.iter().enumerate() {
            let path = format!("Components[{i}]");
            self.component.apply(component, &path, &mut out);

            for (j, condition) in component.conditions.iter().enumerate() {
                self.condition
                    .apply(condition, &format!("{path}.Conditions[{j}]"), &mut out);
            }

            for (k, field) in component.fields.iter().enumerate() {
                let field_path = format!("{path}.Fields[{k}]");
                self.field.apply(field, &field_path, &mut out);
                self.format
                    .apply(&field.format, &format!("{field_path}.Format"), &mut out);
            }
            tracing::trace!(component = %path, "validated component");
        }

        out
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}

/// Validate with a freshly built standard [`RuleSet`].
///
/// An empty result means the blueprint is valid.
pub fn validate(blueprint: &Blueprint) -> Vec<Violation> {
    let violations = RuleSet::standard().validate(blueprint);
    tracing::debug!(violations = violations.len(), "validated blueprint");
    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use blueprint_core::parse_format_token;

    fn field(name: &str, position: u32) -> Field {
        Field {
            name: name.to_string(),
            position,
            ..Field::default()
        }
    }

    fn valid() -> Blueprint {
        Blueprint {
            version: "1.0".to_string(),
            metadata: Some(Metadata {
                file: Some(File {
                    extension: "csv".to_string(),
                    name: "statement".to_string(),
                }),
            }),
            components: vec![Component {
                name: "header".to_string(),
                kind: "hit".to_string(),
                conditions: vec![Condition {
                    column: vec![0],
                    is: "Account".to_string(),
                    ..Condition::default()
                }],
                fields: vec![field("account", 2)],
                ..Component::default()
            }],
        }
    }

    fn rules_at(violations: &[Violation]) -> Vec<(&str, &str)> {
        violations
            .iter()
            .map(|v| (v.path.as_str(), v.rule))
            .collect()
    }

    #[test]
    fn test_valid_blueprint_has_no_violations() {
        assert!(validate(&valid()).is_empty());
    }

    #[test]
    fn test_empty_blueprint_reports_top_level_requirements() {
        let violations = validate(&Blueprint::default());
        assert_eq!(
            rules_at(&violations),
            vec![
                ("Version", rule::REQUIRED),
                ("Metadata", rule::REQUIRED),
                ("Components", rule::REQUIRED),
            ]
        );
        assert_eq!(violations[2].value, "[]");
    }

    #[test]
    fn test_missing_file() {
        let mut bp = valid();
        bp.metadata = Some(Metadata { file: None });
        assert_eq!(rules_at(&validate(&bp)), vec![("Metadata.File", rule::REQUIRED)]);
    }

    #[test]
    fn test_unsupported_extension() {
        let mut bp = valid();
        bp.metadata.as_mut().unwrap().file.as_mut().unwrap().extension = "exe".to_string();
        let violations = validate(&bp);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].path, "Metadata.File.Extension");
        assert_eq!(violations[0].rule, rule::IS_SUPPORTED_FILE);
        assert_eq!(violations[0].value, "exe");
    }

    #[test]
    fn test_blank_extension_is_required_only() {
        let mut bp = valid();
        bp.metadata.as_mut().unwrap().file.as_mut().unwrap().extension.clear();
        assert_eq!(
            rules_at(&validate(&bp)),
            vec![("Metadata.File.Extension", rule::REQUIRED)]
        );
    }

    #[test]
    fn test_component_type() {
        let mut bp = valid();
        bp.components[0].kind = "sideways".to_string();
        assert_eq!(
            rules_at(&validate(&bp)),
            vec![("Components[0].Type", rule::IS_VALID_COMPONENT_TYPE)]
        );

        bp.components[0].kind.clear();
        let violations = validate(&bp);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule, rule::IS_VALID_COMPONENT_TYPE);
        assert_eq!(violations[0].value, "");
    }

    #[test]
    fn test_component_without_fields() {
        let mut bp = valid();
        bp.components[0].fields.clear();
        assert_eq!(
            rules_at(&validate(&bp)),
            vec![("Components[0].Fields", rule::REQUIRED)]
        );
    }

    #[test]
    fn test_condition_without_predicates() {
        let mut bp = valid();
        bp.components[0].conditions.push(Condition {
            column: vec![3],
            ..Condition::default()
        });
        let violations = validate(&bp);
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].path,
            "Components[0].Conditions[1].{Is,IsNot,AnyOf,NoneOf}"
        );
        assert_eq!(violations[0].rule, rule::NO_CONDITION);
    }

    #[test]
    fn test_any_single_predicate_satisfies_condition() {
        let setters: [fn(&mut Condition); 4] = [
            |c| c.is = "x".to_string(),
            |c| c.is_not = "x".to_string(),
            |c| c.any_of = "x".to_string(),
            |c| c.none_of = "x".to_string(),
        ];
        for set in setters {
            let mut bp = valid();
            let mut condition = Condition {
                column: vec![0],
                ..Condition::default()
            };
            set(&mut condition);
            bp.components[0].conditions = vec![condition];
            assert!(validate(&bp).is_empty());
        }
    }

    #[test]
    fn test_condition_without_columns() {
        let mut bp = valid();
        bp.components[0].conditions[0].column.clear();
        assert_eq!(
            rules_at(&validate(&bp)),
            vec![("Components[0].Conditions[0].Column", rule::REQUIRED)]
        );
    }

    #[test]
    fn test_field_requirements() {
        let mut bp = valid();
        bp.components[0].fields.push(field("", 0));
        assert_eq!(
            rules_at(&validate(&bp)),
            vec![
                ("Components[0].Fields[1].Name", rule::REQUIRED),
                ("Components[0].Fields[1].Position", rule::REQUIRED),
            ]
        );
    }

    #[test]
    fn test_field_types() {
        for ok in ["", "int", "float", "bool", "bool-strict", "date"] {
            let mut bp = valid();
            bp.components[0].fields[0].kind = ok.to_string();
            assert!(validate(&bp).is_empty(), "type {ok:?} should be valid");
        }
        let mut bp = valid();
        bp.components[0].fields[0].kind = "decimal".to_string();
        assert_eq!(
            rules_at(&validate(&bp)),
            vec![("Components[0].Fields[0].Type", rule::IS_VALID_FIELD_TYPE)]
        );
    }

    #[test]
    fn test_canonical_formats_pass() {
        for token in ["", "s%upper", "f%2", "d%Y-m-d"] {
            let mut bp = valid();
            bp.components[0].fields[0].format = parse_format_token(token);
            assert!(validate(&bp).is_empty(), "format {token:?} should be valid");
        }
    }

    #[test]
    fn test_canonical_code_without_parameter() {
        let mut bp = valid();
        bp.components[0].fields[0].format = parse_format_token("f%");
        let violations = validate(&bp);
        assert_eq!(
            rules_at(&violations),
            vec![("Components[0].Fields[0].Format.Parameter", rule::REQUIRED_WITH_CODE)]
        );
        assert_eq!(violations[0].attribute(), "Parameter");
    }

    #[test]
    fn test_unknown_code_without_parameter() {
        let mut bp = valid();
        bp.components[0].fields[0].format = parse_format_token("x%");
        let violations = validate(&bp);
        assert_eq!(
            rules_at(&violations),
            vec![
                ("Components[0].Fields[0].Format.Code", rule::IS_VALID_FIELD_FORMAT),
                ("Components[0].Fields[0].Format.Parameter", rule::REQUIRED_WITH_CODE),
            ]
        );
        assert_eq!(violations[0].value, "default");
    }

    #[test]
    fn test_parameter_without_code_is_allowed() {
        let mut bp = valid();
        bp.components[0].fields[0].format = FieldFormat {
            code: None,
            parameter: "2".to_string(),
        };
        assert!(validate(&bp).is_empty());
    }

    #[test]
    fn test_violations_follow_declaration_order() {
        let mut bp = valid();
        bp.version.clear();
        bp.components.push(Component {
            name: String::new(),
            kind: "hit".to_string(),
            conditions: vec![Condition::default()],
            fields: vec![field("", 1)],
            ..Component::default()
        });
        assert_eq!(
            rules_at(&validate(&bp)),
            vec![
                ("Version", rule::REQUIRED),
                ("Components[1].Name", rule::REQUIRED),
                ("Components[1].Conditions[0].Column", rule::REQUIRED),
                ("Components[1].Conditions[0].{Is,IsNot,AnyOf,NoneOf}", rule::NO_CONDITION),
                ("Components[1].Fields[0].Name", rule::REQUIRED),
            ]
        );
    }

    #[test]
    fn test_violation_attribute() {
        let v = Violation {
            path: "Metadata.File.Extension".to_string(),
            rule: rule::IS_SUPPORTED_FILE,
            value: "exe".to_string(),
        };
        assert_eq!(v.attribute(), "Extension");
        let v = Violation {
            path: "Components[0]".to_string(),
            rule: rule::REQUIRED,
            value: String::new(),
        };
        assert_eq!(v.attribute(), "Components");
        let v = Violation {
            path: "Version".to_string(),
            rule: rule::REQUIRED,
            value: String::new(),
        };
        assert_eq!(v.attribute(), "Version");
    }

    #[test]
    fn test_violation_display() {
        let v = Violation {
            path: "Components[0].Type".to_string(),
            rule: rule::IS_VALID_COMPONENT_TYPE,
            value: "row".to_string(),
        };
        assert_eq!(
            v.to_string(),
            r#"Components[0].Type: is-valid-component-type (value "row")"#
        );
    }

    #[test]
    fn test_standard_rule_count() {
        let rules = RuleSet::standard();
        assert!(!rules.is_empty());
        assert_eq!(rules.len(), 16);
    }

    #[test]
    fn test_custom_table() {
        let table: RuleTable<File> = RuleTable::new().node(
            "lowercase-name",
            "Name",
            |f| f.name == f.name.to_lowercase(),
            |f| f.name.clone(),
        );
        let mut out = Vec::new();
        table.apply(
            &File {
                extension: "csv".to_string(),
                name: "Report".to_string(),
            },
            "Metadata.File",
            &mut out,
        );
        assert_eq!(rules_at(&out), vec![("Metadata.File.Name", "lowercase-name")]);
    }

    #[test]
    fn test_rule_set_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RuleSet>();
    }
}
