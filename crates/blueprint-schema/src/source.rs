//! Recovery of scalar text as written in the source document.
//!
//! `serde_yaml` resolves plain scalars before anything else sees them, so
//! `is: 1.50` arrives as the float `1.5` and `isNot: 0x1F` as the integer
//! `31`. Condition predicates are compared against cell text downstream and
//! must survive verbatim. The document is therefore also read as a
//! `yaml-rust` event stream, which carries every scalar exactly as written,
//! and plain scalars under text keys are put back into the value tree as
//! strings before the model is deserialized.

use serde_yaml::Value;
use yaml_rust::parser::{Event, EventReceiver, Parser};
use yaml_rust::scanner::{ScanError, TScalarStyle};

/// Keys whose values are text in the model, at every level.
pub(crate) const TEXT_KEYS: &[&str] = &[
    "version", "extension", "name", "type", "is", "isNot", "anyOf", "noneOf", "format",
];

/// Document node as written, before type resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SourceNode {
    /// Scalar text and whether it was written plain (unquoted).
    Scalar { text: String, plain: bool },
    Sequence(Vec<SourceNode>),
    Mapping(Vec<(SourceNode, SourceNode)>),
    /// Alias to an anchored node; never restored.
    Alias,
}

enum Frame {
    Sequence(Vec<SourceNode>),
    /// Keys and values, alternating.
    Mapping(Vec<SourceNode>),
}

#[derive(Default)]
struct TreeBuilder {
    stack: Vec<Frame>,
    root: Option<SourceNode>,
}

impl TreeBuilder {
    fn push(&mut self, node: SourceNode) {
        match self.stack.last_mut() {
            Some(Frame::Sequence(items)) | Some(Frame::Mapping(items)) => items.push(node),
            None => {
                if self.root.is_none() {
                    self.root = Some(node);
                }
            }
        }
    }

    fn close(&mut self) {
        let node = match self.stack.pop() {
            Some(Frame::Sequence(items)) => SourceNode::Sequence(items),
            Some(Frame::Mapping(flat)) => {
                let mut pairs = Vec::with_capacity(flat.len() / 2);
                let mut it = flat.into_iter();
                while let (Some(key), Some(value)) = (it.next(), it.next()) {
                    pairs.push((key, value));
                }
                SourceNode::Mapping(pairs)
            }
            None => return,
        };
        self.push(node);
    }
}

impl EventReceiver for TreeBuilder {
    fn on_event(&mut self, ev: Event) {
        match ev {
            Event::Scalar(text, style, _, _) => self.push(SourceNode::Scalar {
                plain: matches!(style, TScalarStyle::Plain),
                text,
            }),
            Event::Alias(_) => self.push(SourceNode::Alias),
            Event::SequenceStart(_) => self.stack.push(Frame::Sequence(Vec::new())),
            Event::MappingStart(_) => self.stack.push(Frame::Mapping(Vec::new())),
            Event::SequenceEnd | Event::MappingEnd => self.close(),
            _ => {}
        }
    }
}

/// Read the first document of `text` as an unresolved node tree.
pub(crate) fn parse(text: &str) -> Result<Option<SourceNode>, ScanError> {
    let mut builder = TreeBuilder::default();
    Parser::new(text.chars()).load(&mut builder, false)?;
    Ok(builder.root)
}

/// Replace numbers and booleans under text keys with their source text.
///
/// `value` and `source` must come from the same document; where their
/// shapes disagree the subtree is left alone.
pub(crate) fn restore_text(value: &mut Value, source: &SourceNode) {
    match (value, source) {
        (Value::Mapping(map), SourceNode::Mapping(pairs)) => {
            for ((key, child), (_, source_child)) in map.iter_mut().zip(pairs) {
                let text_key = key.as_str().is_some_and(|k| TEXT_KEYS.contains(&k));
                if text_key && matches!(child, Value::Number(_) | Value::Bool(_)) {
                    if let SourceNode::Scalar { text, plain: true } = source_child {
                        *child = Value::String(text.clone());
                        continue;
                    }
                }
                restore_text(child, source_child);
            }
        }
        (Value::Sequence(items), SourceNode::Sequence(sources)) => {
            for (item, source_item) in items.iter_mut().zip(sources) {
                restore_text(item, source_item);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn restored(text: &str) -> Value {
        let mut value: Value = serde_yaml::from_str(text).unwrap();
        let source = parse(text).unwrap().unwrap();
        restore_text(&mut value, &source);
        value
    }

    #[test]
    fn test_parse_keeps_plain_text() {
        let node = parse("is: 1.50\nanyOf: 'x'\n").unwrap().unwrap();
        assert_eq!(
            node,
            SourceNode::Mapping(vec![
                (
                    SourceNode::Scalar { text: "is".to_string(), plain: true },
                    SourceNode::Scalar { text: "1.50".to_string(), plain: true },
                ),
                (
                    SourceNode::Scalar { text: "anyOf".to_string(), plain: true },
                    SourceNode::Scalar { text: "x".to_string(), plain: false },
                ),
            ])
        );
    }

    #[test]
    fn test_numbers_under_text_keys_keep_source_text() {
        let value = restored("version: 1.10\nconditions:\n  - { is: 1.50, isNot: 0x1F, anyOf: 1e3 }\n");
        assert_eq!(value["version"], Value::String("1.10".to_string()));
        let condition = &value["conditions"][0];
        assert_eq!(condition["is"], Value::String("1.50".to_string()));
        assert_eq!(condition["isNot"], Value::String("0x1F".to_string()));
        assert_eq!(condition["anyOf"], Value::String("1e3".to_string()));
    }

    #[test]
    fn test_booleans_under_text_keys_keep_source_text() {
        let value = restored("is: TRUE\n");
        assert_eq!(value["is"], Value::String("TRUE".to_string()));
    }

    #[test]
    fn test_numeric_keys_stay_numeric() {
        let value = restored("position: 0x1F\npage: 2\ncolumn: [1, 2]\nmandatory: true\n");
        assert_eq!(value["position"].as_u64(), Some(31));
        assert_eq!(value["page"].as_u64(), Some(2));
        assert_eq!(value["column"][1].as_u64(), Some(2));
        assert_eq!(value["mandatory"].as_bool(), Some(true));
    }

    #[test]
    fn test_null_values_untouched() {
        let value = restored("version:\nis: ~\n");
        assert!(value["version"].is_null());
        assert!(value["is"].is_null());
    }

    #[test]
    fn test_empty_document_has_no_root() {
        assert_eq!(parse("").unwrap(), None);
    }
}
