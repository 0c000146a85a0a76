//! # Error Aggregator
//!
//! Renders validation violations as one report. Entries keep the order the
//! validation walk produced them in; nothing is re-sorted, so the same
//! document always yields a byte-identical report.
//!
//! ```text
//! Validation errors [count=2]:
//!   - Field is required
//! 	Value: ""
//! 	Field(s): Version
//! 	Code: required
//!   - Extension value is not valid
//! 	Value: "exe"
//! 	Field(s): Metadata.File.Extension
//! 	Code: is-supported-file
//! ```

use std::fmt;

use serde::Serialize;

use crate::validate::{rule, Violation};

/// Messages for rules that have one. Other rules fall back to
/// `"<attribute> value is not valid"`.
const MESSAGES: &[(&str, &str)] = &[
    (rule::REQUIRED, "Field is required"),
    (
        rule::NO_CONDITION,
        "At least one of the conditions must not be empty",
    ),
    (
        rule::REQUIRED_WITH_CODE,
        "Parameter is required when a format code is set",
    ),
];

/// Human-readable message for a violation.
pub fn message_for(violation: &Violation) -> String {
    MESSAGES
        .iter()
        .find(|(rule, _)| *rule == violation.rule)
        .map(|(_, message)| (*message).to_string())
        .unwrap_or_else(|| format!("{} value is not valid", violation.attribute()))
}

/// One formatted report line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportEntry {
    /// Human-readable message.
    pub message: String,
    /// Offending value, unquoted.
    pub value: String,
    /// Location of the offending node.
    pub path: String,
    /// Rule identifier.
    pub rule: String,
}

impl From<Violation> for ReportEntry {
    fn from(violation: Violation) -> Self {
        Self {
            message: message_for(&violation),
            rule: violation.rule.to_string(),
            value: violation.value,
            path: violation.path,
        }
    }
}

impl fmt::Display for ReportEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "  - {}\n\tValue: \"{}\"\n\tField(s): {}\n\tCode: {}",
            self.message, self.value, self.path, self.rule
        )
    }
}

/// Aggregated validation failures for one blueprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    count: usize,
    errors: Vec<ReportEntry>,
}

impl ValidationReport {
    /// Build a report from violations, keeping their order.
    pub fn from_violations(violations: Vec<Violation>) -> Self {
        let errors: Vec<ReportEntry> = violations.into_iter().map(ReportEntry::from).collect();
        Self {
            count: errors.len(),
            errors,
        }
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns a slice of all entries.
    pub fn entries(&self) -> &[ReportEntry] {
        &self.errors
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<ReportEntry> {
        self.errors
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation errors [count={}]:", self.count)?;
        for entry in &self.errors {
            writeln!(f, "{entry}")?;
        }
        Ok(())
    }
}

/// Aggregate violations into a report.
///
/// Returns `None` for an empty list: no violations, no report.
pub fn aggregate(violations: Vec<Violation>) -> Option<ValidationReport> {
    if violations.is_empty() {
        return None;
    }
    Some(ValidationReport::from_violations(violations))
}
