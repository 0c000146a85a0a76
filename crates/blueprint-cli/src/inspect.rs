//! # Inspect Subcommand
//!
//! Builds one schema and prints its structure: the source file, then each
//! component with its conditions and fields. With `--json` the whole
//! decoded tree is printed instead, using the schema key names.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use blueprint_core::{Component, Field};
use blueprint_schema::{build_from_path, Blueprint, BlueprintError};

/// Arguments for the `blueprint inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Schema file to inspect.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Print the decoded blueprint as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Execute the inspect subcommand.
///
/// Returns exit code 0 when the schema builds, 1 when it is rejected.
/// Failing to read the file is an operational error.
pub fn run_inspect(args: &InspectArgs) -> Result<u8> {
    let path = &args.path;
    let blueprint = match build_from_path(path) {
        Ok(bp) => bp,
        Err(BlueprintError::Io(e)) => {
            return Err(e).with_context(|| format!("failed to read {}", path.display()));
        }
        Err(e) => {
            println!("FAIL: {}", path.display());
            print!("{}", with_trailing_newline(e.to_string()));
            return Ok(1);
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&blueprint)?);
    } else {
        print!("{}", summary(&blueprint));
    }
    Ok(0)
}

fn with_trailing_newline(mut text: String) -> String {
    if !text.ends_with('\n') {
        text.push('\n');
    }
    text
}

/// Human-readable outline of a blueprint.
pub fn summary(bp: &Blueprint) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Blueprint v{}", bp.version);
    if let Some(file) = bp.file() {
        let _ = writeln!(out, "File: {} ({})", file.name, file.extension);
    }
    let _ = writeln!(
        out,
        "Components: {} ({} conditions, {} fields)",
        bp.components.len(),
        bp.condition_count(),
        bp.field_count()
    );
    for component in &bp.components {
        write_component(&mut out, component);
    }
    out
}

fn write_component(out: &mut String, component: &Component) {
    let mut flags = Vec::new();
    if component.mandatory {
        flags.push("mandatory");
    }
    if component.table {
        flags.push("table");
    }
    let flags = if flags.is_empty() {
        String::new()
    } else {
        format!(" [{}]", flags.join(", "))
    };
    let _ = writeln!(
        out,
        "  - {} ({}, page {}){}",
        component.name, component.kind, component.page, flags
    );

    for condition in &component.conditions {
        let columns: Vec<String> = condition.column.iter().map(u32::to_string).collect();
        let predicates: Vec<String> = condition
            .predicates()
            .into_iter()
            .map(|(key, text)| format!("{key} {text:?}"))
            .collect();
        let _ = writeln!(
            out,
            "      when column [{}] {}",
            columns.join(", "),
            predicates.join(", ")
        );
    }
    for field in &component.fields {
        let _ = writeln!(out, "      {}", describe_field(field));
    }
}

fn describe_field(field: &Field) -> String {
    let kind = field.field_type().map_or("string", |t| t.as_str());
    if field.format.is_unset() {
        format!("{} @ {}: {}", field.name, field.position, kind)
    } else {
        format!(
            "{} @ {}: {} ({})",
            field.name, field.position, kind, field.format
        )
    }
}
