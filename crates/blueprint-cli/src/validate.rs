//! # Validate Subcommand
//!
//! Builds every given schema file through the facade and reports the
//! outcome per file. Directories are scanned recursively for `*.yaml` and
//! `*.yml` files.
//!
//! ```text
//! OK: assets/blueprints/valid.yaml
//! FAIL: assets/blueprints/invalid.yaml
//! Validation errors [count=1]:
//!   - Extension value is not valid
//! 	...
//!
//! Blueprints: 1/2 passed
//! ```
//!
//! Exit codes: 0 when every file passes, 1 when any fails, 2 for
//! operational errors such as a missing path or no schema files at all.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::Args;
use serde::Serialize;

use blueprint_schema::{build_from_path, Blueprint, BlueprintError, ValidationReport};

/// Schema file extensions picked up when scanning a directory.
const SCHEMA_EXTENSIONS: &[&str] = &["yaml", "yml"];

/// Arguments for the `blueprint validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Schema files, or directories to scan for `*.yaml` / `*.yml`.
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Print one JSON object per file instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Result of building one file, as printed with `--json`.
#[derive(Debug, Serialize)]
struct FileOutcome<'a> {
    path: String,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<&'a ValidationReport>,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 on success, 1 on validation failure. Operational
/// errors are returned as `Err` and map to exit code 2.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let files = collect_files(&args.paths)?;
    if files.is_empty() {
        bail!("no blueprint schema files found");
    }
    tracing::info!(files = files.len(), "validating blueprints");

    let mut passed = 0usize;
    for path in &files {
        let result = build_from_path(path);
        if result.is_ok() {
            passed += 1;
        }
        if args.json {
            print_json(path, &result)?;
        } else {
            print_text(path, &result);
        }
    }

    if !args.json {
        println!("\nBlueprints: {}/{} passed", passed, files.len());
    }

    if passed == files.len() {
        Ok(0)
    } else {
        Ok(1)
    }
}

fn print_text(path: &Path, result: &Result<Blueprint, BlueprintError>) {
    match result {
        Ok(_) => println!("OK: {}", path.display()),
        Err(BlueprintError::Invalid(report)) => {
            println!("FAIL: {}", path.display());
            print!("{report}");
        }
        Err(e) => {
            println!("FAIL: {}", path.display());
            println!("  {e}");
        }
    }
}

fn print_json(path: &Path, result: &Result<Blueprint, BlueprintError>) -> Result<()> {
    let outcome = match result {
        Ok(_) => FileOutcome {
            path: path.display().to_string(),
            ok: true,
            error: None,
            report: None,
        },
        Err(e) => FileOutcome {
            path: path.display().to_string(),
            ok: false,
            error: Some(e.to_string()),
            report: e.report(),
        },
    };
    println!("{}", serde_json::to_string(&outcome)?);
    Ok(())
}

/// Expand the given paths into a sorted, de-duplicated list of files.
fn collect_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            files.extend(find_yaml_files(path));
        } else if path.is_file() {
            files.push(path.clone());
        } else {
            bail!("path does not exist: {}", path.display());
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

/// Recursively find schema files under a directory, sorted.
fn find_yaml_files(dir: &Path) -> Vec<PathBuf> {
    let mut results = Vec::new();
    walk_for_files(dir, &mut results);
    results.sort();
    results
}

fn walk_for_files(dir: &Path, acc: &mut Vec<PathBuf>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) => {
            tracing::warn!(
                dir = %dir.display(),
                error = %e,
                "failed to read directory during file walk"
            );
            return;
        }
    };
    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "failed to read directory entry");
                continue;
            }
        };
        let path = entry.path();
        if path.is_dir() {
            walk_for_files(&path, acc);
        } else if is_schema_file(&path) {
            acc.push(path);
        }
    }
}

fn is_schema_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| SCHEMA_EXTENSIONS.contains(&e))
}
