//! # blueprint-cli: Command-Line Interface for Blueprint Schemas
//!
//! Provides the `blueprint` binary over the `blueprint-schema` build facade.
//!
//! ## Subcommands
//!
//! - `blueprint validate` checks schema files, or directories scanned for
//!   `*.yaml` / `*.yml`, and prints one line per file plus a summary.
//! - `blueprint inspect` builds one schema and prints its structure.
//!
//! ```bash
//! blueprint validate assets/blueprints
//! blueprint validate statement.yaml --json
//! blueprint -vv inspect statement.yaml
//! ```
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from the handlers.
//! - Handlers delegate to `blueprint-schema`; no decoding or rule logic here.
//! - Reports go to stdout, logs to stderr.

pub mod inspect;
pub mod validate;
