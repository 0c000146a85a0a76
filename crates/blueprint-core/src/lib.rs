//! # blueprint-core: Foundational Types for Blueprint Schemas
//!
//! A blueprint describes how to read a tabular source document (XLSX, XLS
//! or CSV): which components live on which page, which conditions select a
//! component, and which typed fields each component carries. This crate
//! defines the typed tree that decoding populates and the vocabularies its
//! enumerated attributes are checked against.
//!
//! ## Key Design Principles
//!
//! 1. **Raw text in, typed accessors out.** Enumerated attributes keep the
//!    text exactly as written so that an unrecognized value survives until
//!    validation can report it verbatim. Typed views (`File::supported_file`,
//!    `Component::component_type`, `Field::field_type`) return the
//!    vocabulary enum when the text is recognized.
//!
//! 2. **One vocabulary enum per value set.** `SupportedFile`,
//!    `ComponentType`, `FieldType` and `FormatCode` are the single definition
//!    of each set. Exhaustive `match` keeps consumers honest.
//!
//! 3. **Pure format parsing.** [`parse_format_token`] turns `"f%2"` into a
//!    [`FieldFormat`] with no side effects and no knowledge of the
//!    surrounding document. It never fails; legality is a validation concern.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `blueprint-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod format;
pub mod model;
pub mod vocabulary;

mod scalar;

// Re-export primary types for ergonomic imports.
pub use error::ModelError;
pub use format::{parse_format_token, FieldFormat};
pub use model::{Blueprint, Component, Condition, Field, File, Metadata};
pub use vocabulary::{ComponentType, FieldType, FormatCode, SupportedFile};
