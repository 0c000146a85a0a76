//! # blueprint-schema: Decoding & Validation Engine
//!
//! Turns blueprint text into a validated [`Blueprint`], or rejects it with
//! either a decode error or an aggregated validation report.
//!
//! ## Pipeline
//!
//! ```text
//! text ──decode──▶ Blueprint ──RuleSet::validate──▶ [Violation] ──aggregate──▶ ValidationReport
//! ```
//!
//! - [`decode`]: strict YAML decoding. Unknown keys at any level fail
//!   immediately with [`DecodeError::UnknownField`].
//! - [`validate`]: walks the tree with a request-scoped [`RuleSet`] and
//!   collects every violation; it never stops at the first one.
//! - [`report`]: renders violations in traversal order with messages from
//!   a fixed rule-id table.
//! - [`builder`]: [`build`] / [`build_from_path`], the single entry point.
//!
//! ## Crate Policy
//!
//! - Depends only on `blueprint-core` internally.
//! - Decode errors and validation reports are disjoint: a document that
//!   fails decoding is never validated, and a report never contains a
//!   decode error.
//! - No process-wide state. Rule sets are built per call.

pub mod builder;
pub mod decode;
pub mod error;
pub mod report;
pub mod validate;

mod source;

// Re-export primary types.
pub use blueprint_core::Blueprint;
pub use builder::{build, build_from_bytes, build_from_path};
pub use decode::{decode, decode_bytes};
pub use error::{BlueprintError, DecodeError};
pub use report::{aggregate, ReportEntry, ValidationReport};
pub use validate::{validate, RuleSet, Violation};
