//! # loqa-core
//!
//! Shared data model for the loqa localization QA engine.
//!
//! This crate provides the types every other loqa crate speaks:
//! - Finding priorities and the fixed finding taxonomy
//! - Rows, findings, and worklist entries
//! - Terminology lookup tables (overrides, terms, fragments)
//! - In-memory row tables and the source-table catalog
//! - Reference-script and full-width punctuation helpers
//! - Cross-cutting error types

pub mod catalog;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod fullwidth;
pub mod script;
pub mod table;
pub mod terminology;

pub use catalog::{SourceTableCatalog, TableLabel};
pub use entities::{Finding, Row, WorklistEntry};
pub use enums::{FindingKind, Priority};
pub use errors::CoreError;
pub use table::{ColumnSpec, RowTable};
pub use terminology::{ForbiddenUsage, TerminologyTables};
