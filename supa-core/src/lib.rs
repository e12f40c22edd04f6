//! Core utilities and types for the supatype generator.
//!
//! This crate holds the pieces that don't talk to the outside world:
//! schema merging, the header written on top of every generated file,
//! output file writing, and statistics over generated content.

mod file;
mod header;
mod schema;
mod stats;

// File operations
pub use file::{TypesFile, WriteResult};
// Header comment
pub use header::{DEFAULT_REGENERATE_COMMAND, Header, strip_header};
// Schema handling
pub use schema::{PRIMARY_SCHEMA, merge_schemas};
// Content statistics
pub use stats::{ContentStats, TableCheck, format_count};
