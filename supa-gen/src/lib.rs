//! Supabase CLI invocation for the supatype generator.
//!
//! # Module Organization
//!
//! - [`cli`] - Locating the Supabase CLI (global install or `npx`)
//! - [`runner`] - Process execution behind the [`CommandRunner`] trait
//! - [`generate`] - `gen types typescript` with the direct-connection fallback
//! - [`format`] - Piping output through Prettier
//! - [`testing`] - Test utilities (feature-gated)

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

pub mod cli;
mod error;
pub mod format;
pub mod generate;
pub mod runner;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use cli::CliCommand;
pub use error::{GenError, Result};
pub use format::{Formatted, Formatter};
pub use generate::{Generated, Source, TypeGenerator};
pub use runner::{CommandOutput, CommandRunner, Invocation, SystemRunner};
