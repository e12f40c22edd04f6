//! Core operations.
//!
//! This module contains the business logic for supatype commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod generate;
pub mod plan;

pub use check::check;
pub use generate::{GenerateOptions, generate, plan_report};
pub use plan::{Plan, PlanOptions, plan};
