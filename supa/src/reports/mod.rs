//! Report data structures for commands.
//!
//! This module provides data structures that separate data collection from rendering.
//! Commands build reports, then render them to an Output target.

mod check;
mod generate;
mod output;
mod plan;

pub use check::{CheckReport, CheckStatus};
pub use generate::{GenerateReport, GenerationResult};
pub use output::{Output, Report, TerminalOutput};
pub use plan::PlanReport;
