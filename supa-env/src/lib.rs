//! Environment and configuration loading for the supatype generator.
//!
//! Reads the project's env file (`.env.local` by default), extracts the
//! Supabase project reference and loads the optional `supatype.toml`.
//! Errors are [`miette`] diagnostics pointing into the offending file.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod config;
mod env_file;
mod error;
mod project;

pub use config::{
    CONFIG_FILE, Config, ConfigFile, DEFAULT_DB_URL_VAR, DEFAULT_OUTPUT, DEFAULT_URL_VAR,
    FormatConfig, GenerateConfig, ProjectConfig, VerifyConfig,
};
pub use env_file::{DEFAULT_ENV_FILE, EnvFile};
pub use error::{Error, Result};
pub use project::ProjectRef;
