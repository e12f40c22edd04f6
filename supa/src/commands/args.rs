use std::path::PathBuf;

use clap::Args;

use crate::ops::PlanOptions;

/// Options shared by every command that runs the generator.
#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Schema to include (can be provided multiple times, default: public)
    #[arg(long = "schema", value_name = "SCHEMA")]
    pub schemas: Vec<String>,

    /// Path to write the generated types (default: lib/types/database.types.ts)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Postgres connection string (fallback if the project can't be reached)
    #[arg(long, env = "SUPATYPE_DB_URL", hide_env_values = true)]
    pub db_url: Option<String>,

    /// Show verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Project root; the env file, config and output default to paths inside it
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Path to supatype.toml (defaults to <root>/supatype.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Env file to read (default: <root>/.env.local)
    #[arg(long)]
    pub env_file: Option<PathBuf>,

    /// Skip formatting the generated types
    #[arg(long)]
    pub no_format: bool,
}

impl GenerateArgs {
    pub fn plan_options(&self) -> PlanOptions<'_> {
        PlanOptions {
            root: &self.root,
            config: self.config.as_deref(),
            env_file: self.env_file.as_deref(),
            output: self.output.as_deref(),
            schemas: &self.schemas,
            db_url: self.db_url.as_deref(),
            no_format: self.no_format,
        }
    }
}
