mod args;
mod check;
mod completions;
mod generate;

use std::process::ExitCode;

use args::GenerateArgs;
use check::CheckCommand;
use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use generate::GenerateCommand;

/// Extension trait for exiting on env/config errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for supatype_env::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "supatype")]
#[command(version)]
#[command(about = "Generate TypeScript types for a Supabase database")]
#[command(args_conflicts_with_subcommands = true)]
#[command(after_help = "\
Examples:
  # Generate types for the public schema (default)
  supatype

  # Generate types for multiple schemas
  supatype --schema public --schema storage

  # Use a direct database connection when the project can't be reached
  supatype --db-url \"postgresql://...\"")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    // Used when no subcommand is given
    #[command(flatten)]
    generate: GenerateCommand,
}

impl Cli {
    pub fn run(&self) -> Result<ExitCode> {
        match &self.command {
            None => self.generate.run(),
            Some(Commands::Generate(cmd)) => cmd.run(),
            Some(Commands::Check(cmd)) => cmd.run(),
            Some(Commands::Completions(cmd)) => cmd.run(),
        }
    }

    /// Whether verbose output was requested.
    pub fn verbose(&self) -> bool {
        match &self.command {
            None => self.generate.args.verbose,
            Some(Commands::Generate(cmd)) => cmd.args.verbose,
            Some(Commands::Check(cmd)) => cmd.args.verbose,
            Some(Commands::Completions(_)) => false,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate types and write them to the output file
    Generate(GenerateCommand),

    /// Fail if the output file is out of date with the database
    Check(CheckCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
