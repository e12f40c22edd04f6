//! Type generation through the Supabase CLI, with a direct-connection fallback.

use std::{fmt, path::PathBuf};

use crate::{CliCommand, CommandRunner, GenError, Invocation, Result, runner::redact};

/// Where the CLI reads the schema from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// A hosted project, addressed by its project reference.
    ProjectId(String),
    /// A database reached through a connection string.
    DbUrl(String),
}

impl Source {
    fn args(&self) -> [&str; 2] {
        match self {
            Source::ProjectId(id) => ["--project-id", id.as_str()],
            Source::DbUrl(url) => ["--db-url", url.as_str()],
        }
    }

    /// Human-readable name of the generation method.
    pub fn method(&self) -> &'static str {
        match self {
            Source::ProjectId(_) => "Supabase CLI (remote project)",
            Source::DbUrl(_) => "direct database connection",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::ProjectId(id) => write!(f, "project {}", id),
            Source::DbUrl(url) => write!(f, "{}", redact(url)),
        }
    }
}

/// Successful generation.
#[derive(Debug)]
pub struct Generated {
    /// Generated type definitions, trimmed
    pub content: String,
    /// Source that produced the content
    pub source: Source,
    /// Why the primary source failed, when the fallback was used
    pub primary_error: Option<GenError>,
}

/// Runs `supabase gen types typescript` for a set of schemas.
pub struct TypeGenerator<R> {
    runner: R,
    cli: CliCommand,
    schemas: Vec<String>,
    cwd: Option<PathBuf>,
    env: Vec<(String, String)>,
}

impl<R: CommandRunner> TypeGenerator<R> {
    pub fn new(runner: R, cli: CliCommand, schemas: Vec<String>) -> Self {
        Self {
            runner,
            cli,
            schemas,
            cwd: None,
            env: Vec::new(),
        }
    }

    /// Run the CLI from this directory.
    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Extra environment variables for the CLI process.
    pub fn env(mut self, env: Vec<(String, String)>) -> Self {
        self.env = env;
        self
    }

    /// Build the CLI invocation for a source.
    pub fn invocation(&self, source: &Source) -> Invocation {
        let mut args: Vec<&str> = vec!["gen", "types", "typescript"];
        args.extend(source.args());
        for schema in &self.schemas {
            args.extend(["--schema", schema.as_str()]);
        }

        self.cli
            .invocation(args)
            .cwd(self.cwd.clone())
            .envs(&self.env)
    }

    /// Generate types from a single source.
    pub fn run(&self, source: &Source) -> Result<String> {
        let invocation = self.invocation(source);
        tracing::debug!(method = source.method(), command = %invocation, "running generator");

        let output = self
            .runner
            .run(&invocation)
            .map_err(|e| GenError::Spawn {
                program: invocation.program.clone(),
                source: e,
            })?;

        if output.interrupted {
            return Err(GenError::Interrupted);
        }
        if !output.success() {
            let stderr = output.stderr.trim();
            let stderr = if stderr.is_empty() {
                "Unknown error"
            } else {
                stderr
            };
            return Err(GenError::CliFailed {
                stderr: stderr.to_string(),
            });
        }

        let content = output.stdout.trim();
        if content.is_empty() {
            return Err(GenError::EmptyOutput);
        }
        Ok(content.to_string())
    }

    /// Generate from `primary`, retrying with `fallback` when it fails.
    ///
    /// An interrupted primary run is never retried.
    pub fn generate(&self, primary: Source, fallback: Option<Source>) -> Result<Generated> {
        let primary_error = match self.run(&primary) {
            Ok(content) => {
                return Ok(Generated {
                    content,
                    source: primary,
                    primary_error: None,
                });
            }
            Err(e) => e,
        };

        let fallback = match fallback {
            Some(fallback) if !primary_error.is_interrupted() => fallback,
            _ => return Err(primary_error),
        };

        tracing::debug!(error = %primary_error, "{} failed", primary.method());
        tracing::info!("trying fallback: {}", fallback.method());

        match self.run(&fallback) {
            Ok(content) => Ok(Generated {
                content,
                source: fallback,
                primary_error: Some(primary_error),
            }),
            Err(e) if e.is_interrupted() => Err(e),
            Err(e) => Err(GenError::BothFailed {
                primary: Box::new(primary_error),
                fallback: Box::new(e),
            }),
        }
    }
}
