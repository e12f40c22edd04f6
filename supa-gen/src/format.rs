//! Formatting generated types through an external formatter.

use std::path::PathBuf;

use crate::{CommandRunner, GenError, Invocation, Result};

/// Default formatter command; content is piped through stdin.
pub const PRETTIER: [&str; 5] = ["npx", "--yes", "prettier@latest", "--parser", "typescript"];

/// Outcome of a formatting attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatted {
    pub content: String,
    /// False when the formatter was unavailable or failed and the
    /// content is returned as given.
    pub applied: bool,
}

/// Pipes content through a formatter command.
pub struct Formatter<R> {
    runner: R,
    command: Vec<String>,
    cwd: Option<PathBuf>,
    env: Vec<(String, String)>,
}

impl<R: CommandRunner> Formatter<R> {
    /// Format with Prettier via `npx`.
    pub fn prettier(runner: R) -> Self {
        Self::with_command(runner, PRETTIER.iter().map(|s| s.to_string()).collect())
    }

    /// Format with a custom command (program followed by arguments).
    pub fn with_command(runner: R, command: Vec<String>) -> Self {
        Self {
            runner,
            command,
            cwd: None,
            env: Vec::new(),
        }
    }

    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn env(mut self, env: Vec<(String, String)>) -> Self {
        self.env = env;
        self
    }

    /// Format `content`.
    ///
    /// Formatter failures are not errors: the content is returned unformatted
    /// with a warning logged. Only an interrupt aborts.
    pub fn format(&self, content: &str) -> Result<Formatted> {
        let Some((program, args)) = self.command.split_first() else {
            return Ok(unformatted(content));
        };
        let invocation = Invocation::new(program)
            .args(args.iter().cloned())
            .cwd(self.cwd.clone())
            .envs(&self.env)
            .stdin(content);
        tracing::debug!(command = %invocation, "formatting");

        let output = match self.runner.run(&invocation) {
            Ok(output) => output,
            Err(e) => {
                tracing::warn!(error = %e, "formatter could not be started, keeping unformatted output");
                return Ok(unformatted(content));
            }
        };

        if output.interrupted {
            return Err(GenError::Interrupted);
        }
        if !output.success() {
            tracing::warn!(
                code = ?output.code,
                stderr = output.stderr.trim(),
                "formatter failed, keeping unformatted output"
            );
            return Ok(unformatted(content));
        }
        if output.stdout.trim().is_empty() {
            tracing::warn!("formatter produced no output, keeping unformatted output");
            return Ok(unformatted(content));
        }

        Ok(Formatted {
            content: output.stdout,
            applied: true,
        })
    }
}

fn unformatted(content: &str) -> Formatted {
    Formatted {
        content: content.to_string(),
        applied: false,
    }
}
