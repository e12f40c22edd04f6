use miette::Diagnostic;
use thiserror::Error;

/// Result type for generation operations
pub type Result<T> = std::result::Result<T, GenError>;

/// Error raised when type generation fails.
#[derive(Debug, Error, Diagnostic)]
pub enum GenError {
    #[error("Supabase CLI not found")]
    #[diagnostic(
        code(supatype::cli_not_found),
        help("install with: npm install -g supabase")
    )]
    CliNotFound,

    #[error("failed to run '{program}'")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Supabase CLI failed: {stderr}")]
    #[diagnostic(code(supatype::cli_failed))]
    CliFailed { stderr: String },

    #[error("Supabase CLI returned no output")]
    #[diagnostic(code(supatype::empty_output))]
    EmptyOutput,

    #[error("interrupted by user")]
    Interrupted,

    #[error("both primary and fallback methods failed. Primary: {primary}. Fallback: {fallback}")]
    #[diagnostic(
        code(supatype::fallback_failed),
        help("check that the Supabase CLI is logged in and the database URL is reachable")
    )]
    BothFailed {
        primary: Box<GenError>,
        fallback: Box<GenError>,
    },
}

impl GenError {
    /// Whether the run was cut short by the user (Ctrl-C).
    pub fn is_interrupted(&self) -> bool {
        match self {
            GenError::Interrupted => true,
            GenError::BothFailed { fallback, .. } => fallback.is_interrupted(),
            _ => false,
        }
    }
}
