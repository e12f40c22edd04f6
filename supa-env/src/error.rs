use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for supatype-env operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Encapsulates the source content and filename of an env or config file,
/// so errors can point at the offending line.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a config parse error from a toml error.
    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::ConfigParse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a config validation error, optionally pointing at a span.
    pub fn validation_error(
        &self,
        message: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::ConfigValidation {
            src: self.named_source(),
            span,
            message: message.into(),
        })
    }

    /// Create a missing variable error, pointing at an empty assignment if present.
    pub fn missing_variable(&self, key: impl Into<String>, span: Option<SourceSpan>) -> Box<Error> {
        Box::new(Error::MissingVariable {
            src: self.named_source(),
            span,
            key: key.into(),
            filename: self.filename.clone(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("missing environment file: {}", .path.display())]
    #[diagnostic(
        code(supatype::missing_env_file),
        help("create the file with at least NEXT_PUBLIC_SUPABASE_URL set, or pass --env-file")
    )]
    MissingEnvFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read '{}'", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("missing {key} in {filename}")]
    #[diagnostic(
        code(supatype::missing_variable),
        help("add `{key}=...` to {filename}")
    )]
    MissingVariable {
        #[source_code]
        src: NamedSource<String>,
        #[label("empty value")]
        span: Option<SourceSpan>,
        key: String,
        filename: String,
    },

    #[error("could not extract project ID from URL: {url}")]
    #[diagnostic(
        code(supatype::invalid_project_url),
        help("expected a URL of the form https://<project-id>.supabase.co")
    )]
    InvalidProjectUrl { url: String },

    #[error("failed to parse supatype.toml")]
    #[diagnostic(code(supatype::config_parse))]
    ConfigParse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(supatype::config_validation))]
    ConfigValidation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },
}
