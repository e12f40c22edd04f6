//! `.env`-style file loading.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use miette::SourceSpan;

use crate::{Error, Result, error::SourceContext};

/// Default env file, relative to the project root.
pub const DEFAULT_ENV_FILE: &str = ".env.local";

/// A parsed env file: `KEY=value` assignments in first-seen order.
#[derive(Debug, Clone)]
pub struct EnvFile {
    path: PathBuf,
    source: SourceContext,
    vars: IndexMap<String, String>,
    spans: IndexMap<String, SourceSpan>,
}

impl EnvFile {
    /// Open and parse an env file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::MissingEnvFile {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        let mut env = Self::parse(&content, &path.display().to_string());
        env.path = path.to_path_buf();
        tracing::debug!(path = %path.display(), vars = env.vars.len(), "loaded env file");
        Ok(env)
    }

    /// Parse env file content.
    ///
    /// Blank lines, `#` comments and lines without `=` are skipped. Values are
    /// trimmed and stripped of surrounding double, then single, quotes.
    pub fn parse(content: &str, filename: &str) -> Self {
        let mut vars = IndexMap::new();
        let mut spans = IndexMap::new();

        let mut offset = 0;
        for raw_line in content.split_inclusive('\n') {
            let line_start = offset;
            offset += raw_line.len();

            let leading = raw_line.len() - raw_line.trim_start().len();
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };

            let value = value.trim().trim_matches('"').trim_matches('\'');
            let key = key.trim().to_string();
            spans.insert(key.clone(), SourceSpan::from((line_start + leading, line.len())));
            vars.insert(key, value.to_string());
        }

        Self {
            path: PathBuf::from(filename),
            source: SourceContext::new(content, filename),
            vars,
            spans,
        }
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All assignments in first-seen order.
    pub fn vars(&self) -> &IndexMap<String, String> {
        &self.vars
    }

    /// Get a value. Empty values are treated as unset.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Get a value that must be present and non-empty.
    pub fn require(&self, key: &str) -> Result<&str> {
        self.get(key)
            .ok_or_else(|| self.source.missing_variable(key, self.spans.get(key).copied()))
    }

    /// Assignments to hand to child processes.
    ///
    /// Only variables not already set in the process environment are returned,
    /// so the caller's environment always takes precedence.
    pub fn subprocess_env(&self) -> Vec<(String, String)> {
        self.unset_in(|key| std::env::var_os(key).is_some())
    }

    fn unset_in(&self, is_set: impl Fn(&str) -> bool) -> Vec<(String, String)> {
        self.vars
            .iter()
            .filter(|(key, _)| !is_set(key))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}
