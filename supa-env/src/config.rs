//! `supatype.toml` configuration.

use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use miette::SourceSpan;
use serde::Deserialize;

use crate::{DEFAULT_ENV_FILE, Error, Result, error::SourceContext};

/// Config file name looked up in the project root.
pub const CONFIG_FILE: &str = "supatype.toml";

/// Default output path, relative to the project root.
pub const DEFAULT_OUTPUT: &str = "lib/types/database.types.ts";

/// Variable holding the Supabase project URL.
pub const DEFAULT_URL_VAR: &str = "NEXT_PUBLIC_SUPABASE_URL";

/// Variable holding the direct database URL used as fallback.
pub const DEFAULT_DB_URL_VAR: &str = "DATABASE_URL";

/// Root of `supatype.toml`. Every section and field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub project: ProjectConfig,
    pub generate: GenerateConfig,
    pub format: FormatConfig,
    pub verify: VerifyConfig,
}

/// Where project settings come from.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Env file, relative to the project root
    pub env_file: PathBuf,
    /// Variable holding the project URL
    pub url_var: String,
    /// Variable holding the fallback database URL
    pub db_url_var: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            env_file: PathBuf::from(DEFAULT_ENV_FILE),
            url_var: DEFAULT_URL_VAR.to_string(),
            db_url_var: DEFAULT_DB_URL_VAR.to_string(),
        }
    }
}

/// Generation settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerateConfig {
    /// Schemas always included, merged ahead of `--schema` flags
    pub schemas: Vec<String>,
    /// Output path, relative to the project root
    pub output: PathBuf,
    /// Command shown in the generated header
    pub regenerate_command: Option<String>,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            schemas: Vec::new(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            regenerate_command: None,
        }
    }
}

/// Formatter settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormatConfig {
    pub enabled: bool,
    /// Program and arguments; content is piped through stdin
    pub command: Vec<String>,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: ["npx", "--yes", "prettier@latest", "--parser", "typescript"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Post-generation checks.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VerifyConfig {
    /// Tables expected to appear in the generated types
    pub expect_tables: Vec<String>,
}

impl FromStr for Config {
    type Err = Box<Error>;

    /// Parse config from a string (uses "supatype.toml" as filename)
    fn from_str(content: &str) -> Result<Self> {
        Self::from_str_with_filename(content, CONFIG_FILE)
    }
}

impl Config {
    /// Parse config from a string with a custom filename for error reporting
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let ctx = SourceContext::new(content, filename);
        let config: Config = toml::from_str(content).map_err(|e| ctx.parse_error(e))?;
        config.validate(&ctx)?;
        Ok(config)
    }

    fn validate(&self, ctx: &SourceContext) -> Result<()> {
        if self.format.command.is_empty() {
            return Err(ctx.validation_error(
                "format.command must name a program",
                find_key_span(ctx.src(), "command"),
            ));
        }
        if self.generate.output.as_os_str().is_empty() {
            return Err(ctx.validation_error(
                "generate.output must not be empty",
                find_key_span(ctx.src(), "output"),
            ));
        }
        if self.generate.schemas.iter().any(|s| s.trim().is_empty()) {
            return Err(ctx.validation_error(
                "schema names must not be empty",
                find_key_span(ctx.src(), "schemas"),
            ));
        }
        for (key, value) in [
            ("url_var", &self.project.url_var),
            ("db_url_var", &self.project.db_url_var),
        ] {
            if value.is_empty() {
                return Err(ctx.validation_error(
                    format!("project.{key} must not be empty"),
                    find_key_span(ctx.src(), key),
                ));
            }
        }
        Ok(())
    }
}

/// Find the span of `key =` at the start of a line.
fn find_key_span(src: &str, key: &str) -> Option<SourceSpan> {
    let mut offset = 0;
    for line in src.split_inclusive('\n') {
        let trimmed = line.trim_start();
        let assigns = trimmed
            .strip_prefix(key)
            .is_some_and(|rest| rest.trim_start().starts_with('='));
        if assigns {
            let start = offset + (line.len() - trimmed.len());
            return Some(SourceSpan::from((start, key.len())));
        }
        offset += line.len();
    }
    None
}

/// A loaded `supatype.toml` with its location.
#[derive(Debug)]
pub struct ConfigFile {
    path: PathBuf,
    config: Config,
}

impl ConfigFile {
    /// Open and parse a config file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        let config = Config::from_str_with_filename(&content, &filename)?;
        tracing::debug!(path = %path.display(), "loaded config");

        Ok(Self { path, config })
    }

    /// Open `supatype.toml` in `root` if it exists.
    pub fn discover(root: impl AsRef<Path>) -> Result<Option<Self>> {
        let path = root.as_ref().join(CONFIG_FILE);
        if path.is_file() {
            Self::open(path).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the parsed config.
    pub fn config(&self) -> &Config {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.project.env_file, PathBuf::from(".env.local"));
        assert_eq!(config.project.url_var, "NEXT_PUBLIC_SUPABASE_URL");
        assert_eq!(config.project.db_url_var, "DATABASE_URL");
        assert_eq!(config.generate.output, PathBuf::from("lib/types/database.types.ts"));
        assert!(config.generate.schemas.is_empty());
        assert!(config.format.enabled);
        assert_eq!(config.format.command[0], "npx");
        assert!(config.verify.expect_tables.is_empty());
    }

    #[test]
    fn test_full_config() {
        let config = Config::from_str(
            r#"
            [project]
            env_file = ".env"
            db_url_var = "SUPABASE_DB_URL"

            [generate]
            schemas = ["public", "storage"]
            output = "src/db.ts"
            regenerate_command = "make types"

            [format]
            enabled = false
            command = ["biome", "format", "--stdin-file-path=db.ts"]

            [verify]
            expect_tables = ["invoice", "refund"]
            "#,
        )
        .unwrap();

        assert_eq!(config.project.env_file, PathBuf::from(".env"));
        assert_eq!(config.project.url_var, "NEXT_PUBLIC_SUPABASE_URL");
        assert_eq!(config.project.db_url_var, "SUPABASE_DB_URL");
        assert_eq!(config.generate.schemas, vec!["public", "storage"]);
        assert_eq!(config.generate.output, PathBuf::from("src/db.ts"));
        assert_eq!(config.generate.regenerate_command.as_deref(), Some("make types"));
        assert!(!config.format.enabled);
        assert_eq!(config.format.command, vec!["biome", "format", "--stdin-file-path=db.ts"]);
        assert_eq!(config.verify.expect_tables, vec!["invoice", "refund"]);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = Config::from_str("[generate]\nschema = [\"public\"]\n").unwrap_err();
        assert!(matches!(*err, Error::ConfigParse { .. }));
    }

    #[test]
    fn test_empty_format_command_rejected() {
        let src = "[format]\ncommand = []\n";
        let err = Config::from_str(src).unwrap_err();
        let Error::ConfigValidation { span, ref message, .. } = *err else {
            panic!("expected validation error");
        };
        assert_eq!(message, "format.command must name a program");
        let span = span.expect("span");
        assert_eq!(&src[span.offset()..span.offset() + span.len()], "command");
    }

    #[test]
    fn test_empty_schema_rejected() {
        let err = Config::from_str("[generate]\nschemas = [\"\"]\n").unwrap_err();
        assert_eq!(err.to_string(), "schema names must not be empty");
    }

    #[test]
    fn test_empty_url_var_rejected() {
        let err = Config::from_str("[project]\nurl_var = \"\"\n").unwrap_err();
        assert_eq!(err.to_string(), "project.url_var must not be empty");
    }

    #[test]
    fn test_discover_missing_is_none() {
        let temp = TempDir::new().unwrap();
        assert!(ConfigFile::discover(temp.path()).unwrap().is_none());
    }

    #[test]
    fn test_discover_existing() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(CONFIG_FILE),
            "[generate]\nschemas = [\"storage\"]\n",
        )
        .unwrap();

        let file = ConfigFile::discover(temp.path()).unwrap().expect("config");
        assert_eq!(file.path(), temp.path().join(CONFIG_FILE));
        assert_eq!(file.config().generate.schemas, vec!["storage"]);
    }

    #[test]
    fn test_open_missing_explicit_path() {
        let temp = TempDir::new().unwrap();
        let err = ConfigFile::open(temp.path().join("custom.toml")).unwrap_err();
        assert!(matches!(*err, Error::Io { .. }));
    }
}
