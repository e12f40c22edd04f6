//! Plan operation - resolve flags, config and env file into one run plan.

use std::path::{Path, PathBuf};

use supatype_core::{DEFAULT_REGENERATE_COMMAND, merge_schemas};
use supatype_env::{Config, ConfigFile, EnvFile, ProjectRef, Result};

/// Command-line inputs to planning.
#[derive(Debug, Clone, Copy)]
pub struct PlanOptions<'a> {
    /// Project root.
    pub root: &'a Path,
    /// Explicit config path (must exist when given).
    pub config: Option<&'a Path>,
    /// Explicit env file path.
    pub env_file: Option<&'a Path>,
    /// Explicit output path.
    pub output: Option<&'a Path>,
    /// Schemas passed with `--schema`.
    pub schemas: &'a [String],
    /// Fallback database URL passed with `--db-url`.
    pub db_url: Option<&'a str>,
    /// Whether formatting was disabled with `--no-format`.
    pub no_format: bool,
}

/// Everything a generation run needs, resolved.
#[derive(Debug, Clone)]
pub struct Plan {
    pub root: PathBuf,
    pub env_file: PathBuf,
    pub output: PathBuf,
    pub schemas: Vec<String>,
    pub project: ProjectRef,
    /// Connection string for the direct-connection fallback.
    pub fallback_url: Option<String>,
    /// Env file variables handed to child processes.
    pub child_env: Vec<(String, String)>,
    /// Formatter command, `None` when formatting is disabled.
    pub formatter: Option<Vec<String>>,
    pub regenerate_command: String,
    pub expect_tables: Vec<String>,
}

impl Plan {
    /// Display a path relative to the project root when it lies inside it.
    pub fn display_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .display()
            .to_string()
    }

    /// The output path for display.
    pub fn output_display(&self) -> String {
        self.display_path(&self.output)
    }
}

/// Build the run plan.
///
/// Flag paths are used as given; paths from `supatype.toml` and the
/// defaults are relative to the project root.
pub fn plan(opts: PlanOptions) -> Result<Plan> {
    let config = match opts.config {
        Some(path) => Some(ConfigFile::open(path)?),
        None => ConfigFile::discover(opts.root)?,
    };
    let config = config.map(|file| file.config().clone()).unwrap_or_default();
    plan_with_config(opts, config)
}

fn plan_with_config(opts: PlanOptions, config: Config) -> Result<Plan> {
    let root = opts.root.to_path_buf();

    let env_file = opts
        .env_file
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.join(&config.project.env_file));
    tracing::debug!(path = %env_file.display(), "loading environment");
    let env = EnvFile::open(&env_file)?;

    let project_url = env.require(&config.project.url_var)?;
    let project = ProjectRef::from_url(project_url)?;

    let fallback_url = opts
        .db_url
        .filter(|url| !url.is_empty())
        .or_else(|| env.get(&config.project.db_url_var))
        .map(str::to_string);

    let schemas = merge_schemas([config.generate.schemas.as_slice(), opts.schemas]);

    let output = opts
        .output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.join(&config.generate.output));

    let formatter = (config.format.enabled && !opts.no_format).then_some(config.format.command);

    Ok(Plan {
        root,
        env_file,
        output,
        schemas,
        project,
        fallback_url,
        child_env: env.subprocess_env(),
        formatter,
        regenerate_command: config
            .generate
            .regenerate_command
            .unwrap_or_else(|| DEFAULT_REGENERATE_COMMAND.to_string()),
        expect_tables: config.verify.expect_tables,
    })
}

#[cfg(test)]
mod tests {
    use std::{fs, str::FromStr};

    use supatype_env::Error;
    use tempfile::TempDir;

    use super::*;

    const ENV: &str = "NEXT_PUBLIC_SUPABASE_URL=https://abcdefgh.supabase.co\n";

    fn project(env: &str) -> TempDir {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join(".env.local"), env).unwrap();
        root
    }

    fn options(root: &Path) -> PlanOptions<'_> {
        PlanOptions {
            root,
            config: None,
            env_file: None,
            output: None,
            schemas: &[],
            db_url: None,
            no_format: false,
        }
    }

    #[test]
    fn test_plan_defaults() {
        let root = project(ENV);
        let plan = plan(options(root.path())).unwrap();

        assert_eq!(plan.project.as_str(), "abcdefgh");
        assert_eq!(plan.schemas, vec!["public"]);
        assert_eq!(plan.output, root.path().join("lib/types/database.types.ts"));
        assert_eq!(plan.output_display(), "lib/types/database.types.ts");
        assert_eq!(plan.env_file, root.path().join(".env.local"));
        assert_eq!(plan.fallback_url, None);
        assert_eq!(plan.regenerate_command, "supatype");
        assert_eq!(plan.formatter.as_ref().map(|c| c[0].as_str()), Some("npx"));
        assert!(plan.expect_tables.is_empty());
    }

    #[test]
    fn test_plan_fallback_from_env_file() {
        let root = project(&format!("{ENV}DATABASE_URL=\"postgres://u:p@h/db\"\n"));
        let plan = plan(options(root.path())).unwrap();
        assert_eq!(plan.fallback_url.as_deref(), Some("postgres://u:p@h/db"));
    }

    #[test]
    fn test_plan_db_url_flag_wins() {
        let root = project(&format!("{ENV}DATABASE_URL=postgres://env\n"));
        let opts = PlanOptions {
            db_url: Some("postgres://flag"),
            ..options(root.path())
        };
        let plan = plan(opts).unwrap();
        assert_eq!(plan.fallback_url.as_deref(), Some("postgres://flag"));
    }

    #[test]
    fn test_plan_merges_config_and_flag_schemas() {
        let root = project(ENV);
        fs::write(
            root.path().join("supatype.toml"),
            "[generate]\nschemas = [\"storage\"]\n",
        )
        .unwrap();
        let schemas = vec!["auth".to_string(), "public".to_string(), "storage".to_string()];
        let opts = PlanOptions {
            schemas: &schemas,
            ..options(root.path())
        };

        let plan = plan(opts).unwrap();
        assert_eq!(plan.schemas, vec!["public", "storage", "auth"]);
    }

    #[test]
    fn test_plan_flags_override_config() {
        let root = project(ENV);
        let config = Config::from_str(
            "[generate]\noutput = \"src/db.ts\"\nregenerate_command = \"make types\"\n\
             [format]\nenabled = true\n[verify]\nexpect_tables = [\"invoice\"]\n",
        )
        .unwrap();
        let output = root.path().join("custom.ts");
        let opts = PlanOptions {
            output: Some(&output),
            no_format: true,
            ..options(root.path())
        };

        let plan = plan_with_config(opts, config).unwrap();
        assert_eq!(plan.output, output);
        assert_eq!(plan.formatter, None);
        assert_eq!(plan.regenerate_command, "make types");
        assert_eq!(plan.expect_tables, vec!["invoice"]);
    }

    #[test]
    fn test_plan_custom_env_vars() {
        let root = project("SUPABASE_URL=https://zzz.supabase.co\nDB=postgres://d\n");
        let config =
            Config::from_str("[project]\nurl_var = \"SUPABASE_URL\"\ndb_url_var = \"DB\"\n").unwrap();

        let plan = plan_with_config(options(root.path()), config).unwrap();
        assert_eq!(plan.project.as_str(), "zzz");
        assert_eq!(plan.fallback_url.as_deref(), Some("postgres://d"));
    }

    #[test]
    fn test_plan_missing_env_file() {
        let root = TempDir::new().unwrap();
        let err = plan(options(root.path())).unwrap_err();
        assert!(matches!(*err, Error::MissingEnvFile { .. }));
    }

    #[test]
    fn test_plan_missing_url_var() {
        let root = project("DATABASE_URL=postgres://x\n");
        let err = plan(options(root.path())).unwrap_err();
        assert_eq!(
            err.to_string(),
            format!(
                "missing NEXT_PUBLIC_SUPABASE_URL in {}",
                root.path().join(".env.local").display()
            )
        );
    }

    #[test]
    fn test_plan_invalid_project_url() {
        let root = project("NEXT_PUBLIC_SUPABASE_URL=http://localhost:54321\n");
        let err = plan(options(root.path())).unwrap_err();
        assert!(matches!(*err, Error::InvalidProjectUrl { .. }));
    }

    #[test]
    fn test_plan_explicit_config_must_exist() {
        let root = project(ENV);
        let missing = root.path().join("nope.toml");
        let opts = PlanOptions {
            config: Some(&missing),
            ..options(root.path())
        };
        let err = plan(opts).unwrap_err();
        assert!(matches!(*err, Error::Io { .. }));
    }

    #[test]
    fn test_display_path_outside_root() {
        let root = project(ENV);
        let plan = plan(options(root.path())).unwrap();
        assert_eq!(plan.display_path(Path::new("/elsewhere/x.ts")), "/elsewhere/x.ts");
    }
}
