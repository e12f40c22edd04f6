//! Locating the Supabase CLI.

use std::{
    env,
    ffi::OsStr,
    fmt,
    path::{Path, PathBuf},
};

use crate::{GenError, Invocation, Result};

/// How to invoke the Supabase CLI: a program plus leading arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliCommand {
    program: String,
    prefix: Vec<String>,
}

impl CliCommand {
    /// Use an explicit program with leading arguments.
    pub fn new(program: impl Into<String>, prefix: Vec<String>) -> Self {
        Self {
            program: program.into(),
            prefix,
        }
    }

    /// Find the CLI on the current `PATH`.
    pub fn resolve() -> Result<Self> {
        Self::resolve_in(&env::var_os("PATH").unwrap_or_default())
    }

    /// Find the CLI on the given search path.
    ///
    /// A globally installed `supabase` wins; otherwise `npx --yes supabase`
    /// fetches it on demand.
    pub fn resolve_in(path_var: &OsStr) -> Result<Self> {
        if let Some(supabase) = find_executable("supabase", path_var) {
            return Ok(Self::new(supabase.display().to_string(), Vec::new()));
        }
        if let Some(npx) = find_executable("npx", path_var) {
            return Ok(Self::new(
                npx.display().to_string(),
                vec!["--yes".to_string(), "supabase".to_string()],
            ));
        }
        Err(GenError::CliNotFound)
    }

    /// Start an invocation of the CLI with the given subcommand arguments.
    pub fn invocation<I, S>(&self, args: I) -> Invocation
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Invocation::new(&self.program)
            .args(self.prefix.iter().cloned())
            .args(args)
    }
}

impl fmt::Display for CliCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.prefix {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Search `path_var` for an executable named `name`.
pub fn find_executable(name: &str, path_var: &OsStr) -> Option<PathBuf> {
    env::split_paths(path_var)
        .filter(|dir| !dir.as_os_str().is_empty())
        .flat_map(|dir| candidates(&dir, name))
        .find(|candidate| is_executable(candidate))
}

#[cfg(windows)]
fn candidates(dir: &Path, name: &str) -> Vec<PathBuf> {
    let exts = env::var_os("PATHEXT").unwrap_or_else(|| ".COM;.EXE;.BAT;.CMD".into());
    let mut out = vec![dir.join(name)];
    out.extend(
        exts.to_string_lossy()
            .split(';')
            .filter(|ext| !ext.is_empty())
            .map(|ext| dir.join(format!("{name}{ext}"))),
    );
    out
}

#[cfg(not(windows))]
fn candidates(dir: &Path, name: &str) -> Vec<PathBuf> {
    vec![dir.join(name)]
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(all(test, unix))]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::testing::{install_fake_executable, join_paths};

    #[test]
    fn test_resolve_prefers_global_supabase() {
        let bin = TempDir::new().unwrap();
        let supabase = install_fake_executable(bin.path(), "supabase");
        install_fake_executable(bin.path(), "npx");

        let cli = CliCommand::resolve_in(&join_paths([bin.path()])).unwrap();
        assert_eq!(cli, CliCommand::new(supabase.display().to_string(), Vec::new()));
    }

    #[test]
    fn test_resolve_falls_back_to_npx() {
        let bin = TempDir::new().unwrap();
        let npx = install_fake_executable(bin.path(), "npx");

        let cli = CliCommand::resolve_in(&join_paths([bin.path()])).unwrap();
        assert_eq!(
            cli,
            CliCommand::new(
                npx.display().to_string(),
                vec!["--yes".into(), "supabase".into()]
            )
        );
        assert_eq!(cli.to_string(), format!("{} --yes supabase", npx.display()));
    }

    #[test]
    fn test_resolve_searches_in_order() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        install_fake_executable(first.path(), "npx");
        let supabase = install_fake_executable(second.path(), "supabase");

        let cli = CliCommand::resolve_in(&join_paths([first.path(), second.path()])).unwrap();
        assert_eq!(cli, CliCommand::new(supabase.display().to_string(), Vec::new()));
    }

    #[test]
    fn test_resolve_not_found() {
        let empty = TempDir::new().unwrap();
        let err = CliCommand::resolve_in(&join_paths([empty.path()])).unwrap_err();
        assert!(matches!(err, GenError::CliNotFound));
    }

    #[test]
    fn test_non_executable_is_skipped() {
        let bin = TempDir::new().unwrap();
        std::fs::write(bin.path().join("supabase"), "not executable").unwrap();

        assert!(find_executable("supabase", &join_paths([bin.path()])).is_none());
    }

    #[test]
    fn test_invocation_prepends_prefix() {
        let cli = CliCommand::new("npx", vec!["--yes".into(), "supabase".into()]);
        let invocation = cli.invocation(["gen", "types"]);
        assert_eq!(invocation.program, "npx");
        assert_eq!(invocation.args, vec!["--yes", "supabase", "gen", "types"]);
    }
}
