//! Check operation - compare the output file against fresh types.

use std::{fs, io};

use eyre::{Result, WrapErr};
use supatype_core::{ContentStats, strip_header};
use supatype_gen::{CliCommand, CommandRunner};

use super::{Plan, generate::produce};
use crate::reports::{CheckReport, CheckStatus};

/// Execute the check operation.
///
/// The header is ignored when comparing, so a file only counts as stale
/// when its types differ. The CLI is only resolved once the output file is
/// known to exist.
pub fn check<R, F>(plan: &Plan, resolve_cli: F, runner: &R) -> Result<CheckReport>
where
    R: CommandRunner,
    F: FnOnce() -> supatype_gen::Result<CliCommand>,
{
    let existing = match fs::read_to_string(&plan.output) {
        Ok(content) => Some(content),
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => {
            return Err(e)
                .wrap_err_with(|| format!("Failed to read {}", plan.output.display()));
        }
    };

    let status = match existing {
        None => CheckStatus::Missing,
        Some(existing) => {
            let produced = produce(plan, resolve_cli()?, runner)?;
            let generated = produced.content;
            let existing = strip_header(&existing);
            if existing == generated {
                CheckStatus::UpToDate
            } else if plan.formatter.is_some() && !produced.formatted {
                tracing::debug!("formatter failed, skipping comparison");
                CheckStatus::Unformatted
            } else {
                tracing::debug!("output differs from generated types");
                CheckStatus::Stale {
                    existing_lines: ContentStats::collect(existing).lines,
                    generated_lines: ContentStats::collect(&generated).lines,
                }
            }
        }
    };

    Ok(CheckReport {
        output: plan.output_display(),
        regenerate_command: plan.regenerate_command.clone(),
        status,
    })
}

#[cfg(test)]
mod tests {
    use supatype_core::{Header, TypesFile};
    use supatype_gen::{
        GenError,
        testing::{ScriptedRunner, failure, success},
    };
    use tempfile::TempDir;

    use super::*;
    use crate::ops::tests::test_plan;

    fn cli() -> supatype_gen::Result<CliCommand> {
        Ok(CliCommand::new("supabase", Vec::new()))
    }

    fn write_output(plan: &Plan, body: &str) {
        TypesFile::new(&plan.output, Header::new(&plan.schemas), body)
            .write()
            .unwrap();
    }

    #[test]
    fn test_check_missing_output_skips_generation() {
        let root = TempDir::new().unwrap();
        let plan = test_plan(root.path(), None);
        let runner = ScriptedRunner::new();

        let report = check(&plan, || Err(GenError::CliNotFound), &runner).unwrap();

        assert_eq!(report.status, CheckStatus::Missing);
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_check_up_to_date_ignores_header() {
        let root = TempDir::new().unwrap();
        let plan = test_plan(root.path(), None);
        write_output(&plan, "export type Database = {}\n");
        let runner = ScriptedRunner::new()
            .respond(success("export type Database = {}"))
            .respond(success("export type Database = {}\n"));

        let report = check(&plan, cli, &runner).unwrap();

        assert!(report.is_up_to_date());
        assert_eq!(report.output, "lib/types/database.types.ts");
    }

    #[test]
    fn test_check_stale() {
        let root = TempDir::new().unwrap();
        let plan = test_plan(root.path(), None);
        write_output(&plan, "export type Database = {}\n");
        let runner = ScriptedRunner::new()
            .respond(success("raw"))
            .respond(success("export type Database = {\n  public: {}\n}\n"));

        let report = check(&plan, cli, &runner).unwrap();

        assert_eq!(
            report.status,
            CheckStatus::Stale {
                existing_lines: 1,
                generated_lines: 3,
            }
        );
        assert_eq!(report.regenerate_command, "supatype");
    }

    #[test]
    fn test_check_formatter_failure_is_not_stale() {
        let root = TempDir::new().unwrap();
        let plan = test_plan(root.path(), None);
        write_output(&plan, "export type Database = {}\n");
        let runner = ScriptedRunner::new()
            .respond(success("export type Database = {}"))
            .respond(failure("npm ERR! network"));

        let report = check(&plan, cli, &runner).unwrap();

        assert_eq!(report.status, CheckStatus::Unformatted);
        assert!(!report.is_up_to_date());
    }

    #[test]
    fn test_check_without_formatter_compares_raw_output() {
        let root = TempDir::new().unwrap();
        let mut plan = test_plan(root.path(), None);
        plan.formatter = None;
        write_output(&plan, "export type Database = {}");
        let runner = ScriptedRunner::new().respond(success("export type Database = {}\n"));

        let report = check(&plan, cli, &runner).unwrap();

        assert!(report.is_up_to_date());
        assert_eq!(runner.calls().len(), 1);
    }

    #[test]
    fn test_check_cli_missing_with_existing_output() {
        let root = TempDir::new().unwrap();
        let plan = test_plan(root.path(), None);
        write_output(&plan, "export type Database = {}\n");

        let err = check(&plan, || Err(GenError::CliNotFound), &ScriptedRunner::new()).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<GenError>(),
            Some(GenError::CliNotFound)
        ));
    }
}
