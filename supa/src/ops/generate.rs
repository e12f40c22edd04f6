//! Generate operation - run the CLI, format and write the types file.

use eyre::Result;
use supatype_core::{ContentStats, Header, TableCheck, TypesFile};
use supatype_gen::{CliCommand, CommandRunner, Formatted, Formatter, Source, TypeGenerator};

use super::Plan;
use crate::reports::{GenerateReport, GenerationResult, PlanReport};

/// Options for the generate operation.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenerateOptions {
    /// Whether to preview without writing the file.
    pub dry_run: bool,
    /// Whether to include verbose details in the report.
    pub verbose: bool,
}

/// Formatted types fresh from the database.
#[derive(Debug)]
pub struct Produced {
    pub content: String,
    pub method: &'static str,
    pub primary_error: Option<String>,
    pub formatted: bool,
}

/// Describe the run before it starts.
pub fn plan_report(plan: &Plan, cli: &CliCommand, verbose: bool) -> PlanReport {
    PlanReport {
        project_id: plan.project.to_string(),
        schemas: plan.schemas.clone(),
        output: plan.output_display(),
        env_file: plan.display_path(&plan.env_file),
        cli: cli.to_string(),
        has_fallback: plan.fallback_url.is_some(),
        verbose,
    }
}

/// Generate types with the primary method, falling back to a direct
/// connection, then format them.
pub fn produce<R: CommandRunner>(plan: &Plan, cli: CliCommand, runner: &R) -> Result<Produced> {
    let generator = TypeGenerator::new(runner, cli, plan.schemas.clone())
        .cwd(&plan.root)
        .env(plan.child_env.clone());

    let generated = generator.generate(
        Source::ProjectId(plan.project.to_string()),
        plan.fallback_url.clone().map(Source::DbUrl),
    )?;

    let formatted = match &plan.formatter {
        Some(command) => Formatter::with_command(runner, command.clone())
            .cwd(&plan.root)
            .env(plan.child_env.clone())
            .format(&generated.content)?,
        None => Formatted {
            content: generated.content.clone(),
            applied: false,
        },
    };

    Ok(Produced {
        content: formatted.content,
        method: generated.source.method(),
        primary_error: generated.primary_error.map(|e| e.to_string()),
        formatted: formatted.applied,
    })
}

/// Execute the generate operation.
pub fn generate<R: CommandRunner>(
    plan: &Plan,
    cli: CliCommand,
    runner: &R,
    opts: GenerateOptions,
) -> Result<GenerateReport> {
    let produced = produce(plan, cli, runner)?;

    let stats = ContentStats::collect(&produced.content);
    let tables = TableCheck::run(&produced.content, &plan.expect_tables);

    let header = Header::new(&plan.schemas).regenerate_command(&plan.regenerate_command);
    let file = TypesFile::new(&plan.output, header, produced.content);
    let result = if opts.dry_run {
        GenerationResult::Preview(file.render())
    } else {
        GenerationResult::Written(file.write()?)
    };

    Ok(GenerateReport {
        output: plan.output_display(),
        method: produced.method,
        primary_error: produced.primary_error,
        format_enabled: plan.formatter.is_some(),
        formatted: produced.formatted,
        stats,
        tables,
        verbose: opts.verbose,
        result,
    })
}
