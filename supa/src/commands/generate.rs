use std::process::ExitCode;

use clap::Args;
use eyre::Result;
use supatype_gen::{CliCommand, SystemRunner};

use super::{GenerateArgs, UnwrapOrExit};
use crate::{
    ops::{self, GenerateOptions},
    reports::{Output, Report, TerminalOutput},
};

#[derive(Args, Debug)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub args: GenerateArgs,

    /// Preview the generated file without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<ExitCode> {
        let plan = ops::plan(self.args.plan_options()).unwrap_or_exit();
        let cli = CliCommand::resolve()?;

        let mut out = TerminalOutput::new();
        ops::plan_report(&plan, &cli, self.args.verbose).render(&mut out);
        out.newline();

        let report = ops::generate(
            &plan,
            cli,
            &SystemRunner,
            GenerateOptions {
                dry_run: self.dry_run,
                verbose: self.args.verbose,
            },
        )?;
        report.render(&mut out);

        Ok(ExitCode::SUCCESS)
    }
}
