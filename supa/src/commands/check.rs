use std::process::ExitCode;

use clap::Args;
use eyre::Result;
use supatype_gen::{CliCommand, SystemRunner};

use super::{GenerateArgs, UnwrapOrExit};
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args, Debug)]
pub struct CheckCommand {
    #[command(flatten)]
    pub args: GenerateArgs,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<ExitCode> {
        let plan = ops::plan(self.args.plan_options()).unwrap_or_exit();
        tracing::debug!(output = %plan.output_display(), "checking output");

        let report = ops::check(&plan, CliCommand::resolve, &SystemRunner)?;
        report.render(&mut TerminalOutput::new());

        if report.is_up_to_date() {
            Ok(ExitCode::SUCCESS)
        } else {
            Ok(ExitCode::FAILURE)
        }
    }
}
