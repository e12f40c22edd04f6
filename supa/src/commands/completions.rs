use std::{io, process::ExitCode};

use clap::{Args, CommandFactory};
use eyre::Result;

use super::Cli;

#[derive(Args, Debug)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    shell: clap_complete::Shell,
}

impl CompletionsCommand {
    pub fn run(&self) -> Result<ExitCode> {
        let mut cmd = Cli::command();
        clap_complete::generate(self.shell, &mut cmd, "supatype", &mut io::stdout());
        Ok(ExitCode::SUCCESS)
    }
}
