//! Test utilities for generation and formatting.
//!
//! This module is only available when the `testing` feature is enabled
//! or during tests.

use std::{
    cell::RefCell,
    collections::VecDeque,
    env,
    ffi::OsString,
    io,
    path::{Path, PathBuf},
};

use crate::{CommandOutput, CommandRunner, Invocation};

/// A [`CommandRunner`] that replays scripted responses in order and
/// records every invocation it receives.
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    responses: RefCell<VecDeque<io::Result<CommandOutput>>>,
    calls: RefCell<Vec<Invocation>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a completed process.
    pub fn respond(self, output: CommandOutput) -> Self {
        self.responses.borrow_mut().push_back(Ok(output));
        self
    }

    /// Queue a process that fails to start.
    pub fn spawn_error(self) -> Self {
        self.responses
            .borrow_mut()
            .push_back(Err(io::Error::from(io::ErrorKind::NotFound)));
        self
    }

    /// Invocations received so far.
    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, invocation: &Invocation) -> io::Result<CommandOutput> {
        self.calls.borrow_mut().push(invocation.clone());
        self.responses.borrow_mut().pop_front().unwrap_or_else(|| {
            Err(io::Error::other(format!(
                "no scripted response for `{}`",
                invocation
            )))
        })
    }
}

/// A process that exited 0 with the given stdout.
pub fn success(stdout: &str) -> CommandOutput {
    CommandOutput {
        code: Some(0),
        stdout: stdout.to_string(),
        ..CommandOutput::default()
    }
}

/// A process that exited 1 with the given stderr.
pub fn failure(stderr: &str) -> CommandOutput {
    CommandOutput {
        code: Some(1),
        stderr: stderr.to_string(),
        ..CommandOutput::default()
    }
}

/// Join directories into a `PATH`-style value.
pub fn join_paths<I, P>(dirs: I) -> OsString
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let dirs: Vec<PathBuf> = dirs.into_iter().map(|d| d.as_ref().to_path_buf()).collect();
    env::join_paths(dirs).expect("directories form a valid PATH")
}

/// Write an executable shell script named `name` into `dir`.
#[cfg(unix)]
pub fn install_fake_executable(dir: &Path, name: &str) -> PathBuf {
    install_script(dir, name, "exit 0\n")
}

/// Write an executable shell script with the given body into `dir`.
#[cfg(unix)]
pub fn install_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{}", body)).expect("write script");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
        .expect("chmod script");
    path
}
