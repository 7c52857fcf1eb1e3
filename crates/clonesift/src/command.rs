use std::ffi::OsStr;
use std::path::PathBuf;
use std::process::{Command as StdCommand, ExitStatus};

use crate::error::{Error, Result};

/// Thin wrapper over [`std::process::Command`] that remembers the program
/// name for error reporting.
#[derive(Debug)]
pub struct Command {
    inner: StdCommand,
    program: String,
}

impl Command {
    /// `program` is passed to the OS untouched; only the remembered name is lossy.
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        let program = program.as_ref();
        Self {
            inner: StdCommand::new(program),
            program: program.to_string_lossy().into_owned(),
        }
    }

    /// Locate `program` on `PATH` (or accept it as a path).
    pub fn locate(program: &str) -> Result<PathBuf> {
        which::which(program).map_err(|e| Error::CommandNotFound {
            program: program.to_string(),
            source: e,
        })
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.inner.args(args);
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn executable(&self) -> &OsStr {
        self.inner.get_program()
    }

    /// Command line for logs.
    pub fn display(&self) -> String {
        let mut line = self.program.clone();
        for arg in self.inner.get_args() {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }

    /// Run to completion with inherited stdio.
    pub fn status(&mut self) -> Result<ExitStatus> {
        self.inner.status().map_err(|e| Error::CommandFailed {
            program: self.program.clone(),
            source: e,
        })
    }
}
