//! Shell command execution.
//!
//! Commands run through `/bin/sh -c` so a command line may be a compound
//! shell invocation. Standard output and standard error are inherited from
//! this process: build output streams to the terminal live and is never
//! buffered in memory.

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::{debug, error, info};

use crate::error::{InstallError, Result};

/// Runs a command line to completion, failing on any non-zero exit.
///
/// `cwd` overrides the working directory of the child only. The calling
/// process never changes its own current directory.
pub trait CommandRunner {
    fn run(&self, command: &str, cwd: Option<&Path>) -> Result<()>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, command: &str, cwd: Option<&Path>) -> Result<()> {
        (**self).run(command, cwd)
    }
}

/// The real runner: `/bin/sh -c <command>` with inherited stdio.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellRunner;

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str, cwd: Option<&Path>) -> Result<()> {
        let mut cmd = Command::new("/bin/sh");
        cmd.arg("-c")
            .arg(command)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }

        debug!(cmd = %command, cwd = ?cwd, "spawning command");
        let status = cmd.status().map_err(|source| {
            error!(cmd = %command, err = %source, "failed to start command");
            InstallError::Spawn {
                command: command.to_string(),
                source,
            }
        })?;

        if !status.success() {
            error!(cmd = %command, code = ?status.code(), "command failed");
            return Err(InstallError::CommandFailed {
                command: command.to_string(),
                code: status.code(),
            });
        }

        info!(cmd = %command, "command succeeded");
        Ok(())
    }
}

/// Check whether a program is resolvable on `PATH`.
pub fn exists(program: &str) -> bool {
    which::which(program).is_ok()
}
