//! Test helpers shared across module tests.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use crate::error::{InstallError, Result};
use crate::process::CommandRunner;

/// A `CommandRunner` that records every invocation instead of spawning.
///
/// Commands listed in `failing` return `CommandFailed` with exit code 1.
#[derive(Debug, Default)]
pub(crate) struct RecordingRunner {
    calls: RefCell<Vec<(String, Option<PathBuf>)>>,
    failing: Vec<String>,
}

impl RecordingRunner {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn failing_on(command: &str) -> Self {
        Self {
            calls: RefCell::default(),
            failing: vec![command.to_string()],
        }
    }

    pub(crate) fn commands(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(c, _)| c.clone()).collect()
    }

    pub(crate) fn calls(&self) -> Vec<(String, Option<PathBuf>)> {
        self.calls.borrow().clone()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, command: &str, cwd: Option<&Path>) -> Result<()> {
        self.calls
            .borrow_mut()
            .push((command.to_string(), cwd.map(Path::to_path_buf)));
        if self.failing.iter().any(|f| f == command) {
            return Err(InstallError::CommandFailed {
                command: command.to_string(),
                code: Some(1),
            });
        }
        Ok(())
    }
}
