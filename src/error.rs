//! Error types for the build-and-install pipeline.
//!
//! Every variant is fatal to a run. Callers propagate with `?` and the
//! binary reports the first failure it sees.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while building or installing.
#[derive(Debug, Error)]
pub enum InstallError {
    #[error("command failed ({}): {command}", exit_label(.code))]
    CommandFailed { command: String, code: Option<i32> },

    #[error("failed to start shell for command '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{action} '{}': {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("refusing to copy '{}' onto itself (destination '{}')", .src.display(), .dst.display())]
    SameFile { src: PathBuf, dst: PathBuf },

    #[error("path exists but is not a directory: {}", .path.display())]
    NotADirectory { path: PathBuf },

    #[error("invalid config '{}': {message}", .path.display())]
    Config { path: PathBuf, message: String },

    #[error("missing required host tools:\n{}", .tools.join("\n"))]
    MissingTools { tools: Vec<String> },
}

impl InstallError {
    pub(crate) fn io(action: &'static str, path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn config(path: &Path, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }

    /// Exit code of a failed command, if the failure was a command failure.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::CommandFailed { code, .. } => *code,
            _ => None,
        }
    }
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, InstallError>;
