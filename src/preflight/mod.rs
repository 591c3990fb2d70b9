//! Preflight checks run before any build step.
//!
//! Validates that the host has the programs the configured commands call
//! and reports whether this process can write to the install roots. This
//! prevents a long compile from ending in a missing `ldconfig` or a
//! permission error.
//!
//! # Example
//!
//! ```rust
//! use native_installer::preflight::check_required_tools;
//!
//! let tools = vec!["sh".to_string()];
//! assert!(check_required_tools(&tools).is_ok());
//! ```

use std::path::Path;

use nix::unistd::{access, geteuid, AccessFlags};
use tracing::warn;

use crate::error::{InstallError, Result};
use crate::process;

/// Check that every listed tool is on `PATH`.
///
/// # Returns
///
/// * `Ok(())` if all tools are found
/// * `Err(MissingTools)` listing every tool that is absent
pub fn check_required_tools(tools: &[String]) -> Result<()> {
    let missing: Vec<String> = tools
        .iter()
        .filter(|tool| !process::exists(tool))
        .map(|tool| format!("  {tool}"))
        .collect();

    if !missing.is_empty() {
        return Err(InstallError::MissingTools { tools: missing });
    }
    Ok(())
}

/// True when running with an effective user id of root.
pub fn is_privileged() -> bool {
    geteuid().is_root()
}

/// Warn, without failing, about install roots this process probably cannot
/// write to. Privilege escalation is left to the operator.
pub fn warn_if_unprivileged(roots: &[&Path]) {
    if is_privileged() {
        return;
    }
    for root in roots {
        if !is_writable(root) {
            warn!(
                path = %root.display(),
                "install root is not writable by this user; re-run with elevated privileges"
            );
        }
    }
}

/// Writable check on the nearest existing ancestor of `path`.
fn is_writable(path: &Path) -> bool {
    let Some(existing) = path.ancestors().find(|p| p.exists()) else {
        return false;
    };
    access(existing, AccessFlags::W_OK).is_ok()
}
