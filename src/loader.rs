//! Dynamic-loader cache refresh.

use tracing::info;

use crate::error::Result;
use crate::process::CommandRunner;

/// Rebuild the loader cache so freshly installed shared objects resolve.
///
/// A failure here means the libraries are on disk but dependents may not
/// find them until the cache is rebuilt by hand.
pub fn refresh(runner: &impl CommandRunner, command: &str) -> Result<()> {
    info!(cmd = %command, "refreshing dynamic loader cache");
    runner.run(command, None)
}
