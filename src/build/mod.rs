//! Out-of-tree build driver.
//!
//! Runs clean, configure and compile in that order, each inside the build
//! directory. The configure command is expected to point back at the
//! project (the default is `cmake ..`). A failing step stops the build;
//! the build directory is left as it is for inspection.

use std::fmt;
use std::path::Path;

use tracing::info;

use crate::config::BuildCommands;
use crate::error::Result;
use crate::process::CommandRunner;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStep {
    Clean,
    Configure,
    Compile,
}

impl BuildStep {
    pub const ALL: [BuildStep; 3] = [BuildStep::Clean, BuildStep::Configure, BuildStep::Compile];

    /// The command line configured for this step.
    pub fn command<'a>(&self, commands: &'a BuildCommands) -> &'a str {
        match self {
            BuildStep::Clean => &commands.clean,
            BuildStep::Configure => &commands.configure,
            BuildStep::Compile => &commands.compile,
        }
    }
}

impl fmt::Display for BuildStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BuildStep::Clean => "clean",
            BuildStep::Configure => "configure",
            BuildStep::Compile => "compile",
        })
    }
}

/// Run every build step inside `build_dir`, stopping at the first failure.
///
/// `build_dir` must already exist.
pub fn build(runner: &impl CommandRunner, build_dir: &Path, commands: &BuildCommands) -> Result<()> {
    for step in BuildStep::ALL {
        let command = step.command(commands);
        info!(step = %step, cmd = %command, dir = %build_dir.display(), "running build step");
        runner.run(command, Some(build_dir))?;
    }
    Ok(())
}
