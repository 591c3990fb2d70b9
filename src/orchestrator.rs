//! The fixed build-and-install sequence.
//!
//! ```text
//! ensure(build_dir) -> build -> ensure(include_root)
//!     -> install headers -> install shared objects -> refresh loader cache
//! ```
//!
//! Strictly sequential. The first failure is returned as-is and nothing
//! already done is rolled back.

use std::fmt;
use std::path::PathBuf;

use tracing::info;

use crate::artifact::install::{header_batch, shared_object_batch, CopyBatch};
use crate::artifact::{ensure_dir, install_headers, install_shared_objects, ArtifactFile};
use crate::build::{self, BuildStep};
use crate::error::Result;
use crate::layout::InstallLayout;
use crate::loader;
use crate::manifest;
use crate::process::CommandRunner;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    PrepareBuildDir,
    Build,
    PrepareIncludeRoot,
    InstallHeaders,
    InstallSharedObjects,
    RefreshLoaderCache,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::PrepareBuildDir => "prepare build directory",
            Stage::Build => "build",
            Stage::PrepareIncludeRoot => "prepare include root",
            Stage::InstallHeaders => "install headers",
            Stage::InstallSharedObjects => "install shared objects",
            Stage::RefreshLoaderCache => "refresh loader cache",
        })
    }
}

/// What a successful run installed.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub headers: Vec<ArtifactFile>,
    pub shared_objects: Vec<ArtifactFile>,
    pub manifest: PathBuf,
}

/// What a run would do, computed without executing or copying anything.
#[derive(Debug, Clone)]
pub struct RunPlan {
    pub build_dir: PathBuf,
    pub build_commands: Vec<(BuildStep, String)>,
    pub header_batches: Vec<CopyBatch>,
    /// `None` until the build has produced the library output directory.
    pub shared_objects: Option<CopyBatch>,
    pub refresh_command: String,
}

pub struct Orchestrator<'a, R: CommandRunner> {
    runner: R,
    layout: &'a InstallLayout,
}

impl<'a, R: CommandRunner> Orchestrator<'a, R> {
    pub fn new(runner: R, layout: &'a InstallLayout) -> Self {
        Self { runner, layout }
    }

    /// Run every stage in order, stopping at the first failure.
    pub fn run(&self) -> Result<RunReport> {
        let layout = self.layout;

        enter(Stage::PrepareBuildDir);
        ensure_dir(&layout.build_dir)?;

        enter(Stage::Build);
        build::build(&self.runner, &layout.build_dir, &layout.commands)?;

        enter(Stage::PrepareIncludeRoot);
        ensure_dir(&layout.include_root)?;

        enter(Stage::InstallHeaders);
        let headers = install_headers(layout)?;

        enter(Stage::InstallSharedObjects);
        let shared_objects = install_shared_objects(layout)?;

        enter(Stage::RefreshLoaderCache);
        loader::refresh(&self.runner, &layout.commands.refresh_loader)?;

        let files: Vec<ArtifactFile> = headers.iter().chain(&shared_objects).cloned().collect();
        let manifest = manifest::write_manifest(&layout.build_dir, &layout.namespace, &files)?;
        info!(
            headers = headers.len(),
            shared_objects = shared_objects.len(),
            manifest = %manifest.display(),
            "install finished"
        );

        Ok(RunReport {
            headers,
            shared_objects,
            manifest,
        })
    }

    /// Resolve everything `run` would touch without running a command.
    pub fn plan(&self) -> Result<RunPlan> {
        let layout = self.layout;

        let header_batches = layout
            .source_dirs
            .iter()
            .map(|dir| header_batch(layout, dir))
            .collect::<Result<Vec<_>>>()?;
        let shared_objects = if layout.library_output_dir.is_dir() {
            Some(shared_object_batch(layout)?)
        } else {
            None
        };

        Ok(RunPlan {
            build_dir: layout.build_dir.clone(),
            build_commands: BuildStep::ALL
                .iter()
                .map(|step| (*step, step.command(&layout.commands).to_string()))
                .collect(),
            header_batches,
            shared_objects,
            refresh_command: layout.commands.refresh_loader.clone(),
        })
    }
}

fn enter(stage: Stage) {
    info!(stage = %stage, "starting stage");
}
