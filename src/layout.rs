//! Resolved filesystem layout for one run.
//!
//! Built once from the workspace root and the config, then passed by
//! reference to every stage. Nothing downstream consults the process's
//! current directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{BuildCommands, InstallConfig};
use crate::error::{InstallError, Result};

#[derive(Debug, Clone)]
pub struct InstallLayout {
    /// Canonical project directory.
    pub root: PathBuf,
    /// Out-of-tree build directory under `root`.
    pub build_dir: PathBuf,
    /// Directory the build drops shared objects into.
    pub library_output_dir: PathBuf,
    /// Header source directories, relative to `root`, in install order.
    pub source_dirs: Vec<PathBuf>,
    pub namespace: String,
    pub include_root: PathBuf,
    pub lib_root: PathBuf,
    pub header_suffix: String,
    pub shared_object_suffix: String,
    pub commands: BuildCommands,
    pub required_tools: Vec<String>,
}

impl InstallLayout {
    /// Resolve `config` against the workspace `root`.
    ///
    /// `config_origin` names where the config came from, for error messages.
    pub fn resolve(root: &Path, config: &InstallConfig, config_origin: &Path) -> Result<Self> {
        config.validate(config_origin)?;

        let root = fs::canonicalize(root)
            .map_err(|e| InstallError::io("resolving workspace root", root, e))?;
        if !root.is_dir() {
            return Err(InstallError::NotADirectory { path: root });
        }

        Ok(Self {
            build_dir: root.join(&config.build_dir),
            library_output_dir: root.join(&config.library_output_dir),
            source_dirs: config.source_dirs.clone(),
            namespace: config.namespace.clone(),
            include_root: config.include_root.clone(),
            lib_root: config.lib_root.clone(),
            header_suffix: config.header_suffix.clone(),
            shared_object_suffix: config.shared_object_suffix.clone(),
            commands: config.commands.clone(),
            required_tools: config.required_tools.clone(),
            root,
        })
    }

    /// `<include_root>/<namespace>`, the root of this package's headers.
    pub fn header_root(&self) -> PathBuf {
        self.include_root.join(&self.namespace)
    }

    /// Absolute path of a declared source directory.
    pub fn source_path(&self, source_dir: &Path) -> PathBuf {
        self.root.join(source_dir)
    }
}
