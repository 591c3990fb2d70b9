//! `install.toml` loading and validation.
//!
//! Every field is optional; absent fields fall back to the layout the
//! package has always shipped with (headers from `net`, `base` and
//! `net/poller` into `/usr/include/zfwmuduo`, `.so` files from `lib` into
//! `/usr/lib`).

use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::Deserialize;

use crate::error::{InstallError, Result};

/// Default config file name, looked up in the workspace root.
pub const CONFIG_FILENAME: &str = "install.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InstallConfig {
    pub build_dir: PathBuf,
    pub library_output_dir: PathBuf,
    pub source_dirs: Vec<PathBuf>,
    pub namespace: String,
    pub include_root: PathBuf,
    pub lib_root: PathBuf,
    pub header_suffix: String,
    pub shared_object_suffix: String,
    pub required_tools: Vec<String>,
    pub commands: BuildCommands,
}

/// External command lines, each handed to the shell verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildCommands {
    pub clean: String,
    pub configure: String,
    pub compile: String,
    pub refresh_loader: String,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            build_dir: PathBuf::from("build"),
            library_output_dir: PathBuf::from("lib"),
            source_dirs: ["net", "base", "net/poller"]
                .into_iter()
                .map(PathBuf::from)
                .collect(),
            namespace: "zfwmuduo".to_string(),
            include_root: PathBuf::from("/usr/include"),
            lib_root: PathBuf::from("/usr/lib"),
            header_suffix: ".h".to_string(),
            shared_object_suffix: ".so".to_string(),
            required_tools: ["cmake", "make", "ldconfig"]
                .into_iter()
                .map(String::from)
                .collect(),
            commands: BuildCommands::default(),
        }
    }
}

impl Default for BuildCommands {
    fn default() -> Self {
        Self {
            // A fresh build directory has no Makefile yet; cleaning it is a no-op.
            clean: "if [ -f Makefile ]; then make clean; fi".to_string(),
            configure: "cmake ..".to_string(),
            compile: "make".to_string(),
            refresh_loader: "ldconfig".to_string(),
        }
    }
}

impl InstallConfig {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| InstallError::io("reading config", path, e))?;
        let config: Self = toml::from_str(&text)
            .map_err(|e| InstallError::config(path, e.to_string()))?;
        config.validate(path)?;
        Ok(config)
    }

    /// Load `install.toml` from `root` if present, else the defaults.
    pub fn load_or_default(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILENAME);
        if path.is_file() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Check the config for values that would produce an unsafe or
    /// nonsensical layout. `origin` is only used in error messages.
    pub fn validate(&self, origin: &Path) -> Result<()> {
        let fail = |message: String| Err(InstallError::config(origin, message));

        let mut namespace_parts = Path::new(&self.namespace).components();
        match (namespace_parts.next(), namespace_parts.next()) {
            (Some(Component::Normal(_)), None) => {}
            _ => {
                return fail(format!(
                    "namespace must be a single directory name, got '{}'",
                    self.namespace
                ))
            }
        }

        parse_relative_path(&self.build_dir, "build_dir").or_else(fail)?;
        parse_relative_path(&self.library_output_dir, "library_output_dir").or_else(fail)?;
        if self.source_dirs.is_empty() {
            return fail("source_dirs must list at least one directory".to_string());
        }
        for dir in &self.source_dirs {
            parse_relative_path(dir, "source_dirs").or_else(fail)?;
        }

        for (field, root) in [("include_root", &self.include_root), ("lib_root", &self.lib_root)] {
            if !root.is_absolute() {
                return fail(format!(
                    "{field} must be absolute, got '{}'",
                    root.display()
                ));
            }
        }

        for (field, suffix) in [
            ("header_suffix", &self.header_suffix),
            ("shared_object_suffix", &self.shared_object_suffix),
        ] {
            if suffix.is_empty() || suffix.contains('/') {
                return fail(format!("{field} must be a non-empty file name suffix"));
            }
        }

        for (field, command) in [
            ("commands.clean", &self.commands.clean),
            ("commands.configure", &self.commands.configure),
            ("commands.compile", &self.commands.compile),
            ("commands.refresh_loader", &self.commands.refresh_loader),
        ] {
            if command.trim().is_empty() {
                return fail(format!("{field} must not be empty"));
            }
        }

        Ok(())
    }
}

fn parse_relative_path(path: &Path, field: &str) -> std::result::Result<(), String> {
    if path.as_os_str().is_empty() {
        return Err(format!("{field} must not be empty"));
    }
    if path.is_absolute() {
        return Err(format!(
            "{field} must be relative, got absolute path '{}'",
            path.display()
        ));
    }
    for component in path.components() {
        if matches!(
            component,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        ) {
            return Err(format!(
                "{field} contains invalid traversal/root component in '{}'",
                path.display()
            ));
        }
    }
    Ok(())
}
