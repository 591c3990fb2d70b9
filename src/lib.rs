//! Build-and-install orchestration for a native library package.
//!
//! Drives an out-of-tree build through the project's own toolchain, then
//! stages the resulting headers and shared objects into the system include
//! and library roots and refreshes the dynamic-loader cache:
//!
//! - **Process** - Shell command execution with live output and typed failures
//! - **Build** - Clean, configure, compile inside the build directory
//! - **Artifacts** - Suffix-based discovery and metadata-preserving install
//! - **Loader** - Dynamic-loader cache refresh
//! - **Orchestrator** - The fixed, abort-on-first-failure sequence
//!
//! # Architecture
//!
//! ```text
//! native-installer (bin)
//!     │
//!     ├── config + layout ── install.toml → InstallLayout (absolute paths)
//!     ├── preflight ──────── required tools, install-root writability
//!     └── Orchestrator
//!           ├── artifact::ensure_dir(build_dir)
//!           ├── build::build ────── CommandRunner (clean/configure/compile)
//!           ├── artifact::ensure_dir(include_root)
//!           ├── artifact::install_headers
//!           ├── artifact::install_shared_objects
//!           ├── loader::refresh ─── CommandRunner
//!           └── manifest::write_manifest
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use native_installer::{InstallConfig, InstallLayout, Orchestrator, ShellRunner};
//! use std::path::Path;
//!
//! let root = Path::new(".");
//! let config = InstallConfig::load_or_default(root)?;
//! let layout = InstallLayout::resolve(root, &config, Path::new("install.toml"))?;
//! let report = Orchestrator::new(ShellRunner, &layout).run()?;
//! println!("installed {} headers", report.headers.len());
//! ```

pub mod artifact;
pub mod build;
pub mod config;
pub mod error;
pub mod layout;
pub mod loader;
pub mod manifest;
pub mod orchestrator;
pub mod preflight;
pub mod process;

#[cfg(test)]
pub(crate) mod testutil;

pub use config::{BuildCommands, InstallConfig};
pub use error::{InstallError, Result};
pub use layout::InstallLayout;
pub use orchestrator::{Orchestrator, RunPlan, RunReport, Stage};
pub use process::{CommandRunner, ShellRunner};
