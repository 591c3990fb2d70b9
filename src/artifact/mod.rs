//! Artifact discovery and installation.
//!
//! - [`discover`] - Non-recursive, suffix-based file discovery
//! - [`filesystem`] - Directory preparation and metadata-preserving copies
//! - [`install`] - Header and shared-object installation into the system roots
//!
//! # Usage
//!
//! ```rust,ignore
//! use native_installer::artifact::install::{install_headers, install_shared_objects};
//!
//! let headers = install_headers(&layout)?;
//! let libs = install_shared_objects(&layout)?;
//! ```

pub mod discover;
pub mod filesystem;
pub mod install;

pub use filesystem::ensure_dir;
pub use install::{install_headers, install_shared_objects, ArtifactFile, ArtifactKind};
