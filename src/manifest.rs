//! Install manifest: a JSON record of the last successful install, kept in
//! the build directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::artifact::ArtifactFile;
use crate::error::{InstallError, Result};

const INSTALL_MANIFEST_FILENAME: &str = "install-manifest.json";

#[derive(Debug, Serialize)]
pub struct InstallManifest<'a> {
    pub schema: u32,
    pub installed_at_utc: String,
    pub namespace: &'a str,
    pub files: &'a [ArtifactFile],
}

pub fn manifest_path(build_dir: &Path) -> PathBuf {
    build_dir.join(INSTALL_MANIFEST_FILENAME)
}

/// Write the manifest for a finished install, replacing any previous one.
pub fn write_manifest(build_dir: &Path, namespace: &str, files: &[ArtifactFile]) -> Result<PathBuf> {
    let path = manifest_path(build_dir);
    let installed_at_utc = OffsetDateTime::now_utc().format(&Rfc3339).map_err(|e| {
        InstallError::io("timestamping install manifest", &path, std::io::Error::other(e))
    })?;
    let manifest = InstallManifest {
        schema: 1,
        installed_at_utc,
        namespace,
        files,
    };
    let bytes = serde_json::to_vec_pretty(&manifest).map_err(|e| {
        InstallError::io("serializing install manifest", &path, std::io::Error::other(e))
    })?;
    fs::write(&path, bytes).map_err(|e| InstallError::io("writing install manifest", &path, e))?;
    Ok(path)
}
