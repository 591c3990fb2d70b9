//! Filesystem utilities for artifact installation: idempotent directory
//! preparation and metadata-preserving copies.

use std::fs::{self, File, FileTimes};
use std::io;
use std::os::unix::fs::MetadataExt;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{InstallError, Result};

/// Ensure `path` exists as a directory, creating it and any missing parents.
///
/// An existing directory is left untouched, contents included. A
/// non-directory at `path` is an error.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        debug!(path = %path.display(), "directory already present");
        return Ok(());
    }
    if path.exists() {
        return Err(InstallError::NotADirectory {
            path: path.to_path_buf(),
        });
    }

    fs::create_dir_all(path).map_err(|e| InstallError::io("creating directory", path, e))?;
    info!(path = %path.display(), "created directory");
    Ok(())
}

/// Copy a file, overwriting `dst`, and carry over permissions and timestamps.
///
/// `dst` resolving to the same inode as `src` is an error: truncating the
/// destination would empty the source before it is read.
pub fn copy_preserving(src: &Path, dst: &Path) -> Result<()> {
    let mut reader = File::open(src).map_err(|e| InstallError::io("opening file", src, e))?;
    let metadata = reader
        .metadata()
        .map_err(|e| InstallError::io("reading metadata", src, e))?;
    if let Ok(existing) = fs::metadata(dst) {
        if existing.dev() == metadata.dev() && existing.ino() == metadata.ino() {
            return Err(InstallError::SameFile {
                src: src.to_path_buf(),
                dst: dst.to_path_buf(),
            });
        }
    }
    let mut writer = File::create(dst).map_err(|e| InstallError::io("creating file", dst, e))?;

    io::copy(&mut reader, &mut writer).map_err(|e| InstallError::io("copying file", src, e))?;

    let mut times = FileTimes::new();
    if let Ok(accessed) = metadata.accessed() {
        times = times.set_accessed(accessed);
    }
    if let Ok(modified) = metadata.modified() {
        times = times.set_modified(modified);
    }
    writer
        .set_times(times)
        .map_err(|e| InstallError::io("setting timestamps", dst, e))?;
    // Permissions last: a read-only source mode must not block the writes above.
    writer
        .set_permissions(metadata.permissions())
        .map_err(|e| InstallError::io("setting permissions", dst, e))?;

    Ok(())
}
