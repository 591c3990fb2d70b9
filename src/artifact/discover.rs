//! Suffix-based artifact discovery.
//!
//! Discovery is split in two: [`list_dir`] reads one directory level from
//! disk, and [`select_by_suffix`] is a pure filter over that listing. The
//! filter never touches the filesystem, so its rules are testable on plain
//! values.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{InstallError, Result};

/// One entry directly inside a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedEntry {
    pub name: OsString,
    pub path: PathBuf,
    /// True for regular files.
    pub is_file: bool,
    /// True for symbolic links, whatever they point at. Links are resolved
    /// only after selection, so a dangling one with an unrelated name is
    /// never inspected.
    pub is_symlink: bool,
}

/// Keep files and symlinks whose name ends with `suffix`, sorted by name.
pub fn select_by_suffix<'a>(entries: &'a [ListedEntry], suffix: &str) -> Vec<&'a ListedEntry> {
    let mut selected: Vec<&ListedEntry> = entries
        .iter()
        .filter(|entry| entry.is_file || entry.is_symlink)
        .filter(|entry| entry.name.as_encoded_bytes().ends_with(suffix.as_bytes()))
        .collect();
    selected.sort_by(|a, b| a.name.cmp(&b.name));
    selected
}

/// List the entries directly inside `dir` without following links.
/// Subdirectories are reported but never descended into.
pub fn list_dir(dir: &Path) -> Result<Vec<ListedEntry>> {
    let metadata =
        fs::metadata(dir).map_err(|e| InstallError::io("reading source directory", dir, e))?;
    if !metadata.is_dir() {
        return Err(InstallError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let mut entries = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            InstallError::io("reading directory entry", &path, e.into())
        })?;
        let file_type = entry.file_type();
        entries.push(ListedEntry {
            name: entry.file_name().to_os_string(),
            path: entry.path().to_path_buf(),
            is_file: file_type.is_file(),
            is_symlink: file_type.is_symlink(),
        });
    }
    Ok(entries)
}

/// Files directly inside `dir` whose name ends with `suffix`, sorted by name.
///
/// A matching symlink counts when it resolves to a regular file. A matching
/// symlink that cannot be resolved is an error.
pub fn discover(dir: &Path, suffix: &str) -> Result<Vec<PathBuf>> {
    let entries = list_dir(dir)?;
    let mut found = Vec::new();
    for entry in select_by_suffix(&entries, suffix) {
        if entry.is_symlink {
            let target = fs::metadata(&entry.path)
                .map_err(|e| InstallError::io("resolving symlink", &entry.path, e))?;
            if !target.is_file() {
                continue;
            }
        }
        found.push(entry.path.clone());
    }
    Ok(found)
}
