//! Header and shared-object installation.
//!
//! Installation happens one directory at a time: compute the destination,
//! make sure it exists, discover the matching files, copy each one. The
//! first failure stops the whole install; nothing is skipped.

use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use tracing::info;

use super::discover::discover;
use super::filesystem::{copy_preserving, ensure_dir};
use crate::error::Result;
use crate::layout::InstallLayout;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Header,
    SharedObject,
}

/// A discovered file and where it gets installed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactFile {
    pub kind: ArtifactKind,
    pub source: PathBuf,
    pub destination: PathBuf,
}

/// All artifacts from one source directory, headed for one destination directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyBatch {
    pub source_dir: PathBuf,
    pub destination_dir: PathBuf,
    pub files: Vec<ArtifactFile>,
}

/// Destination for headers from `source_dir`: the source's relative
/// structure mirrored under `header_root`, so `net/poller` lands in
/// `<header_root>/net/poller` and never gets flattened.
pub fn header_destination(header_root: &Path, source_dir: &Path) -> PathBuf {
    source_dir
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .fold(header_root.to_path_buf(), |dest, part| dest.join(part))
}

/// Plan the header copies for one declared source directory.
pub fn header_batch(layout: &InstallLayout, source_dir: &Path) -> Result<CopyBatch> {
    let source = layout.source_path(source_dir);
    let destination_dir = header_destination(&layout.header_root(), source_dir);
    let files = discover(&source, &layout.header_suffix)?
        .into_iter()
        .map(|path| artifact_in(ArtifactKind::Header, path, &destination_dir))
        .collect();

    Ok(CopyBatch {
        source_dir: source,
        destination_dir,
        files,
    })
}

/// Plan the shared-object copies: every match in the library output
/// directory goes straight into the library root.
pub fn shared_object_batch(layout: &InstallLayout) -> Result<CopyBatch> {
    let files = discover(&layout.library_output_dir, &layout.shared_object_suffix)?
        .into_iter()
        .map(|path| artifact_in(ArtifactKind::SharedObject, path, &layout.lib_root))
        .collect();

    Ok(CopyBatch {
        source_dir: layout.library_output_dir.clone(),
        destination_dir: layout.lib_root.clone(),
        files,
    })
}

fn artifact_in(kind: ArtifactKind, source: PathBuf, destination_dir: &Path) -> ArtifactFile {
    // discover() only yields entries read from a directory, which always have a file name.
    let name = source.file_name().unwrap_or_default().to_os_string();
    ArtifactFile {
        kind,
        destination: destination_dir.join(name),
        source,
    }
}

/// Create the batch's destination directory, then copy every file into it.
pub fn install_batch(batch: &CopyBatch) -> Result<()> {
    ensure_dir(&batch.destination_dir)?;
    for file in &batch.files {
        copy_preserving(&file.source, &file.destination)?;
        info!(
            src = %file.source.display(),
            dst = %file.destination.display(),
            "installed file"
        );
    }
    Ok(())
}

/// Install headers from every declared source directory, in declaration order.
pub fn install_headers(layout: &InstallLayout) -> Result<Vec<ArtifactFile>> {
    let mut installed = Vec::new();
    for source_dir in &layout.source_dirs {
        let batch = header_batch(layout, source_dir)?;
        install_batch(&batch)?;
        installed.extend(batch.files);
    }
    Ok(installed)
}

/// Install every shared object from the library output directory.
///
/// The library root is prepared before the output directory is listed.
pub fn install_shared_objects(layout: &InstallLayout) -> Result<Vec<ArtifactFile>> {
    ensure_dir(&layout.lib_root)?;
    let batch = shared_object_batch(layout)?;
    install_batch(&batch)?;
    Ok(batch.files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InstallConfig;
    use crate::error::InstallError;
    use std::fs;
    use tempfile::TempDir;

    /// Workspace with `project/` as root and install roots under `sys/`.
    fn layout_in(temp: &TempDir) -> InstallLayout {
        let project = temp.path().join("project");
        fs::create_dir_all(&project).unwrap();
        let config = InstallConfig {
            include_root: temp.path().join("sys/include"),
            lib_root: temp.path().join("sys/lib"),
            ..InstallConfig::default()
        };
        InstallLayout::resolve(&project, &config, Path::new("install.toml")).unwrap()
    }

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn populate_sources(layout: &InstallLayout) {
        write(&layout.root.join("net/TcpServer.h"), "// tcp");
        write(&layout.root.join("net/TcpServer.cc"), "// impl");
        write(&layout.root.join("base/Logger.h"), "// log");
        write(&layout.root.join("net/poller/EPollPoller.h"), "// epoll");
    }

    #[test]
    fn test_header_destination_mirrors_nesting() {
        let root = Path::new("/usr/include/zfwmuduo");
        assert_eq!(
            header_destination(root, Path::new("net/poller")),
            PathBuf::from("/usr/include/zfwmuduo/net/poller")
        );
        assert_eq!(
            header_destination(root, Path::new("base")),
            PathBuf::from("/usr/include/zfwmuduo/base")
        );
        assert_eq!(
            header_destination(root, Path::new("./net")),
            PathBuf::from("/usr/include/zfwmuduo/net")
        );
    }

    #[test]
    fn test_install_headers_mirrors_tree() {
        let temp = TempDir::new().unwrap();
        let layout = layout_in(&temp);
        populate_sources(&layout);

        let installed = install_headers(&layout).unwrap();

        let header_root = layout.header_root();
        assert_eq!(installed.len(), 3);
        assert!(header_root.join("net/TcpServer.h").is_file());
        assert!(header_root.join("base/Logger.h").is_file());
        assert!(header_root.join("net/poller/EPollPoller.h").is_file());
        assert!(!header_root.join("EPollPoller.h").exists());
        assert!(!header_root.join("net/EPollPoller.h").exists());
    }

    #[test]
    fn test_install_headers_skips_non_headers() {
        let temp = TempDir::new().unwrap();
        let layout = layout_in(&temp);
        populate_sources(&layout);

        install_headers(&layout).unwrap();

        let net = layout.header_root().join("net");
        assert!(net.join("TcpServer.h").is_file());
        assert!(!net.join("TcpServer.cc").exists());
    }

    #[test]
    fn test_install_headers_missing_source_dir_aborts() {
        let temp = TempDir::new().unwrap();
        let layout = layout_in(&temp);
        write(&layout.root.join("net/TcpServer.h"), "// tcp");

        let err = install_headers(&layout).unwrap_err();

        assert!(matches!(err, InstallError::Io { .. }));
        assert!(err.to_string().contains("base"));
    }

    #[test]
    fn test_install_headers_overwrites_previous_install() {
        let temp = TempDir::new().unwrap();
        let layout = layout_in(&temp);
        populate_sources(&layout);
        install_headers(&layout).unwrap();

        write(&layout.root.join("base/Logger.h"), "// log v2");
        install_headers(&layout).unwrap();

        assert_eq!(
            fs::read_to_string(layout.header_root().join("base/Logger.h")).unwrap(),
            "// log v2"
        );
    }

    #[test]
    fn test_install_shared_objects_is_flat() {
        let temp = TempDir::new().unwrap();
        let layout = layout_in(&temp);
        write(&layout.library_output_dir.join("libzfwmuduo.so"), "elf");
        write(&layout.library_output_dir.join("libextra.so"), "elf2");
        write(&layout.library_output_dir.join("nested/libdeep.so"), "deep");
        write(&layout.library_output_dir.join("libzfwmuduo.a"), "archive");

        let installed = install_shared_objects(&layout).unwrap();

        let names: Vec<_> = installed
            .iter()
            .map(|a| a.destination.clone())
            .collect();
        assert_eq!(
            names,
            vec![
                layout.lib_root.join("libextra.so"),
                layout.lib_root.join("libzfwmuduo.so")
            ]
        );
        assert!(layout.lib_root.join("libzfwmuduo.so").is_file());
        assert!(!layout.lib_root.join("libzfwmuduo.a").exists());
        assert!(!layout.lib_root.join("nested").exists());
        assert!(!layout.lib_root.join("libdeep.so").exists());
    }

    #[test]
    fn test_install_shared_objects_missing_output_dir() {
        let temp = TempDir::new().unwrap();
        let layout = layout_in(&temp);

        let err = install_shared_objects(&layout).unwrap_err();

        assert!(matches!(err, InstallError::Io { .. }));
        assert!(layout.lib_root.is_dir());
    }

    #[test]
    fn test_install_shared_objects_into_output_dir_keeps_library() {
        let temp = TempDir::new().unwrap();
        let mut layout = layout_in(&temp);
        layout.lib_root = layout.library_output_dir.clone();
        write(&layout.library_output_dir.join("libzfwmuduo.so"), "ELF-contents");

        let err = install_shared_objects(&layout).unwrap_err();

        assert!(matches!(err, InstallError::SameFile { .. }));
        assert_eq!(
            fs::read_to_string(layout.library_output_dir.join("libzfwmuduo.so")).unwrap(),
            "ELF-contents"
        );
    }

    #[test]
    fn test_install_shared_objects_ignores_stale_links() {
        let temp = TempDir::new().unwrap();
        let layout = layout_in(&temp);
        write(&layout.library_output_dir.join("libzfwmuduo.so"), "elf");
        std::os::unix::fs::symlink("gone", layout.library_output_dir.join("stale.txt")).unwrap();

        let installed = install_shared_objects(&layout).unwrap();

        assert_eq!(installed.len(), 1);
        assert!(layout.lib_root.join("libzfwmuduo.so").is_file());
        assert!(!layout.lib_root.join("stale.txt").exists());
    }

    #[test]
    fn test_install_batch_fails_when_destination_is_file() {
        let temp = TempDir::new().unwrap();
        let layout = layout_in(&temp);
        populate_sources(&layout);
        write(&layout.header_root().join("net"), "not a directory");

        let err = install_headers(&layout).unwrap_err();

        assert!(matches!(err, InstallError::NotADirectory { .. }));
        assert!(!layout.header_root().join("base").exists());
    }
}
