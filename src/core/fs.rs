//! Filesystem access used by path resolution.
//!
//! Resolution only needs to know whether a path is a directory, so the seam is a single
//! `stat`. Tests substitute a stub instead of touching the real filesystem.

use std::io;
use std::path::{Component, Path, PathBuf};

/// What a successful stat reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Directory,
    /// Anything that is not a directory (regular file, socket, device...).
    Other,
}

/// Read-only filesystem capability.
pub trait FileSystem {
    /// Stat `path`, following symlinks.
    fn stat(&self, path: &Path) -> io::Result<FileKind>;
}

/// The real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn stat(&self, path: &Path) -> io::Result<FileKind> {
        let meta = std::fs::metadata(path)?;
        Ok(if meta.is_dir() {
            FileKind::Directory
        } else {
            FileKind::Other
        })
    }
}

/// The working directory as the shell names it.
///
/// `pwd` (the shell's `$PWD`) wins over the physical `cwd` when it is absolute, free of `..`,
/// and names the same directory, so paths through symlinks stay the way the user typed them.
pub fn logical_working_dir(pwd: Option<&Path>, cwd: PathBuf) -> PathBuf {
    match pwd {
        Some(pwd)
            if pwd.is_absolute()
                && !pwd.components().any(|c| c == Component::ParentDir)
                && same_directory(pwd, &cwd) =>
        {
            pwd.to_path_buf()
        }
        _ => cwd,
    }
}

#[cfg(unix)]
fn same_directory(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    match (std::fs::metadata(a), std::fs::metadata(b)) {
        (Ok(a), Ok(b)) => a.is_dir() && a.dev() == b.dev() && a.ino() == b.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn same_directory(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
