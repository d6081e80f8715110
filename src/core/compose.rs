//! Turns an "up N levels" count, a path and trailing sub-path segments into a target directory.

use std::path::{Component, Path, PathBuf};

use crate::core::command::ResolvedCommand;
use crate::core::error::NavError;
use crate::core::fs::{FileKind, FileSystem};

/// One invocation's navigation arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationRequest {
    /// Number of `..` segments to prepend.
    pub up: usize,
    /// First path token, if any.
    pub path: Option<String>,
    /// Segments appended after `path`. Ignored when `path` is absent.
    pub sub_path: Vec<String>,
}

impl NavigationRequest {
    /// True for the `cd -` form: a lone `-` with nothing else.
    pub fn is_previous(&self) -> bool {
        self.up == 0 && self.sub_path.is_empty() && self.path.as_deref() == Some("-")
    }
}

/// Join `up` parent segments, `path` and every `sub_path` segment.
///
/// An absolute `path` replaces the parent prefix. With no `path` and `up == 0` the result is empty.
pub fn compose(up: usize, path: Option<&str>, sub_path: &[String]) -> PathBuf {
    let mut out: PathBuf = std::iter::repeat_n(Component::ParentDir.as_os_str(), up).collect();
    if let Some(path) = path {
        out.push(path);
        for segment in sub_path {
            out.push(segment);
        }
    }
    out
}

/// Make `path` absolute against `cwd` and collapse `.` and `..` lexically.
pub fn absolutize(cwd: &Path, path: &Path) -> Result<PathBuf, NavError> {
    if !cwd.is_absolute() {
        return Err(NavError::PathResolution(format!(
            "working directory {} is not absolute",
            cwd.display()
        )));
    }
    let joined = cwd.join(path);
    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            // `..` at the root stays at the root.
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    Ok(out)
}

/// `path` as UTF-8, or an error. A lossy conversion would name a directory that does not exist.
pub fn path_str(path: &Path) -> Result<&str, NavError> {
    path.to_str().ok_or_else(|| {
        NavError::PathResolution(format!("{} is not valid UTF-8", path.display()))
    })
}

/// Resolve a request into the command to emit.
///
/// Without a path the parent prefix is emitted as-is (relative). With a path the target is made
/// absolute, and if it exists but is not a directory its containing directory is used instead.
/// A failed stat leaves the target unchanged.
pub fn resolve(
    fs: &dyn FileSystem,
    cwd: &Path,
    request: &NavigationRequest,
) -> Result<ResolvedCommand, NavError> {
    let Some(path) = request.path.as_deref() else {
        if request.up == 0 {
            return Ok(ResolvedCommand::Home);
        }
        return Ok(ResolvedCommand::To(compose(request.up, None, &[])));
    };

    let target = absolutize(cwd, &compose(request.up, Some(path), &request.sub_path))?;
    match fs.stat(&target) {
        Ok(FileKind::Other) => {
            let dir = target.parent().map(Path::to_path_buf).unwrap_or(target);
            log::debug!("target is a file; using {}", dir.display());
            Ok(ResolvedCommand::To(dir))
        }
        Ok(FileKind::Directory) => Ok(ResolvedCommand::To(target)),
        Err(e) => {
            log::debug!("stat {} failed ({}); keeping path", target.display(), e);
            Ok(ResolvedCommand::To(target))
        }
    }
}
