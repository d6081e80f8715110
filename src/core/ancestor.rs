//! Jump to the nearest ancestor directory with a given name.

use std::ffi::OsStr;
use std::path::Path;

use crate::core::command::ResolvedCommand;
use crate::core::error::NavError;

/// Find the nearest strict ancestor of `cwd` whose base name is `name`.
///
/// The working directory itself is never a candidate, even when its own name matches.
pub fn resolve_ancestor(cwd: &Path, name: &str) -> Result<ResolvedCommand, NavError> {
    if name.is_empty() {
        return Err(NavError::NoSuchAncestor);
    }
    let target = OsStr::new(name);
    cwd.ancestors()
        .skip(1)
        .find(|dir| dir.file_name() == Some(target))
        .map(|dir| ResolvedCommand::To(dir.to_path_buf()))
        .ok_or(NavError::NoSuchAncestor)
}

/// Base names of every ancestor of `cwd`, from the top down, for completion.
///
/// The filesystem root has no name and is left out. Repeated names are listed once.
pub fn ancestor_names(cwd: &Path) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    let chain: Vec<&Path> = cwd.ancestors().skip(1).collect();
    for dir in chain.into_iter().rev() {
        if let Some(name) = dir.file_name() {
            let name = name.to_string_lossy().into_owned();
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }
    names
}
