//! Dynamic completion suggestions for the shell wrapper.

use std::path::Path;

use walkdir::WalkDir;

use crate::core::ancestor;
use crate::core::compose;

/// Suggestions for the words typed so far; the last word is the one being completed.
///
/// `parent <prefix>` suggests ancestor names. Anything else suggests directories under the
/// location the earlier words point at.
pub fn suggest(cwd: &Path, words: &[String]) -> Vec<String> {
    let (up, positional) = split_up_flag(words);
    let Some((partial, before)) = positional.split_last() else {
        return directories(cwd, &compose::compose(up, None, &[]), "", false);
    };

    if before.len() == 1 && before[0] == "parent" && up == 0 {
        return ancestor::ancestor_names(cwd)
            .into_iter()
            .filter(|name| name.starts_with(partial.as_str()))
            .collect();
    }

    let base = match before.split_first() {
        Some((path, sub)) => compose::compose(up, Some(path.as_str()), sub),
        None => compose::compose(up, None, &[]),
    };
    directories(cwd, &base, partial, !before.is_empty())
}

/// Pull `-u N` / `--up N` / `--up=N` out of the words. Malformed counts are ignored.
fn split_up_flag(words: &[String]) -> (usize, Vec<String>) {
    let mut up = 0;
    let mut positional = Vec::new();
    let mut iter = words.iter();
    while let Some(word) = iter.next() {
        if word == "-u" || word == "--up" {
            if let Some(n) = iter.next().and_then(|v| v.parse().ok()) {
                up = n;
            }
        } else if let Some(n) = word.strip_prefix("--up=") {
            up = n.parse().unwrap_or(up);
        } else {
            positional.push(word.clone());
        }
    }
    (up, positional)
}

/// Directories in `cwd/base/<dir part of partial>` whose names start with the rest of `partial`.
fn directories(cwd: &Path, base: &Path, partial: &str, exclude_cwd: bool) -> Vec<String> {
    let (dir_part, prefix) = match partial.rfind('/') {
        Some(i) => (&partial[..=i], &partial[i + 1..]),
        None => ("", partial),
    };
    let Ok(root) = compose::absolutize(cwd, &base.join(dir_part)) else {
        return Vec::new();
    };

    let mut out: Vec<String> = WalkDir::new(&root)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .flatten()
        .filter(|e| e.path().is_dir())
        .filter_map(|e| {
            let name = e.file_name().to_str()?.to_string();
            if !name.starts_with(prefix) || (name.starts_with('.') && !prefix.starts_with('.')) {
                return None;
            }
            if exclude_cwd && cwd.starts_with(e.path()) {
                return None;
            }
            Some(format!("{}{}/", dir_part, name))
        })
        .collect();
    out.sort();
    out
}
