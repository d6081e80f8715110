//! Named directory shortcuts: load, validate, save, and expand into navigation requests.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::compose::NavigationRequest;

/// Category all directory shortcuts are filed under.
pub const DIRECTORY_CATEGORY: &str = "dirAliases";

/// Names that would be shadowed by a subcommand.
pub const RESERVED_NAMES: &[&str] = &[
    "parent",
    "hist",
    "shortcut",
    "init",
    "completions",
    "complete",
    "config",
    "help",
    "-",
];

/// Error loading, saving, or editing shortcuts.
#[derive(Debug, thiserror::Error)]
pub enum ShortcutError {
    #[error("failed to access shortcuts file: {0}")]
    Io(#[from] io::Error),
    #[error("invalid shortcuts file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("shortcut {0:?} already exists")]
    Exists(String),
    #[error("shortcut {0:?} does not exist")]
    Missing(String),
    #[error("invalid shortcut name {0:?}: {1}")]
    InvalidName(String, &'static str),
    #[error("shortcut {0:?} needs a path")]
    Empty(String),
    #[error("invalid search pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("no config directory available")]
    NoConfigDir,
}

/// Shortcut category to shortcut name to stored argument tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortcutTable {
    #[serde(default)]
    shortcuts: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

impl ShortcutTable {
    /// Load from `path`. A missing file is an empty table.
    pub fn load(path: &Path) -> Result<Self, ShortcutError> {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    /// Save to `path`, creating the parent directory if needed.
    pub fn save(&self, path: &Path) -> Result<(), ShortcutError> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(tmp, path)?;
        Ok(())
    }

    fn directories(&self) -> Option<&BTreeMap<String, Vec<String>>> {
        self.shortcuts.get(DIRECTORY_CATEGORY)
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.directories()?.get(name).map(Vec::as_slice)
    }

    /// All shortcuts, sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.directories()
            .into_iter()
            .flat_map(|m| m.iter().map(|(k, v)| (k.as_str(), v.as_slice())))
    }

    pub fn add(&mut self, name: &str, tokens: Vec<String>) -> Result<(), ShortcutError> {
        validate_name(name)?;
        if tokens.is_empty() {
            return Err(ShortcutError::Empty(name.to_string()));
        }
        let dirs = self
            .shortcuts
            .entry(DIRECTORY_CATEGORY.to_string())
            .or_default();
        if dirs.contains_key(name) {
            return Err(ShortcutError::Exists(name.to_string()));
        }
        dirs.insert(name.to_string(), tokens);
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Result<Vec<String>, ShortcutError> {
        self.shortcuts
            .get_mut(DIRECTORY_CATEGORY)
            .and_then(|m| m.remove(name))
            .ok_or_else(|| ShortcutError::Missing(name.to_string()))
    }

    /// Shortcuts whose name or any token matches `pattern`.
    pub fn search(&self, pattern: &str) -> Result<Vec<(&str, &[String])>, ShortcutError> {
        let re = Regex::new(pattern)?;
        Ok(self
            .iter()
            .filter(|(name, tokens)| re.is_match(name) || tokens.iter().any(|t| re.is_match(t)))
            .collect())
    }

    /// Replace a shortcut name in `request.path` with its stored tokens.
    ///
    /// Only applies without an `up` count. User sub-path segments follow the stored ones.
    pub fn expand(&self, request: NavigationRequest) -> NavigationRequest {
        if request.up != 0 {
            return request;
        }
        let Some(tokens) = request.path.as_deref().and_then(|name| self.get(name)) else {
            return request;
        };
        let Some((first, rest)) = tokens.split_first() else {
            return request;
        };
        log::debug!(
            "expanding shortcut {:?} to {:?}",
            request.path.as_deref().unwrap_or_default(),
            tokens
        );
        let mut sub_path = rest.to_vec();
        sub_path.extend(request.sub_path);
        NavigationRequest {
            up: 0,
            path: Some(first.clone()),
            sub_path,
        }
    }
}

/// Render stored tokens for display.
pub fn format_tokens(tokens: &[String]) -> String {
    tokens.join(" ")
}

fn validate_name(name: &str) -> Result<(), ShortcutError> {
    let invalid = |why| Err(ShortcutError::InvalidName(name.to_string(), why));
    if name.is_empty() {
        return invalid("name cannot be empty");
    }
    if name.starts_with('-') {
        return invalid("name cannot start with '-'");
    }
    if name.chars().any(|c| c.is_whitespace() || c == '/' || c == '\\') {
        return invalid("name cannot contain whitespace or path separators");
    }
    if RESERVED_NAMES.contains(&name) {
        return invalid("name conflicts with a subcommand");
    }
    Ok(())
}
