//! Runtime settings, read from the environment.

use std::env;
use std::path::PathBuf;

use crate::core::command::QuoteStyle;
use crate::core::error::NavError;
use crate::core::history::FileSessionCache;
use crate::core::paths;

pub const STATE_DIR_VAR: &str = "DOTCD_STATE_DIR";
pub const CONFIG_DIR_VAR: &str = "DOTCD_CONFIG_DIR";
pub const SESSION_VAR: &str = "DOTCD_SESSION";
pub const LEGACY_VAR: &str = "DOTCD_LEGACY";
/// When set, the shell command is written to this file instead of stdout.
pub const EMIT_FILE_VAR: &str = "DOTCD_EMIT_FILE";

const SHORTCUTS_FILE: &str = "shortcuts.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Root for per-session state. `None` when no platform cache dir exists.
    pub state_dir: Option<PathBuf>,
    /// Where shortcuts are stored. `None` when no platform config dir exists.
    pub config_dir: Option<PathBuf>,
    /// Identifies the shell session whose history is read and written.
    pub session: String,
    /// Bare `cd <path>` when nothing needs quoting, and `cd -` handed to the shell.
    pub legacy: bool,
}

impl Settings {
    /// Load settings from the environment.
    ///
    /// - `DOTCD_STATE_DIR`: session state root; default platform cache dir
    /// - `DOTCD_CONFIG_DIR`: shortcuts location; default platform config dir
    /// - `DOTCD_SESSION`: session id; default parent process id
    /// - `DOTCD_LEGACY`: `1` or `true` to enable legacy output
    pub fn from_env() -> Self {
        let state_dir = non_empty_var(STATE_DIR_VAR)
            .map(PathBuf::from)
            .or_else(paths::cache_dir);
        let config_dir = non_empty_var(CONFIG_DIR_VAR)
            .map(PathBuf::from)
            .or_else(paths::config_dir);
        let session = non_empty_var(SESSION_VAR)
            .map(|s| sanitize_session(&s))
            .filter(|s| !s.is_empty())
            .unwrap_or_else(default_session);
        let legacy = env::var(LEGACY_VAR)
            .map(|s| s == "1" || s.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self {
            state_dir,
            config_dir,
            session,
            legacy,
        }
    }

    pub fn quote_style(&self) -> QuoteStyle {
        if self.legacy {
            QuoteStyle::Minimal
        } else {
            QuoteStyle::Always
        }
    }

    /// Directory holding this session's cache files.
    pub fn session_dir(&self) -> Option<PathBuf> {
        self.state_dir
            .as_ref()
            .map(|d| d.join("sessions").join(&self.session))
    }

    /// The session cache, or an error when there is nowhere to keep it.
    pub fn session_cache(&self) -> Result<FileSessionCache, NavError> {
        self.session_dir()
            .map(FileSessionCache::new)
            .ok_or_else(|| NavError::ShellCache("no cache directory available".to_string()))
    }

    pub fn shortcuts_path(&self) -> Option<PathBuf> {
        self.config_dir.as_ref().map(|d| d.join(SHORTCUTS_FILE))
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|s| !s.trim().is_empty())
}

/// Keep only characters that are safe in a directory name.
fn sanitize_session(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
        .collect()
}

#[cfg(unix)]
fn default_session() -> String {
    std::os::unix::process::parent_id().to_string()
}

#[cfg(not(unix))]
fn default_session() -> String {
    "default".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(legacy: bool) -> Settings {
        Settings {
            state_dir: Some(PathBuf::from("/state")),
            config_dir: None,
            session: "1234".to_string(),
            legacy,
        }
    }

    #[test]
    fn sanitize_strips_separators() {
        assert_eq!(sanitize_session("../12 34/x"), "1234x");
        assert_eq!(sanitize_session("tty-1_a"), "tty-1_a");
    }

    #[test]
    fn session_dir_is_under_sessions() {
        assert_eq!(
            settings(false).session_dir(),
            Some(PathBuf::from("/state/sessions/1234"))
        );
    }

    #[test]
    fn missing_state_dir_is_a_cache_error() {
        let s = Settings {
            state_dir: None,
            ..settings(false)
        };
        let err = s.session_cache().unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to get shell cache: no cache directory available"
        );
    }

    #[test]
    fn legacy_selects_minimal_quoting() {
        assert_eq!(settings(true).quote_style(), QuoteStyle::Minimal);
        assert_eq!(settings(false).quote_style(), QuoteStyle::Always);
    }

    #[test]
    fn shortcuts_path_needs_config_dir() {
        assert_eq!(settings(false).shortcuts_path(), None);
        let s = Settings {
            config_dir: Some(PathBuf::from("/cfg")),
            ..settings(false)
        };
        assert_eq!(s.shortcuts_path(), Some(PathBuf::from("/cfg/shortcuts.json")));
    }
}
