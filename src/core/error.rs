//! Navigation error types.

use std::io;

/// Errors from resolving a navigation request or recording it in history.
#[derive(Debug, thiserror::Error)]
pub enum NavError {
    /// The working directory or a composed path could not be made absolute.
    #[error("failed to resolve absolute path: {0}")]
    PathResolution(String),

    /// The persisted history exists but does not decode.
    #[error("failed to get struct data: failed to unmarshal cache data: {0}")]
    HistoryCorrupt(#[from] serde_json::Error),

    /// No ancestor of the working directory carries the requested name.
    #[error("{} must be a parent directory", PARENT_DIR_ARG)]
    NoSuchAncestor,

    #[error("failed to get shell cache: {0}")]
    ShellCache(String),

    #[error("failed to save shell cache: {0}")]
    ShellCacheWrite(#[source] io::Error),
}

/// Name of the `parent` subcommand's argument, as shown in usage text and errors.
pub const PARENT_DIR_ARG: &str = "PARENT_DIR";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_such_ancestor_uses_argument_name() {
        let err = NavError::NoSuchAncestor;
        assert_eq!(err.to_string(), "PARENT_DIR must be a parent directory");
    }

    #[test]
    fn history_corrupt_includes_decode_message() {
        let decode = serde_json::from_str::<serde_json::Value>("} invalid json {").unwrap_err();
        let err = NavError::from(decode);
        let msg = err.to_string();
        assert!(msg.starts_with("failed to get struct data: failed to unmarshal cache data: "));
        assert!(msg.contains("looking for beginning of value") || msg.contains("expected value"));
    }

    #[test]
    fn shell_cache_message_identifies_operation() {
        let err = NavError::ShellCache("no cache directory available".to_string());
        assert_eq!(
            err.to_string(),
            "failed to get shell cache: no cache directory available"
        );
    }
}
