//! Bounded navigation history backing `cd -`.
//!
//! Only the two most recent working directories are kept. Recording the directory that is
//! already the newest entry is a no-op, so repeated navigation from one place never grows it.

mod storage;

pub use storage::{FileSessionCache, HISTORY_KEY, SessionCache, load_history, save_history};

#[cfg(test)]
pub(crate) use storage::MemorySessionCache;

use std::collections::VecDeque;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::command::ResolvedCommand;

/// Maximum number of entries kept after a write.
pub const HISTORY_CAPACITY: usize = 2;

/// Previously visited working directories, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    #[serde(default)]
    entries: VecDeque<String>,
}

impl History {
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: entries.into_iter().map(Into::into).collect(),
        }
    }

    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append `dir` unless it already is the newest entry, then trim from the front to capacity.
    ///
    /// Returns whether the history changed and needs persisting.
    pub fn record(&mut self, dir: &str) -> bool {
        if self.entries.back().is_some_and(|last| last == dir) {
            return false;
        }
        self.entries.push_back(dir.to_string());
        while self.entries.len() > HISTORY_CAPACITY {
            self.entries.pop_front();
        }
        true
    }

    /// Newest entry that is not `cwd`.
    pub fn previous(&self, cwd: &str) -> Option<&str> {
        self.entries().rev().find(|entry| *entry != cwd)
    }
}

/// Resolve `cd -`: the newest recorded directory other than `cwd`, or home when there is none.
pub fn resolve_previous(history: &History, cwd: &str) -> ResolvedCommand {
    match history.previous(cwd) {
        Some(dir) => ResolvedCommand::To(PathBuf::from(dir)),
        None => ResolvedCommand::Home,
    }
}
