//! Ties resolution and history together for one invocation.

use std::path::{Path, PathBuf};

use crate::core::ancestor;
use crate::core::command::ResolvedCommand;
use crate::core::compose::{self, NavigationRequest};
use crate::core::error::NavError;
use crate::core::fs::FileSystem;
use crate::core::history::{self, SessionCache};

/// Outcome of a directory-changing invocation.
///
/// The command is emitted even when recording history failed afterwards.
#[derive(Debug)]
pub struct Navigation {
    pub command: ResolvedCommand,
    pub recorded: Result<(), NavError>,
}

pub struct Navigator<'a> {
    fs: &'a dyn FileSystem,
    cache: &'a dyn SessionCache,
    cwd: PathBuf,
    /// Hand `cd -` to the shell instead of resolving it from history.
    shell_previous: bool,
}

impl<'a> Navigator<'a> {
    pub fn new(fs: &'a dyn FileSystem, cache: &'a dyn SessionCache, cwd: PathBuf) -> Self {
        Self {
            fs,
            cache,
            cwd,
            shell_previous: false,
        }
    }

    pub fn with_shell_previous(mut self, enabled: bool) -> Self {
        self.shell_previous = enabled;
        self
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Resolve a path request, or `cd -` when the request is a lone `-`.
    pub fn go(&self, request: &NavigationRequest) -> Result<Navigation, NavError> {
        if request.is_previous() {
            return self.previous();
        }
        self.cwd_key()?;
        let command = compose::resolve(self.fs, &self.cwd, request)?;
        self.finish(command)
    }

    /// Go back to the most recent directory that is not the current one.
    pub fn previous(&self) -> Result<Navigation, NavError> {
        let cwd = self.cwd_key()?;
        if self.shell_previous {
            return self.finish(ResolvedCommand::ShellPrevious);
        }
        let mut hist = history::load_history(self.cache)?;
        let command = history::resolve_previous(&hist, cwd);
        let recorded = self.record_into(&mut hist);
        Ok(Navigation { command, recorded })
    }

    /// Jump to the nearest ancestor named `name`.
    pub fn parent(&self, name: &str) -> Result<Navigation, NavError> {
        self.cwd_key()?;
        let command = ancestor::resolve_ancestor(&self.cwd, name)?;
        self.finish(command)
    }

    /// Reject targets the shell could not be pointed at, then record history.
    fn finish(&self, command: ResolvedCommand) -> Result<Navigation, NavError> {
        if let ResolvedCommand::To(target) = &command {
            compose::path_str(target)?;
        }
        let recorded =
            history::load_history(self.cache).and_then(|mut hist| self.record_into(&mut hist));
        Ok(Navigation { command, recorded })
    }

    /// Record the pre-navigation working directory and persist if anything changed.
    fn record_into(&self, hist: &mut history::History) -> Result<(), NavError> {
        if !hist.record(self.cwd_key()?) {
            log::debug!("history unchanged; {} already newest", self.cwd.display());
            return Ok(());
        }
        log::debug!("history now holds {} entries", hist.len());
        history::save_history(self.cache, hist)
    }

    /// History stores directories as text, so a non-UTF-8 cwd cannot be recorded or compared.
    fn cwd_key(&self) -> Result<&str, NavError> {
        compose::path_str(&self.cwd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fs::FileKind;
    use crate::core::fs::stub::StubFileSystem;
    use crate::core::history::{HISTORY_KEY, History, MemorySessionCache, load_history};

    const CWD: &str = "/prev/dir/1";

    fn request(up: usize, path: Option<&str>, sub: &[&str]) -> NavigationRequest {
        NavigationRequest {
            up,
            path: path.map(String::from),
            sub_path: sub.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn entries(cache: &MemorySessionCache) -> Vec<String> {
        load_history(cache)
            .unwrap()
            .entries()
            .map(String::from)
            .collect()
    }

    #[test]
    fn bare_invocation_goes_home_and_records_cwd() {
        let fs = StubFileSystem(Some(FileKind::Directory));
        let cache = MemorySessionCache::default();
        let nav = Navigator::new(&fs, &cache, PathBuf::from(CWD));

        let out = nav.go(&request(0, None, &[])).unwrap();
        assert_eq!(out.command.to_string(), "cd");
        assert!(out.recorded.is_ok());
        assert_eq!(entries(&cache), vec![CWD]);
    }

    #[test]
    fn ascend_and_descend_end_to_end() {
        let fs = StubFileSystem(Some(FileKind::Directory));
        let cache = MemorySessionCache::default();
        let nav = Navigator::new(&fs, &cache, PathBuf::from(CWD));

        let out = nav.go(&request(2, Some("some"), &["thing"])).unwrap();
        assert_eq!(out.command.to_string(), "cd \"/prev/some/thing\"");
    }

    #[test]
    fn corrupt_history_still_yields_command() {
        let fs = StubFileSystem(Some(FileKind::Directory));
        let cache = MemorySessionCache::with(HISTORY_KEY, "} invalid json {");
        let nav = Navigator::new(&fs, &cache, PathBuf::from(CWD));

        let out = nav.go(&request(0, None, &[])).unwrap();
        assert_eq!(out.command, ResolvedCommand::Home);
        assert!(matches!(out.recorded, Err(NavError::HistoryCorrupt(_))));
        assert_eq!(cache.raw(HISTORY_KEY).as_deref(), Some("} invalid json {"));
    }

    #[test]
    fn previous_goes_back_and_records() {
        let fs = StubFileSystem(None);
        let cache = MemorySessionCache::with_history(&History::from_entries(["old/dir"]));
        let nav = Navigator::new(&fs, &cache, PathBuf::from(CWD));

        let out = nav.go(&request(0, Some("-"), &[])).unwrap();
        assert_eq!(out.command.to_string(), "cd \"old/dir\"");
        assert_eq!(entries(&cache), vec!["old/dir", CWD]);
    }

    #[test]
    fn previous_without_history_goes_home() {
        let fs = StubFileSystem(None);
        let cache = MemorySessionCache::default();
        let nav = Navigator::new(&fs, &cache, PathBuf::from(CWD));

        let out = nav.previous().unwrap();
        assert_eq!(out.command, ResolvedCommand::Home);
        assert_eq!(entries(&cache), vec![CWD]);
    }

    #[test]
    fn previous_truncates_history() {
        let fs = StubFileSystem(None);
        let cache = MemorySessionCache::with_history(&History::from_entries([
            "old/dir/1",
            "old/dir/2",
            "old/dir/3",
            "old/dir/4",
            "old/dir/5",
        ]));
        let nav = Navigator::new(&fs, &cache, PathBuf::from(CWD));

        let out = nav.previous().unwrap();
        assert_eq!(out.command.to_string(), "cd \"old/dir/5\"");
        assert_eq!(entries(&cache), vec!["old/dir/5", CWD]);
    }

    #[test]
    fn previous_with_corrupt_history_fails() {
        let fs = StubFileSystem(None);
        let cache = MemorySessionCache::with(HISTORY_KEY, "[");
        let nav = Navigator::new(&fs, &cache, PathBuf::from(CWD));
        assert!(matches!(nav.previous(), Err(NavError::HistoryCorrupt(_))));
    }

    #[test]
    fn shell_previous_is_forwarded() {
        let fs = StubFileSystem(None);
        let cache = MemorySessionCache::default();
        let nav = Navigator::new(&fs, &cache, PathBuf::from(CWD)).with_shell_previous(true);

        let out = nav.previous().unwrap();
        assert_eq!(out.command, ResolvedCommand::ShellPrevious);
        assert_eq!(entries(&cache), vec![CWD]);
    }

    #[test]
    fn parent_resolves_and_records() {
        let fs = StubFileSystem(None);
        let cache = MemorySessionCache::default();
        let nav = Navigator::new(&fs, &cache, PathBuf::from("/abc/def/ghi"));

        let out = nav.parent("def").unwrap();
        assert_eq!(out.command.to_string(), "cd \"/abc/def\"");
        assert_eq!(entries(&cache), vec!["/abc/def/ghi"]);
    }

    #[test]
    fn failed_parent_leaves_history_untouched() {
        let fs = StubFileSystem(None);
        let cache = MemorySessionCache::default();
        let nav = Navigator::new(&fs, &cache, PathBuf::from("/abc/def/ghi"));

        assert!(matches!(nav.parent("ghi"), Err(NavError::NoSuchAncestor)));
        assert_eq!(cache.raw(HISTORY_KEY), None);
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_working_directory_is_rejected() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let fs = StubFileSystem(Some(FileKind::Directory));
        let cache = MemorySessionCache::default();
        let cwd = PathBuf::from(OsStr::from_bytes(b"/work/caf\xe9"));
        let nav = Navigator::new(&fs, &cache, cwd);

        assert!(matches!(
            nav.go(&request(0, Some("docs"), &[])),
            Err(NavError::PathResolution(_))
        ));
        assert!(matches!(nav.previous(), Err(NavError::PathResolution(_))));
        assert!(matches!(nav.parent("work"), Err(NavError::PathResolution(_))));
        assert_eq!(cache.raw(HISTORY_KEY), None);
    }

    #[test]
    fn repeated_navigation_from_same_directory_does_not_write() {
        let fs = StubFileSystem(Some(FileKind::Directory));
        let cache = MemorySessionCache::with_history(&History::from_entries(["old/dir/1", CWD]));
        let before = cache.raw(HISTORY_KEY);
        let nav = Navigator::new(&fs, &cache, PathBuf::from(CWD));

        nav.go(&request(0, Some("somewhere"), &[])).unwrap();
        assert_eq!(cache.raw(HISTORY_KEY), before);
    }
}
