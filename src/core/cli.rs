//! CLI-only commands: history, shortcuts, config info, completion.
//!
//! These print plain text to stdout and never emit a `cd` line.

use std::io::Write;
use std::path::Path;

use crate::core::app;
use crate::core::compose;
use crate::core::complete;
use crate::core::config::Settings;
use crate::core::history;
use crate::core::shortcuts::{ShortcutError, ShortcutTable, format_tokens};

type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Run the `hist` command: print the session's history, oldest first.
pub fn run_hist(settings: &Settings, out: &mut dyn Write) -> CmdResult {
    let cache = settings.session_cache()?;
    let hist = history::load_history(&cache)?;
    if hist.is_empty() {
        log::info!("no history in {}", cache.dir().display());
    }
    for entry in hist.entries() {
        writeln!(out, "{}", entry)?;
    }
    Ok(())
}

/// Run the `config` command: display paths, session, and output mode.
pub fn run_config(settings: &Settings, out: &mut dyn Write) -> CmdResult {
    let show = |p: Option<&Path>| {
        p.map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none)".to_string())
    };
    writeln!(out, "Version:    {} {}", app::NAME, app::VERSION)?;
    writeln!(out, "State:      {}", show(settings.session_dir().as_deref()))?;
    writeln!(out, "Shortcuts:  {}", show(settings.shortcuts_path().as_deref()))?;
    writeln!(out, "Session:    {}", settings.session)?;
    writeln!(
        out,
        "Mode:       {}",
        if settings.legacy { "legacy" } else { "quoted" }
    )?;
    Ok(())
}

/// Run the hidden `complete` command: one suggestion per line.
pub fn run_complete(cwd: &Path, words: &[String], out: &mut dyn Write) -> CmdResult {
    for suggestion in complete::suggest(cwd, words) {
        writeln!(out, "{}", suggestion)?;
    }
    Ok(())
}

fn shortcuts_path(settings: &Settings) -> Result<std::path::PathBuf, ShortcutError> {
    settings.shortcuts_path().ok_or(ShortcutError::NoConfigDir)
}

/// Run `shortcut add`: store PATH (absolute) and SUB_PATHs under NAME.
pub fn run_shortcut_add(
    settings: &Settings,
    cwd: &Path,
    name: &str,
    path: &str,
    sub_path: &[String],
) -> CmdResult {
    let file = shortcuts_path(settings)?;
    let mut table = ShortcutTable::load(&file)?;
    let abs = compose::absolutize(cwd, Path::new(path))?;
    let mut tokens = vec![compose::path_str(&abs)?.to_string()];
    tokens.extend(sub_path.iter().cloned());
    table.add(name, tokens)?;
    table.save(&file)?;
    log::info!("saved shortcut {:?} to {}", name, file.display());
    Ok(())
}

/// Run `shortcut delete`. Nothing is written unless every name exists.
pub fn run_shortcut_delete(settings: &Settings, names: &[String]) -> CmdResult {
    let file = shortcuts_path(settings)?;
    let mut table = ShortcutTable::load(&file)?;
    for name in names {
        table.remove(name)?;
    }
    table.save(&file)?;
    Ok(())
}

/// Run `shortcut list`: `name: tokens`, sorted by name.
pub fn run_shortcut_list(settings: &Settings, out: &mut dyn Write) -> CmdResult {
    let table = ShortcutTable::load(&shortcuts_path(settings)?)?;
    for (name, tokens) in table.iter() {
        writeln!(out, "{}: {}", name, format_tokens(tokens))?;
    }
    Ok(())
}

/// Run `shortcut get`: the stored tokens for each name.
pub fn run_shortcut_get(settings: &Settings, names: &[String], out: &mut dyn Write) -> CmdResult {
    let table = ShortcutTable::load(&shortcuts_path(settings)?)?;
    for name in names {
        let tokens = table
            .get(name)
            .ok_or_else(|| ShortcutError::Missing(name.clone()))?;
        writeln!(out, "{}: {}", name, format_tokens(tokens))?;
    }
    Ok(())
}

/// Run `shortcut search`: shortcuts matching a regular expression.
pub fn run_shortcut_search(settings: &Settings, pattern: &str, out: &mut dyn Write) -> CmdResult {
    let table = ShortcutTable::load(&shortcuts_path(settings)?)?;
    for (name, tokens) in table.search(pattern)? {
        writeln!(out, "{}: {}", name, format_tokens(tokens))?;
    }
    Ok(())
}

/// Load shortcuts for expansion. An unreadable table only disables expansion.
pub fn load_shortcuts(settings: &Settings) -> ShortcutTable {
    let Some(file) = settings.shortcuts_path() else {
        return ShortcutTable::default();
    };
    ShortcutTable::load(&file).unwrap_or_else(|e| {
        log::warn!("shortcuts ignored: {}", e);
        ShortcutTable::default()
    })
}
