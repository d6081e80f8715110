//! The single shell line the wrapper evaluates, and the quoting that keeps it intact.

use std::fmt;
use std::path::PathBuf;

/// How paths are rendered into the emitted `cd` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteStyle {
    /// Always double-quote the target: `cd "/some/where"`.
    #[default]
    Always,
    /// Leave simple paths bare: `cd /some/where`.
    Minimal,
}

/// A resolved navigation, ready to be rendered for the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedCommand {
    /// Bare `cd`, which takes the shell home.
    Home,
    /// `cd <path>`.
    To(PathBuf),
    /// `cd -`, handed to the shell verbatim.
    ShellPrevious,
}

impl ResolvedCommand {
    pub fn render(&self, style: QuoteStyle) -> String {
        match self {
            ResolvedCommand::Home => "cd".to_string(),
            ResolvedCommand::ShellPrevious => "cd -".to_string(),
            ResolvedCommand::To(path) => {
                // Navigator only hands out UTF-8 targets.
                let path = path.to_string_lossy();
                if path.is_empty() {
                    return "cd".to_string();
                }
                match style {
                    QuoteStyle::Always => format!("cd {}", double_quote(&path)),
                    QuoteStyle::Minimal => format!("cd {}", quote(&path)),
                }
            }
        }
    }
}

impl fmt::Display for ResolvedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(QuoteStyle::default()))
    }
}

/// Characters that never need quoting in a POSIX shell word.
fn is_plain(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '/' | '.' | '_' | '-' | '+' | ',' | ':' | '@' | '%' | '=')
}

/// Quote `path` only if the shell would otherwise split or reinterpret it.
pub fn quote(path: &str) -> String {
    if !path.is_empty() && path.chars().all(is_plain) {
        path.to_string()
    } else {
        double_quote(path)
    }
}

/// Wrap `path` in double quotes, escaping what stays special inside them.
///
/// Backslashes are doubled, which keeps Windows-style separators intact under msys/mingw shells.
pub fn double_quote(path: &str) -> String {
    let mut out = String::with_capacity(path.len() + 2);
    out.push('"');
    for c in path.chars() {
        if matches!(c, '\\' | '"' | '$' | '`') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}
