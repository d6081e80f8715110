//! Shell wrapper that evaluates the emitted `cd` line in the calling shell.

use clap::ValueEnum;

use crate::core::app;
use crate::core::config::{EMIT_FILE_VAR, SESSION_VAR};

/// Deepest `..` alias defined by the wrapper (`.........` = up 8).
pub const MAX_DOT_ALIAS: usize = 8;

/// Shells the wrapper can be generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InitShell {
    Bash,
    Zsh,
}

/// Render the wrapper for `shell`, exposing the tool as the function `cmd`.
pub fn script(shell: InitShell, cmd: &str) -> String {
    let bin = app::NAME;
    let mut out = String::new();

    if shell == InitShell::Zsh {
        out.push_str("autoload -U +X bashcompinit && bashcompinit\n\n");
    }

    out.push_str(&format!(
        "export {var}=\"${{{var}:-$$}}\"\n\n",
        var = SESSION_VAR
    ));

    out.push_str(&format!(
        r#"{cmd}() {{
    local __dotcd_emit __dotcd_status
    __dotcd_emit="$(mktemp "${{TMPDIR:-/tmp}}/{bin}.XXXXXX")" || return 1
    {emit}="$__dotcd_emit" command {bin} "$@"
    __dotcd_status=$?
    if [ -s "$__dotcd_emit" ]; then
        source "$__dotcd_emit"
    fi
    rm -f "$__dotcd_emit"
    return $__dotcd_status
}}

"#,
        emit = EMIT_FILE_VAR
    ));

    for up in 1..=MAX_DOT_ALIAS {
        out.push_str(&format!("alias {}='{} -u {}'\n", ".".repeat(up + 1), cmd, up));
    }

    out.push_str(&format!(
        r#"
_{cmd}_complete() {{
    local IFS=$'\n'
    COMPREPLY=($(command {bin} complete -- "${{COMP_WORDS[@]:1:COMP_CWORD}}"))
}}
complete -o nospace -F _{cmd}_complete {cmd}
"#
    ));
    out
}
