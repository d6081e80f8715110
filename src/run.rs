//! Application run modes: logger init, navigation, and the informational commands.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::CommandFactory;

use crate::cli::{self, Args, Commands, ShortcutSubcommand};
use crate::core;
use crate::core::config::{EMIT_FILE_VAR, Settings};
use crate::core::error::NavError;
use crate::core::fs::{self, OsFileSystem};
use crate::core::navigate::{Navigation, Navigator};

type RunResult = Result<(), Box<dyn std::error::Error>>;

/// Initialize env_logger on stderr so stdout carries only the `cd` line.
pub fn init_logger(args: &Args) {
    let log_level = args.log_level();
    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level));
    logger.target(env_logger::Target::Stderr);
    let _ = logger.try_init();
}

/// Dispatch on the parsed arguments.
pub fn run(args: &Args, settings: &Settings) -> RunResult {
    let stdout = &mut io::stdout();
    match &args.command {
        None => run_navigation(settings, |nav| {
            let shortcuts = core::cli::load_shortcuts(settings);
            nav.go(&shortcuts.expand(args.request()))
        }),
        Some(Commands::Parent { name }) => run_navigation(settings, |nav| nav.parent(name)),
        Some(Commands::Hist) => core::cli::run_hist(settings, stdout),
        Some(Commands::Shortcut { subcommand }) => run_shortcut(settings, subcommand, stdout),
        Some(Commands::Init { shell, cmd }) => {
            write!(stdout, "{}", core::shell_init::script(*shell, cmd))?;
            Ok(())
        }
        Some(Commands::Completions { shell }) => {
            cli::generate(*shell, &mut Args::command(), core::app::NAME, stdout);
            Ok(())
        }
        Some(Commands::Config) => core::cli::run_config(settings, stdout),
        Some(Commands::Complete { words }) => {
            core::cli::run_complete(&current_dir()?, words, stdout)
        }
    }
}

fn run_shortcut(settings: &Settings, sub: &ShortcutSubcommand, out: &mut dyn Write) -> RunResult {
    match sub {
        ShortcutSubcommand::Add {
            name,
            path,
            sub_path,
        } => core::cli::run_shortcut_add(settings, &current_dir()?, name, path, sub_path),
        ShortcutSubcommand::Delete { names } => core::cli::run_shortcut_delete(settings, names),
        ShortcutSubcommand::List => core::cli::run_shortcut_list(settings, out),
        ShortcutSubcommand::Get { names } => core::cli::run_shortcut_get(settings, names, out),
        ShortcutSubcommand::Search { pattern } => {
            core::cli::run_shortcut_search(settings, pattern, out)
        }
    }
}

/// Resolve a navigation, emit the `cd` line, then surface any history failure.
fn run_navigation<F>(settings: &Settings, navigate: F) -> RunResult
where
    F: FnOnce(&Navigator) -> Result<Navigation, NavError>,
{
    let cwd = current_dir()?;
    let cache = settings.session_cache()?;
    let os = OsFileSystem;
    let navigator = Navigator::new(&os, &cache, cwd).with_shell_previous(settings.legacy);

    let Navigation { command, recorded } = navigate(&navigator)?;
    let line = command.render(settings.quote_style());
    log::info!("{} -> {}", navigator.cwd().display(), line);
    emit(&line, std::env::var_os(EMIT_FILE_VAR).map(PathBuf::from).as_deref())?;
    recorded?;
    Ok(())
}

/// Write the command to `target` when the shell wrapper asked for it, else to stdout.
fn emit(line: &str, target: Option<&Path>) -> io::Result<()> {
    match target {
        Some(path) => std::fs::write(path, format!("{}\n", line)),
        None => writeln!(io::stdout(), "{}", line),
    }
}

/// The working directory as the shell sees it, preferring `$PWD` over the physical path.
fn current_dir() -> Result<PathBuf, NavError> {
    let cwd = std::env::current_dir().map_err(|e| NavError::PathResolution(e.to_string()))?;
    let pwd = std::env::var_os("PWD").map(PathBuf::from);
    Ok(fs::logical_working_dir(pwd.as_deref(), cwd))
}
