//! CLI definitions: argument parsing, subcommands, and help text.

use std::ffi::OsString;

use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use crate::core::compose::NavigationRequest;
use crate::core::shell_init::InitShell;

pub use clap_complete::generate;

const AFTER_HELP: &str = "\
EXAMPLES:
  dotcd some dir             cd into ./some/dir
  dotcd -u 2 lib             cd into ../../lib
  dotcd notes.txt            cd into the directory holding notes.txt
  dotcd -                    Go to the previous directory
  dotcd parent src           Go up to the nearest ancestor named src
  dotcd shortcut add w ~/work
  eval \"$(dotcd init bash)\"  Install the dcd function and .. aliases
";

/// Command-line arguments for the application.
#[derive(Parser)]
#[command(
    author,
    version,
    about = "Changes directories",
    after_help = AFTER_HELP,
    args_conflicts_with_subcommands = true
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Number of directories to go up when cd-ing
    #[arg(short = 'u', long = "up", value_name = "UP", default_value_t = 0)]
    pub up: usize,

    /// destination directory
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// subdirectories to continue to
    #[arg(value_name = "SUB_PATH")]
    pub sub_path: Vec<String>,

    /// Increase log verbosity (use multiple times for debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Reduce log output (errors only)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Go up to the nearest parent directory with the given name
    Parent {
        /// Name of the parent directory to go up to
        #[arg(value_name = "PARENT_DIR")]
        name: String,
    },
    /// Show the recorded directory history, oldest first
    Hist,
    /// Manage named directory shortcuts
    Shortcut {
        #[command(subcommand)]
        subcommand: ShortcutSubcommand,
    },
    /// Print the shell function and aliases that evaluate dotcd output
    Init {
        #[arg(value_enum)]
        shell: InitShell,
        /// Name of the shell function to define
        #[arg(long, default_value = "dcd")]
        cmd: String,
    },
    /// Generate shell completion script
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        #[arg(value_parser = clap::value_parser!(Shell))]
        shell: Shell,
    },
    /// Show state paths, session, and output mode
    Config,
    /// Print completion suggestions for the words typed so far
    #[command(hide = true)]
    Complete {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum ShortcutSubcommand {
    /// Save PATH (and optional SUB_PATHs) under NAME
    Add {
        name: String,
        #[arg(value_name = "PATH")]
        path: String,
        #[arg(value_name = "SUB_PATH")]
        sub_path: Vec<String>,
    },
    /// Delete shortcuts
    Delete {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// List all shortcuts
    List,
    /// Show the stored arguments for shortcuts
    Get {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// List shortcuts whose name or path matches a regular expression
    Search { pattern: String },
}

impl Args {
    /// Parse the process arguments, see [`hoist_log_flags`].
    pub fn parse_env() -> Self {
        Self::parse_from(hoist_log_flags(std::env::args_os()))
    }

    /// Log level based on -v/-q flags: error, warn, info, or debug.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose >= 2 {
            "debug"
        } else if self.verbose >= 1 {
            "info"
        } else {
            "warn"
        }
    }

    pub fn request(&self) -> NavigationRequest {
        NavigationRequest {
            up: self.up,
            path: self.path.clone(),
            sub_path: self.sub_path.clone(),
        }
    }
}

/// Move `-v`/`-q` flags that come before a subcommand name to just after it.
///
/// Any argument clap sees first turns a subcommand name into PATH, but logging flags must not
/// change which operation runs. `-u` and paths are left alone.
pub fn hoist_log_flags<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let leading = args.iter().skip(1).take_while(|a| is_log_flag(a)).count();
    let names_subcommand = args
        .get(leading + 1)
        .and_then(|a| a.to_str())
        .is_some_and(is_subcommand);
    if leading > 0 && names_subcommand {
        args[1..=leading + 1].rotate_left(leading);
    }
    args
}

fn is_log_flag(arg: &OsString) -> bool {
    match arg.to_str() {
        Some("--verbose" | "--quiet") => true,
        Some(s) => s
            .strip_prefix('-')
            .is_some_and(|f| !f.is_empty() && f.chars().all(|c| c == 'v' || c == 'q')),
        None => false,
    }
}

fn is_subcommand(name: &str) -> bool {
    Args::command()
        .get_subcommands()
        .any(|sc| sc.get_name() == name)
}
