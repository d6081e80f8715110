//! # dotcd - smart `cd` helper
//!
//! Prints a single shell `cd` command for a shell function to evaluate.
//!
//! ## Features
//! - Go up N levels and then down into PATH and SUB_PATHs
//! - `-` returns to the previous directory, tracked per shell session
//! - `parent NAME` jumps to the nearest ancestor with that name
//! - Named shortcuts and a shell wrapper with `..` aliases and completion

mod cli;
mod core;
mod run;

use std::process::ExitCode;

fn main() -> ExitCode {
    let args = cli::Args::parse_env();
    run::init_logger(&args);

    let settings = core::config::Settings::from_env();
    log::debug!("session {:?}", settings.session);

    match run::run(&args, &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
