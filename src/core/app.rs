//! Names dotcd is known by: the binary in shell wrappers and completions, the version shown by
//! `config`, and the vendor/app pair for platform state directories.

pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Organization part of `ProjectDirs`, so state lands in `~/.cache/dotcd/`.
pub const VENDOR: &str = "dotcd";
