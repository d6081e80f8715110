pub mod ancestor;
pub mod app;
pub mod cli;
pub mod command;
pub mod complete;
pub mod compose;
pub mod config;
pub mod error;
pub mod fs;
pub mod history;
pub mod navigate;
pub mod paths;
pub mod shell_init;
pub mod shortcuts;
