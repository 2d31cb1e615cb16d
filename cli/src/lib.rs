//! Command-line front end for the `central-publisher` library.
//!
//! Used by the `central-publish` binary and kept as a library so the run
//! logic can be tested without spawning processes.
//!
//! # Modules
//!
//! - [`app`] - Run orchestration
//! - [`cli`] - Command-line argument definitions
//! - [`config`] - Publication configuration file
//! - [`error`] - Errors that end a run
//! - [`output`] - Stderr output helpers

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
