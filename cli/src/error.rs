//! Error types for the `central-publish` binary.

use crate::config::ConfigError;
use central_publisher::PublishError;
use std::io;
use thiserror::Error;

/// Errors that end a `central-publish` run.
#[derive(Debug, Error)]
pub enum CliError {
    /// The configuration file could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A temporary scratch directory could not be created.
    #[error("failed to create a temporary scratch directory")]
    ScratchDir(#[source] io::Error),

    /// The result could not be written to stdout.
    #[error("failed to write output")]
    Output(#[source] io::Error),

    /// The publish pipeline failed.
    #[error(transparent)]
    Publish(#[from] PublishError),
}

/// Convenience alias for CLI results.
pub type Result<T> = std::result::Result<T, CliError>;
