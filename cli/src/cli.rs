//! CLI argument definitions for `central-publish`.
//!
//! Kept apart from the entrypoint so parsing can be tested without running
//! the pipeline.

use central_publisher::PublishingType;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

/// Default configuration file, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "central-publish.toml";

/// Validate, bundle and upload a Maven publication to the Central Portal.
#[derive(Parser, Debug, Clone)]
#[command(name = "central-publish")]
#[command(version, about)]
#[command(long_about = concat!(
    "Validate, bundle and upload a Maven publication to the Central Publisher Portal.\n\n",
    "The publication is described by a TOML file naming the coordinate, the POM, and ",
    "the artefact files. Every file is written into a zip bundle in the Maven ",
    "repository layout together with MD5, SHA-1, SHA-256 and SHA-512 checksums, ",
    "and the bundle is uploaded with a portal user token.",
))]
#[command(after_help = concat!(
    "EXAMPLES:\n",
    "  Check the publication and build the bundle without uploading:\n",
    "    $ central-publish --dry-run --scratch-dir build/bundle\n\n",
    "  Upload and publish automatically once the portal validates it:\n",
    "    $ CENTRAL_USERNAME=... CENTRAL_PASSWORD=... central-publish --publishing-type AUTOMATIC",
))]
pub struct Cli {
    /// Publication configuration file.
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Portal user token name.
    #[arg(long, env = "CENTRAL_USERNAME", value_name = "USER")]
    pub username: Option<String>,

    /// Portal user token password.
    #[arg(long, env = "CENTRAL_PASSWORD", value_name = "PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Override the publishing type from the configuration file
    /// (`USER_MANAGED` or `AUTOMATIC`).
    #[arg(long, value_name = "TYPE")]
    pub publishing_type: Option<PublishingType>,

    /// Override the portal API base URL.
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Directory that receives the bundle [default: a temporary directory].
    #[arg(long, value_name = "DIR")]
    pub scratch_dir: Option<PathBuf>,

    /// Validate and build the bundle without uploading it.
    #[arg(long)]
    pub dry_run: bool,

    /// Increase log output (repeatable: -v, -vv, -vvv).
    #[arg(
        short,
        long = "verbose",
        action = clap::ArgAction::Count,
        conflicts_with = "quiet"
    )]
    pub verbosity: u8,

    /// Suppress progress output (errors still shown).
    #[arg(short, long, conflicts_with = "verbosity")]
    pub quiet: bool,
}

impl Cli {
    /// Return the log level filter selected by `-v` and `-q`.
    ///
    /// # Examples
    ///
    /// ```
    /// use central_publisher_cli::cli::Cli;
    /// use clap::Parser;
    /// use tracing_subscriber::filter::LevelFilter;
    ///
    /// let cli = Cli::parse_from(["central-publish", "-vv"]);
    /// assert_eq!(cli.log_level(), LevelFilter::DEBUG);
    /// ```
    #[must_use]
    pub const fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::OFF;
        }
        match self.verbosity {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
