//! Run orchestration for the `central-publish` binary.
//!
//! Loads the configuration, settles the scratch directory and the portal
//! settings from flags and file, then either stages the bundle (dry run) or
//! runs the full publish pipeline.

use crate::cli::Cli;
use crate::config::PublishConfig;
use crate::error::{CliError, Result};
use crate::output::write_stderr_line;
use central_publisher::publish::{publish, stage};
use central_publisher::{Credentials, PublishRequest, PublishingType};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Where the bundle is written for this run.
enum Scratch {
    /// A directory chosen with `--scratch-dir`; left in place.
    Given(PathBuf),
    /// A temporary directory removed when the run ends.
    Temporary(TempDir),
}

impl Scratch {
    fn for_cli(cli: &Cli) -> Result<Self> {
        match &cli.scratch_dir {
            Some(dir) => Ok(Self::Given(dir.clone())),
            None => TempDir::new()
                .map(Self::Temporary)
                .map_err(CliError::ScratchDir),
        }
    }

    const fn is_temporary(&self) -> bool {
        matches!(self, Self::Temporary(_))
    }

    fn path(&self) -> &Path {
        match self {
            Self::Given(dir) => dir,
            Self::Temporary(dir) => dir.path(),
        }
    }
}

/// Run one publication as described by `cli`.
///
/// The deployment id, or the bundle path for a dry run with
/// `--scratch-dir`, is written to `stdout`. Progress goes to `stderr` unless `--quiet` is set.
///
/// # Errors
///
/// Returns [`CliError`] if the configuration cannot be loaded, a scratch
/// directory cannot be created, or the pipeline fails.
pub fn run(cli: &Cli, stdout: &mut dyn Write, stderr: &mut dyn Write) -> Result<()> {
    let config = PublishConfig::load(&cli.config)?;
    let scratch = Scratch::for_cli(cli)?;
    let set = config.artefact_set();

    if cli.dry_run {
        progress(
            cli,
            stderr,
            format!("Dry run: validating {} without uploading.", set.coordinate()),
        );
        let bundle = stage(&set, scratch.path())?;
        if scratch.is_temporary() {
            progress(
                cli,
                stderr,
                "Bundle built and discarded; pass --scratch-dir to keep it. Nothing was uploaded.",
            );
        } else {
            progress(cli, stderr, "Bundle built; nothing was uploaded.");
            writeln!(stdout, "{}", bundle.display()).map_err(CliError::Output)?;
        }
        return Ok(());
    }

    let publishing_type = resolve_publishing_type(cli, &config);
    let base_url = cli.base_url.as_deref().unwrap_or(&config.portal.base_url);
    progress(
        cli,
        stderr,
        format!(
            "Publishing {} to {base_url} ({publishing_type})...",
            set.coordinate()
        ),
    );

    let request = PublishRequest {
        artefacts: set,
        credentials: Credentials::new(
            cli.username.clone().unwrap_or_default(),
            cli.password.clone().unwrap_or_default(),
        ),
        publishing_type,
        scratch_dir: scratch.path().to_path_buf(),
    };
    let id = publish(&request, base_url, config.portal.timeout())?;
    progress(cli, stderr, "Upload accepted.");
    writeln!(stdout, "{id}").map_err(CliError::Output)?;
    Ok(())
}

/// The `--publishing-type` flag wins over the configuration file.
fn resolve_publishing_type(cli: &Cli, config: &PublishConfig) -> PublishingType {
    cli.publishing_type
        .unwrap_or_else(|| config.publishing_type())
}

fn progress(cli: &Cli, stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if !cli.quiet {
        write_stderr_line(stderr, message);
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
