//! Pipeline orchestration for one artefact set.
//!
//! Checks the request's preconditions, then validates, bundles and uploads
//! in that order. The first failing step ends the run; its error is wrapped
//! in a [`PublishError`] that names the set and the phase.

use crate::artefact::ArtefactSet;
use crate::bundle::{BundleError, build_bundle};
use crate::credentials::Credentials;
use crate::publishing_type::PublishingType;
use crate::upload::{CentralPortalClient, UploadError, UploadId, Uploader};
use crate::validation::validate;
use crate::validation_error::ValidationError;
use log::info;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Everything needed to publish one artefact set.
#[derive(Debug, Clone)]
pub struct PublishRequest {
    /// The publication to upload.
    pub artefacts: ArtefactSet,
    /// Portal user token.
    pub credentials: Credentials,
    /// Deployment mode requested from the portal.
    pub publishing_type: PublishingType,
    /// Existing directory that receives the bundle.
    pub scratch_dir: PathBuf,
}

/// The step of the pipeline that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishPhase {
    /// A precondition on the request did not hold.
    Precondition,
    /// The artefact set failed validation.
    Validation,
    /// The bundle could not be written.
    Build,
    /// The portal upload failed.
    Upload,
}

impl fmt::Display for PublishPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Precondition => "precondition",
            Self::Validation => "validation",
            Self::Build => "build",
            Self::Upload => "upload",
        })
    }
}

/// Errors arising while publishing an artefact set.
#[derive(Debug, Error)]
pub enum PublishError {
    /// A required request property is empty.
    #[error("publication '{name}': missing required property '{property}'")]
    MissingProperty {
        /// Name of the artefact set.
        name: String,
        /// Dotted name of the missing property.
        property: &'static str,
    },

    /// The set has no files besides its descriptor.
    #[error("publication '{name}': no artefacts to publish")]
    EmptyArtefactSet {
        /// Name of the artefact set.
        name: String,
    },

    /// The scratch directory does not exist or is not a directory.
    #[error("publication '{name}': scratch directory {} is unavailable", .path.display())]
    ScratchDirUnavailable {
        /// Name of the artefact set.
        name: String,
        /// The configured scratch directory.
        path: PathBuf,
        /// Why the directory was rejected.
        #[source]
        source: io::Error,
    },

    /// The set failed validation.
    #[error("publication '{name}' failed validation")]
    Validation {
        /// Name of the artefact set.
        name: String,
        /// The validation failure.
        #[source]
        source: ValidationError,
    },

    /// The bundle could not be built.
    #[error("publication '{name}': failed to build bundle")]
    Build {
        /// Name of the artefact set.
        name: String,
        /// The bundle failure.
        #[source]
        source: BundleError,
    },

    /// The portal did not accept the bundle.
    #[error("publication '{name}': upload failed")]
    Upload {
        /// Name of the artefact set.
        name: String,
        /// The upload failure.
        #[source]
        source: UploadError,
    },
}

impl PublishError {
    /// Return the pipeline phase that failed.
    #[must_use]
    pub const fn phase(&self) -> PublishPhase {
        match self {
            Self::MissingProperty { .. }
            | Self::EmptyArtefactSet { .. }
            | Self::ScratchDirUnavailable { .. } => PublishPhase::Precondition,
            Self::Validation { .. } => PublishPhase::Validation,
            Self::Build { .. } => PublishPhase::Build,
            Self::Upload { .. } => PublishPhase::Upload,
        }
    }

    /// Return the name of the artefact set the error refers to.
    #[must_use]
    pub fn publication(&self) -> &str {
        match self {
            Self::MissingProperty { name, .. }
            | Self::EmptyArtefactSet { name }
            | Self::ScratchDirUnavailable { name, .. }
            | Self::Validation { name, .. }
            | Self::Build { name, .. }
            | Self::Upload { name, .. } => name,
        }
    }
}

/// Publish with the production portal client.
///
/// # Errors
///
/// See [`publish_with`].
pub fn publish(
    request: &PublishRequest,
    base_url: &str,
    timeout: Duration,
) -> Result<UploadId, PublishError> {
    publish_with(request, &CentralPortalClient::new(base_url, timeout))
}

/// Publish `request` using `uploader` for the final step.
///
/// # Errors
///
/// Returns a [`PublishError`] for the first precondition or phase that
/// fails. Nothing is uploaded unless validation and bundling succeed.
pub fn publish_with(
    request: &PublishRequest,
    uploader: &dyn Uploader,
) -> Result<UploadId, PublishError> {
    check_preconditions(request)?;
    let bundle = validate_and_build(&request.artefacts, &request.scratch_dir)?;

    let id = uploader
        .upload(&bundle, &request.credentials, request.publishing_type)
        .map_err(|source| PublishError::Upload {
            name: request.artefacts.name().to_owned(),
            source,
        })?;
    info!("Upload accepted with deployment id {id}.");
    Ok(id)
}

/// Validate `set` and build its bundle in `scratch_dir` without uploading.
///
/// This is the publish pipeline minus credentials and the upload step, so
/// a set can be checked locally before anything is sent.
///
/// # Errors
///
/// Returns [`PublishError::EmptyArtefactSet`] or
/// [`PublishError::ScratchDirUnavailable`] if a precondition fails, then
/// [`PublishError::Validation`] or [`PublishError::Build`] for the phase
/// that fails.
pub fn stage(set: &ArtefactSet, scratch_dir: &Path) -> Result<PathBuf, PublishError> {
    check_artefacts(set, scratch_dir)?;
    validate_and_build(set, scratch_dir)
}

fn validate_and_build(set: &ArtefactSet, scratch_dir: &Path) -> Result<PathBuf, PublishError> {
    let name = set.name();

    info!("Validating publication '{name}' ({}).", set.coordinate());
    validate(set).map_err(|source| PublishError::Validation {
        name: name.to_owned(),
        source,
    })?;

    build_bundle(set, scratch_dir).map_err(|source| PublishError::Build {
        name: name.to_owned(),
        source,
    })
}

/// Check the request before any work is done. [`publish_with`] runs this
/// first.
///
/// Credentials are checked first, then the artefact list, then the scratch
/// directory.
///
/// # Errors
///
/// Returns [`PublishError::MissingProperty`],
/// [`PublishError::EmptyArtefactSet`] or
/// [`PublishError::ScratchDirUnavailable`] for the first check that fails.
pub fn check_preconditions(request: &PublishRequest) -> Result<(), PublishError> {
    check_credentials(request)?;
    check_artefacts(&request.artefacts, &request.scratch_dir)
}

fn check_credentials(request: &PublishRequest) -> Result<(), PublishError> {
    let missing = |property| PublishError::MissingProperty {
        name: request.artefacts.name().to_owned(),
        property,
    };
    if request.credentials.username().is_empty() {
        return Err(missing("credentials.username"));
    }
    if request.credentials.password().is_empty() {
        return Err(missing("credentials.password"));
    }
    Ok(())
}

fn check_artefacts(set: &ArtefactSet, scratch_dir: &Path) -> Result<(), PublishError> {
    if set.files().is_empty() {
        return Err(PublishError::EmptyArtefactSet {
            name: set.name().to_owned(),
        });
    }
    check_scratch_dir(scratch_dir).map_err(|source| PublishError::ScratchDirUnavailable {
        name: set.name().to_owned(),
        path: scratch_dir.to_path_buf(),
        source,
    })
}

fn check_scratch_dir(scratch_dir: &Path) -> io::Result<()> {
    if std::fs::metadata(scratch_dir)?.is_dir() {
        Ok(())
    } else {
        Err(io::Error::new(
            io::ErrorKind::NotADirectory,
            "not a directory",
        ))
    }
}

#[cfg(test)]
#[path = "publish_tests.rs"]
mod tests;
