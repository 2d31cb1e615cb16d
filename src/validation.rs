//! Pre-flight validation of artefact sets.
//!
//! A heavily simplified take on Maven's own publication checks: the
//! coordinate must agree with the POM, every identifier must be a safe
//! path component, and every artefact must be a distinct, existing file.
//! Validation reads the POM and stats the artefact files but writes
//! nothing, so a rejected publication leaves no trace.

use crate::artefact::{ArtefactFile, ArtefactSet, Coordinate};
use crate::descriptor::DescriptorDocument;
use crate::validation_error::{CoordinateField, Result, ValidationError};
use std::path::Path;

/// Suffix marking a snapshot version, compared case-insensitively.
const SNAPSHOT_SUFFIX: &str = "-SNAPSHOT";

/// Validate `set` against its POM and the portal's publishing rules.
///
/// Checks run in a fixed order and stop at the first violation.
///
/// # Errors
///
/// Returns the first [`ValidationError`] encountered.
pub fn validate(set: &ArtefactSet) -> Result<()> {
    let pom = load_descriptor(set.descriptor_path())?;
    validate_coordinate(set.coordinate(), &pom)?;
    validate_artefacts(set)
}

/// Check the coordinate against the identity declared by `pom`.
///
/// The artifact id must always match. Group and version are only compared
/// when the POM has no parent, since a child may inherit them.
///
/// # Errors
///
/// Returns the first [`ValidationError`] encountered.
pub fn validate_coordinate(coordinate: &Coordinate, pom: &DescriptorDocument) -> Result<()> {
    let standalone = !pom.has_parent();

    validate_identifier(
        CoordinateField::ArtifactId,
        coordinate.artifact_id(),
        pom.artifact_id(),
        true,
    )?;
    validate_identifier(
        CoordinateField::Group,
        coordinate.group(),
        pom.group_id(),
        standalone,
    )?;

    let version = coordinate.version();
    if version.is_empty() {
        return Err(ValidationError::EmptyVersion);
    }
    if is_snapshot(version) {
        return Err(ValidationError::SnapshotVersion {
            version: version.to_owned(),
        });
    }
    validate_file_nameable("version", version)?;
    validate_identifier(CoordinateField::Version, version, pom.version(), standalone)
}

/// Check every artefact of `set`, including the POM itself.
///
/// # Errors
///
/// Returns the first [`ValidationError`] encountered.
pub fn validate_artefacts(set: &ArtefactSet) -> Result<()> {
    let artefacts: Vec<&ArtefactFile> = set.artefacts().collect();
    for (index, artefact) in artefacts.iter().enumerate() {
        validate_artefact_names(artefact)?;
        validate_is_file(artefact.path())?;

        // The check is symmetric, so only later artefacts need comparing.
        if artefacts
            .iter()
            .skip(index + 1)
            .any(|other| same_slot(artefact, other))
        {
            return Err(ValidationError::DuplicateArtefact {
                extension: artefact.extension().to_owned(),
                classifier: artefact.classifier().map(str::to_owned),
            });
        }
    }
    Ok(())
}

/// Return whether `value` is a non-empty run of `[A-Za-z0-9_.-]`.
///
/// # Examples
///
/// ```
/// use central_publisher::validation::is_valid_identifier;
///
/// assert!(is_valid_identifier("org.example-lib_2"));
/// assert!(!is_valid_identifier("org/example"));
/// assert!(!is_valid_identifier(""));
/// ```
#[must_use]
pub fn is_valid_identifier(value: &str) -> bool {
    !value.is_empty()
        && value
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.'))
}

/// Return whether `version` ends with `-SNAPSHOT`, ignoring case.
#[must_use]
pub fn is_snapshot(version: &str) -> bool {
    version
        .to_ascii_uppercase()
        .ends_with(SNAPSHOT_SUFFIX)
}

fn load_descriptor(path: &Path) -> Result<DescriptorDocument> {
    DescriptorDocument::load(path).map_err(|err| ValidationError::MalformedDescriptor {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })
}

fn validate_identifier(
    field: CoordinateField,
    value: &str,
    declared: Option<&str>,
    require_equal: bool,
) -> Result<()> {
    if !is_valid_identifier(value) {
        return Err(ValidationError::InvalidIdentifier {
            field,
            value: value.to_owned(),
        });
    }
    if require_equal && declared != Some(value) {
        return Err(ValidationError::IdentifierMismatch {
            field,
            publication: value.to_owned(),
            declared: declared.map(str::to_owned),
        });
    }
    Ok(())
}

fn validate_artefact_names(artefact: &ArtefactFile) -> Result<()> {
    if artefact.extension().is_empty() {
        return Err(ValidationError::EmptyExtension {
            path: artefact.path().to_path_buf(),
        });
    }
    validate_file_nameable("artefact extension", artefact.extension())?;

    if let Some(classifier) = artefact.classifier() {
        if classifier.is_empty() {
            return Err(ValidationError::EmptyClassifier {
                path: artefact.path().to_path_buf(),
            });
        }
        validate_file_nameable("artefact classifier", classifier)?;
    }
    Ok(())
}

/// Reject values that would put a control character into an entry name.
fn validate_file_nameable(what: &'static str, value: &str) -> Result<()> {
    match value.chars().find(|c| c.is_control()) {
        Some(c) => Err(ValidationError::ControlCharacter {
            what,
            code_point: u32::from(c),
        }),
        None => Ok(()),
    }
}

fn validate_is_file(path: &Path) -> Result<()> {
    let Ok(metadata) = path.metadata() else {
        return Err(ValidationError::MissingFile {
            path: path.to_path_buf(),
        });
    };
    if !metadata.is_file() {
        return Err(ValidationError::NotAFile {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

fn same_slot(a: &ArtefactFile, b: &ArtefactFile) -> bool {
    a.extension() == b.extension() && a.classifier() == b.classifier()
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
