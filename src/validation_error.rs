//! Error types for publication validation.
//!
//! Each variant names the offending value and the rule it breaks, so the
//! message alone is enough to fix the build script that produced it.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The coordinate component a validation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoordinateField {
    /// `groupId`.
    Group,
    /// `artifactId`.
    ArtifactId,
    /// `version`.
    Version,
}

impl fmt::Display for CoordinateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Group => "group id",
            Self::ArtifactId => "artifact id",
            Self::Version => "version",
        })
    }
}

/// Reasons a publication is rejected before any bundle is written.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// The POM could not be read or parsed.
    #[error("malformed descriptor {}: {reason}", .path.display())]
    MalformedDescriptor {
        /// Path of the POM.
        path: PathBuf,
        /// Description of the parse failure.
        reason: String,
    },

    /// A coordinate component contains characters outside `[A-Za-z0-9_.-]`.
    #[error("invalid {field} \"{value}\"; only letters, digits, '_', '-' and '.' are allowed")]
    InvalidIdentifier {
        /// The offending component.
        field: CoordinateField,
        /// The rejected value.
        value: String,
    },

    /// A coordinate component disagrees with the POM.
    #[error(
        "{field} does not match POM: publication has \"{publication}\", POM has {}",
        display_declared(.declared.as_deref())
    )]
    IdentifierMismatch {
        /// The offending component.
        field: CoordinateField,
        /// The value from the coordinate.
        publication: String,
        /// The value declared by the POM, if any.
        declared: Option<String>,
    },

    /// The version is empty.
    #[error("version can't be empty")]
    EmptyVersion,

    /// The version is a snapshot, which the portal does not accept.
    #[error("snapshot version \"{version}\" can't be published to the Central Portal")]
    SnapshotVersion {
        /// The rejected version.
        version: String,
    },

    /// A value that becomes part of a file name contains a control
    /// character.
    #[error("{what} contains control character \\u{code_point:04x}")]
    ControlCharacter {
        /// Which value was checked.
        what: &'static str,
        /// The offending code point.
        code_point: u32,
    },

    /// An artefact has an empty extension.
    #[error("artefact extension can't be empty ({})", .path.display())]
    EmptyExtension {
        /// Path of the artefact.
        path: PathBuf,
    },

    /// An artefact has a classifier that is present but empty.
    #[error("artefact classifier can't be empty if present ({})", .path.display())]
    EmptyClassifier {
        /// Path of the artefact.
        path: PathBuf,
    },

    /// An artefact file does not exist.
    #[error("artefact file {} does not exist", .path.display())]
    MissingFile {
        /// Path of the artefact.
        path: PathBuf,
    },

    /// An artefact path is not a regular file.
    #[error("artefact file {} must be a file, not a directory", .path.display())]
    NotAFile {
        /// Path of the artefact.
        path: PathBuf,
    },

    /// Two artefacts share an extension and classifier.
    #[error(
        "multiple artefacts with extension \"{extension}\" and classifier {}",
        display_declared(.classifier.as_deref())
    )]
    DuplicateArtefact {
        /// The shared extension.
        extension: String,
        /// The shared classifier, if any.
        classifier: Option<String>,
    },
}

fn display_declared(value: Option<&str>) -> String {
    value.map_or_else(|| "none".to_owned(), |v| format!("\"{v}\""))
}

/// Result type alias using [`ValidationError`].
pub type Result<T> = std::result::Result<T, ValidationError>;
