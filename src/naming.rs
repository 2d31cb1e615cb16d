//! Naming policy for bundles and the entries inside them.
//!
//! Entries follow the Maven repository layout the portal expects:
//! `<group as path>/<artifactId>/<version>/<artifactId>-<version>[-<classifier>].<extension>`.
//! The bundle itself is named `<artifactId>-<version>.zip`.

use crate::artefact::Coordinate;
use crate::checksum::ChecksumAlgorithm;
use std::fmt;

/// The fixed file extension for bundles.
const BUNDLE_EXTENSION: &str = ".zip";

/// The file name of the bundle for a coordinate.
///
/// # Examples
///
/// ```
/// use central_publisher::Coordinate;
/// use central_publisher::naming::BundleName;
///
/// let coordinate = Coordinate::new("org.example", "foo", "1.0.0");
/// assert_eq!(BundleName::new(&coordinate).to_string(), "foo-1.0.0.zip");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BundleName<'a> {
    coordinate: &'a Coordinate,
}

impl<'a> BundleName<'a> {
    /// Create the bundle name for `coordinate`.
    #[must_use]
    pub const fn new(coordinate: &'a Coordinate) -> Self {
        Self { coordinate }
    }

    /// Return the file name as a string.
    #[must_use]
    pub fn filename(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for BundleName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}{BUNDLE_EXTENSION}",
            self.coordinate.artifact_id(),
            self.coordinate.version()
        )
    }
}

/// The path of one artefact, or of one of its checksum sidecars, inside a
/// bundle.
///
/// # Examples
///
/// ```
/// use central_publisher::Coordinate;
/// use central_publisher::checksum::ChecksumAlgorithm;
/// use central_publisher::naming::EntryName;
///
/// let coordinate = Coordinate::new("org.example", "foo", "1.0.0");
/// let jar = EntryName::new(&coordinate, Some("sources"), "jar");
/// assert_eq!(
///     jar.to_string(),
///     "org/example/foo/1.0.0/foo-1.0.0-sources.jar"
/// );
/// assert_eq!(
///     jar.sidecar(ChecksumAlgorithm::Sha256).to_string(),
///     "org/example/foo/1.0.0/foo-1.0.0-sources.jar.sha256"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryName<'a> {
    coordinate: &'a Coordinate,
    classifier: Option<&'a str>,
    extension: &'a str,
    checksum: Option<ChecksumAlgorithm>,
}

impl<'a> EntryName<'a> {
    /// Create the entry name for an artefact.
    #[must_use]
    pub const fn new(
        coordinate: &'a Coordinate,
        classifier: Option<&'a str>,
        extension: &'a str,
    ) -> Self {
        Self {
            coordinate,
            classifier,
            extension,
            checksum: None,
        }
    }

    /// Return the entry name of this artefact's checksum sidecar.
    #[must_use]
    pub const fn sidecar(self, algorithm: ChecksumAlgorithm) -> Self {
        Self {
            checksum: Some(algorithm),
            ..self
        }
    }
}

impl fmt::Display for EntryName<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let artifact_id = self.coordinate.artifact_id();
        let version = self.coordinate.version();
        for segment in self.coordinate.group().split('.') {
            write!(f, "{segment}/")?;
        }
        write!(f, "{artifact_id}/{version}/{artifact_id}-{version}")?;
        if let Some(classifier) = self.classifier {
            write!(f, "-{classifier}")?;
        }
        write!(f, ".{}", self.extension)?;
        if let Some(algorithm) = self.checksum {
            write!(f, ".{}", algorithm.sidecar_extension())?;
        }
        Ok(())
    }
}
