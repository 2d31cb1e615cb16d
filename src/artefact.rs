//! Value types describing one publication.
//!
//! These types carry no validation of their own; [`crate::validation`]
//! decides whether a set is acceptable before anything is written.

use std::fmt;
use std::path::{Path, PathBuf};

/// Extension under which the POM is published.
pub const DESCRIPTOR_EXTENSION: &str = "pom";

/// Publication name used when none is configured.
pub const DEFAULT_PUBLICATION_NAME: &str = "maven";

/// The `group:artifactId:version` triple identifying a publication.
///
/// # Examples
///
/// ```
/// use central_publisher::Coordinate;
///
/// let coordinate = Coordinate::new("org.example", "foo", "1.0.0");
/// assert_eq!(coordinate.to_string(), "org.example:foo:1.0.0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Coordinate {
    group: String,
    artifact_id: String,
    version: String,
}

impl Coordinate {
    /// Create a coordinate from its three components.
    #[must_use]
    pub fn new(
        group: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            artifact_id: artifact_id.into(),
            version: version.into(),
        }
    }

    /// Return the group id.
    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Return the artifact id.
    #[must_use]
    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    /// Return the version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact_id, self.version)
    }
}

/// A single file belonging to a publication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtefactFile {
    extension: String,
    classifier: Option<String>,
    path: PathBuf,
}

impl ArtefactFile {
    /// Create an artefact with no classifier.
    #[must_use]
    pub fn new(extension: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            extension: extension.into(),
            classifier: None,
            path: path.into(),
        }
    }

    /// Attach a classifier such as `sources` or `javadoc`.
    #[must_use]
    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = Some(classifier.into());
        self
    }

    /// Return the file extension, without a leading dot.
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Return the classifier, if any.
    #[must_use]
    pub fn classifier(&self) -> Option<&str> {
        self.classifier.as_deref()
    }

    /// Return the path of the file on disk.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Everything needed to publish one coordinate.
///
/// The POM is held separately from the other files because its contents are
/// checked against the coordinate, but it is published like any other
/// artefact; [`ArtefactSet::artefacts`] yields it first.
///
/// # Examples
///
/// ```
/// use central_publisher::{ArtefactFile, ArtefactSet, Coordinate};
///
/// let set = ArtefactSet::new(
///     Coordinate::new("org.example", "foo", "1.0.0"),
///     "build/pom.xml",
/// )
/// .with_file(ArtefactFile::new("jar", "build/foo-1.0.0.jar"));
///
/// let extensions: Vec<_> = set.artefacts().map(|a| a.extension().to_owned()).collect();
/// assert_eq!(extensions, ["pom", "jar"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtefactSet {
    name: String,
    coordinate: Coordinate,
    descriptor: ArtefactFile,
    files: Vec<ArtefactFile>,
}

impl ArtefactSet {
    /// Create a set named [`DEFAULT_PUBLICATION_NAME`] with only a POM.
    #[must_use]
    pub fn new(coordinate: Coordinate, descriptor: impl Into<PathBuf>) -> Self {
        Self {
            name: DEFAULT_PUBLICATION_NAME.to_owned(),
            coordinate,
            descriptor: ArtefactFile::new(DESCRIPTOR_EXTENSION, descriptor),
            files: Vec::new(),
        }
    }

    /// Set the publication name reported in errors.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Append an artefact file.
    #[must_use]
    pub fn with_file(mut self, file: ArtefactFile) -> Self {
        self.files.push(file);
        self
    }

    /// Return the publication name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the coordinate being published.
    #[must_use]
    pub fn coordinate(&self) -> &Coordinate {
        &self.coordinate
    }

    /// Return the path of the POM.
    #[must_use]
    pub fn descriptor_path(&self) -> &Path {
        self.descriptor.path()
    }

    /// Return the artefact files, excluding the POM.
    #[must_use]
    pub fn files(&self) -> &[ArtefactFile] {
        &self.files
    }

    /// Iterate over every published artefact: the POM, then the files in
    /// insertion order.
    pub fn artefacts(&self) -> impl Iterator<Item = &ArtefactFile> {
        std::iter::once(&self.descriptor).chain(self.files.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn coordinate_displays_as_gav() {
        let coordinate = Coordinate::new("net.covers1624", "Quack", "0.4.10.100");
        assert_eq!(coordinate.to_string(), "net.covers1624:Quack:0.4.10.100");
    }

    #[rstest]
    fn artefacts_yield_descriptor_first() {
        let set = ArtefactSet::new(Coordinate::new("g", "a", "1"), "a.pom")
            .with_file(ArtefactFile::new("jar", "a.jar"))
            .with_file(ArtefactFile::new("jar", "a-sources.jar").with_classifier("sources"));

        let listed: Vec<_> = set
            .artefacts()
            .map(|a| (a.extension(), a.classifier()))
            .collect();
        assert_eq!(
            listed,
            [("pom", None), ("jar", None), ("jar", Some("sources"))]
        );
        assert_eq!(set.files().len(), 2);
    }

    #[rstest]
    fn default_name_is_maven() {
        let set = ArtefactSet::new(Coordinate::new("g", "a", "1"), "a.pom");
        assert_eq!(set.name(), DEFAULT_PUBLICATION_NAME);
        assert_eq!(set.with_name("shadow").name(), "shadow");
    }
}
