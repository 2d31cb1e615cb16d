//! POM parsing.
//!
//! Only the identity of the project is read: `groupId`, `artifactId`,
//! `version`, and whether a `<parent>` is declared. Anything else in the
//! document is ignored.

use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors arising while reading a POM.
#[derive(Debug, Error)]
pub enum DescriptorError {
    /// The file could not be read.
    #[error("failed to read POM: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not well-formed XML.
    #[error("POM is not well-formed XML: {0}")]
    Xml(#[from] roxmltree::Error),

    /// The root element is not `<project>`.
    #[error("expected root element <project>, found <{found}>")]
    NotAProject {
        /// Local name of the root element.
        found: String,
    },
}

/// The project identity declared by a POM.
///
/// # Examples
///
/// ```
/// use central_publisher::descriptor::DescriptorDocument;
///
/// let pom = DescriptorDocument::parse(
///     "<project><groupId>org.example</groupId>\
///      <artifactId>foo</artifactId><version>1.0.0</version></project>",
/// )
/// .expect("valid POM");
/// assert_eq!(pom.artifact_id(), Some("foo"));
/// assert!(!pom.has_parent());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescriptorDocument {
    group_id: Option<String>,
    artifact_id: Option<String>,
    version: Option<String>,
    has_parent: bool,
}

impl DescriptorDocument {
    /// Read and parse the POM at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError`] if the file cannot be read or is not a
    /// POM.
    pub fn load(path: &Path) -> Result<Self, DescriptorError> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Parse POM text.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError::Xml`] for malformed XML and
    /// [`DescriptorError::NotAProject`] when the root element is wrong.
    pub fn parse(text: &str) -> Result<Self, DescriptorError> {
        let document = roxmltree::Document::parse(text)?;
        let project = document.root_element();
        let root_name = project.tag_name().name();
        if root_name != "project" {
            return Err(DescriptorError::NotAProject {
                found: root_name.to_owned(),
            });
        }

        let mut pom = Self::default();
        for child in project.children().filter(roxmltree::Node::is_element) {
            match child.tag_name().name() {
                "groupId" => pom.group_id = element_text(child),
                "artifactId" => pom.artifact_id = element_text(child),
                "version" => pom.version = element_text(child),
                "parent" => pom.has_parent = true,
                _ => {}
            }
        }
        Ok(pom)
    }

    /// Return the declared `groupId`, if any.
    #[must_use]
    pub fn group_id(&self) -> Option<&str> {
        self.group_id.as_deref()
    }

    /// Return the declared `artifactId`, if any.
    #[must_use]
    pub fn artifact_id(&self) -> Option<&str> {
        self.artifact_id.as_deref()
    }

    /// Return the declared `version`, if any.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Return whether the POM declares a `<parent>`.
    ///
    /// A child POM may inherit its group and version, so those are only
    /// compared against the coordinate when this is false.
    #[must_use]
    pub const fn has_parent(&self) -> bool {
        self.has_parent
    }
}

fn element_text(node: roxmltree::Node<'_, '_>) -> Option<String> {
    node.text().map(|text| text.trim().to_owned())
}
