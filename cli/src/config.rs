//! Publication configuration file.
//!
//! A TOML file describes one publication: its coordinate, its POM, the
//! artefact files, and optionally the portal settings. Relative paths are
//! resolved against the directory containing the file, so the tool can be
//! run from anywhere.

use central_publisher::artefact::DEFAULT_PUBLICATION_NAME;
use central_publisher::publishing_type::UnknownPublishingType;
use central_publisher::upload::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use central_publisher::{ArtefactFile, ArtefactSet, Coordinate, PublishingType};
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors arising while loading the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read configuration {}", .path.display())]
    Read {
        /// The configuration path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The file is not valid configuration, including an unknown
    /// publishing type.
    #[error("invalid configuration {}", .path.display())]
    Parse {
        /// The configuration path.
        path: PathBuf,
        /// The TOML error, with the offending line.
        #[source]
        source: Box<toml::de::Error>,
    },
}

/// A publication as described by the configuration file.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PublishConfig {
    /// The coordinate and POM.
    pub publication: PublicationConfig,
    /// The artefact files, in bundle order.
    #[serde(default, rename = "artefact")]
    pub artefacts: Vec<ArtefactConfig>,
    /// Portal settings.
    #[serde(default)]
    pub portal: PortalConfig,
}

/// The `[publication]` table.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PublicationConfig {
    /// Name reported in errors.
    #[serde(default = "PublicationConfig::default_name")]
    pub name: String,
    /// Maven group id.
    pub group: String,
    /// Maven artifact id.
    pub artifact_id: String,
    /// Release version.
    pub version: String,
    /// Path of the POM.
    pub descriptor: PathBuf,
}

impl PublicationConfig {
    fn default_name() -> String {
        DEFAULT_PUBLICATION_NAME.to_owned()
    }
}

/// One `[[artefact]]` entry.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ArtefactConfig {
    /// File extension, such as `jar`.
    pub extension: String,
    /// Optional classifier, such as `sources`.
    #[serde(default)]
    pub classifier: Option<String>,
    /// Path of the file.
    pub path: PathBuf,
}

/// The optional `[portal]` table.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct PortalConfig {
    /// API base URL.
    pub base_url: String,
    /// Deployment mode.
    pub publishing_type: PublishingTypeSetting,
    /// Request timeout in seconds.
    pub timeout_secs: TimeoutSecs,
}

impl PortalConfig {
    /// Return the request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.get())
    }
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            publishing_type: PublishingTypeSetting::default(),
            timeout_secs: TimeoutSecs(DEFAULT_TIMEOUT.as_secs()),
        }
    }
}

/// A request timeout in whole seconds. Zero would fail every upload at
/// once, so it is refused when the file is parsed.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(try_from = "u64")]
pub struct TimeoutSecs(u64);

impl TimeoutSecs {
    /// Return the timeout in seconds.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Returned for a `timeout_secs` of zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("timeout_secs must be at least 1")]
pub struct ZeroTimeout;

impl TryFrom<u64> for TimeoutSecs {
    type Error = ZeroTimeout;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        if value == 0 {
            Err(ZeroTimeout)
        } else {
            Ok(Self(value))
        }
    }
}

/// A publishing type read from TOML, parsed with the portal's exact
/// spelling.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(try_from = "String")]
pub struct PublishingTypeSetting(pub PublishingType);

impl TryFrom<String> for PublishingTypeSetting {
    type Error = UnknownPublishingType;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse().map(Self)
    }
}

impl PublishConfig {
    /// Load and parse `path`, resolving relative paths against its
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read and
    /// [`ConfigError::Parse`] if it is not valid configuration.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        Self::from_toml(&text, base_dir).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse configuration text, resolving relative paths against
    /// `base_dir`.
    ///
    /// # Errors
    ///
    /// Returns the TOML error if `text` is not valid configuration.
    pub fn from_toml(text: &str, base_dir: &Path) -> Result<Self, Box<toml::de::Error>> {
        let mut config: Self = toml::from_str(text).map_err(Box::new)?;
        config.publication.descriptor = base_dir.join(&config.publication.descriptor);
        for artefact in &mut config.artefacts {
            artefact.path = base_dir.join(&artefact.path);
        }
        Ok(config)
    }

    /// Return the configured publishing type.
    #[must_use]
    pub const fn publishing_type(&self) -> PublishingType {
        self.portal.publishing_type.0
    }

    /// Build the artefact set described by this configuration.
    #[must_use]
    pub fn artefact_set(&self) -> ArtefactSet {
        let publication = &self.publication;
        let coordinate = Coordinate::new(
            publication.group.clone(),
            publication.artifact_id.clone(),
            publication.version.clone(),
        );
        self.artefacts.iter().fold(
            ArtefactSet::new(coordinate, publication.descriptor.clone())
                .with_name(publication.name.clone()),
            |set, artefact| {
                let mut file =
                    ArtefactFile::new(artefact.extension.clone(), artefact.path.clone());
                if let Some(classifier) = &artefact.classifier {
                    file = file.with_classifier(classifier.clone());
                }
                set.with_file(file)
            },
        )
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
