//! Validate, bundle, and upload Maven publications to the Central Publisher
//! Portal.
//!
//! A publication is described by an [`ArtefactSet`]: a coordinate, the POM
//! that declares it, and the files to publish. [`publish::publish_with`]
//! runs the whole pipeline for one set:
//!
//! 1. [`validation::validate`] checks the set against its POM and the
//!    portal's rules without writing anything.
//! 2. [`bundle::build_bundle`] lays every artefact and its checksum
//!    sidecars out in a zip archive using the Maven repository layout.
//! 3. An [`upload::Uploader`] sends the archive to the portal and returns
//!    the deployment id.
//!
//! # Modules
//!
//! - [`artefact`] - Coordinates, artefact files, and artefact sets
//! - [`bundle`] - Zip bundle assembly
//! - [`checksum`] - Streaming file digests and the sidecar algorithm table
//! - [`credentials`] - Portal user token credentials
//! - [`descriptor`] - POM parsing
//! - [`naming`] - Bundle and entry naming policy
//! - [`publish`] - Pipeline orchestration
//! - [`publishing_type`] - Portal deployment mode
//! - [`upload`] - Portal upload client
//! - [`validation`] - Pre-flight validation of artefact sets
//! - [`validation_error`] - Validation failure reasons

pub mod artefact;
pub mod bundle;
pub mod checksum;
pub mod credentials;
pub mod descriptor;
pub mod naming;
pub mod publish;
pub mod publishing_type;
pub mod upload;
pub mod validation;
pub mod validation_error;

pub use artefact::{ArtefactFile, ArtefactSet, Coordinate};
pub use credentials::Credentials;
pub use publish::{PublishError, PublishRequest};
pub use publishing_type::PublishingType;
pub use upload::UploadId;
