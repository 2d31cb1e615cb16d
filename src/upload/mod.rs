//! Bundle upload to the Central Publisher Portal.
//!
//! Provides a trait-based abstraction over the portal's upload endpoint so
//! the publish pipeline can be exercised without network access.
//!
//! The portal answers a successful upload with `201 Created` and the
//! deployment id as the plain-text body. Every other status is a failure,
//! and its body is kept for diagnostics. Uploads are attempted once.

pub mod multipart;

use crate::credentials::Credentials;
use crate::publishing_type::PublishingType;
use log::{debug, info};
use multipart::MultipartFile;
use std::fmt;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use ureq::SendBody;

/// Base URL of the production portal API.
pub const DEFAULT_BASE_URL: &str = "https://central.sonatype.com/api";

/// Global request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Path of the upload endpoint below the base URL.
const UPLOAD_PATH: &str = "/v1/publisher/upload";

/// Form field carrying the bundle.
const BUNDLE_FIELD: &str = "bundle";

/// The only status the portal uses for an accepted upload.
const STATUS_CREATED: u16 = 201;

/// The deployment id returned by the portal for an accepted bundle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UploadId(String);

impl UploadId {
    /// Wrap a deployment id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Return the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for UploadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Errors arising from a bundle upload.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The portal answered with something other than `201 Created`.
    #[error("upload rejected with HTTP {status} {reason}\n{body}")]
    Rejected {
        /// The HTTP status code.
        status: u16,
        /// The canonical reason phrase for `status`, or empty.
        reason: String,
        /// The full response body.
        body: String,
    },

    /// The request could not be sent or the response could not be read.
    #[error("upload to {url} failed: {reason}")]
    Transport {
        /// The URL that was requested.
        url: String,
        /// A human-readable description of the failure.
        reason: String,
    },

    /// The bundle could not be opened for sending.
    #[error("failed to read bundle: {0}")]
    Io(#[from] std::io::Error),
}

/// Sends a bundle to the portal.
///
/// # Examples
///
/// ```
/// use central_publisher::upload::{CentralPortalClient, Uploader};
///
/// let client = CentralPortalClient::default();
/// // Use client.upload(&bundle, &credentials, publishing_type) in production
/// # let _ = &client as &dyn Uploader;
/// ```
#[cfg_attr(test, mockall::automock)]
pub trait Uploader {
    /// Upload the bundle at `bundle` and return the deployment id.
    ///
    /// # Errors
    ///
    /// Returns [`UploadError`] if the bundle cannot be read, the request
    /// fails, or the portal does not answer `201 Created`.
    fn upload(
        &self,
        bundle: &Path,
        credentials: &Credentials,
        publishing_type: PublishingType,
    ) -> Result<UploadId, UploadError>;
}

/// HTTP client for the portal's upload endpoint, using `ureq`.
#[derive(Debug, Clone)]
pub struct CentralPortalClient {
    base_url: String,
    agent: ureq::Agent,
}

impl CentralPortalClient {
    /// Create a client for the API rooted at `base_url`.
    ///
    /// `timeout` bounds the whole request, including sending the bundle.
    #[must_use]
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build();
        Self {
            base_url: base_url.into(),
            agent: ureq::Agent::new_with_config(config),
        }
    }

    /// Return the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Construct the upload URL for a publishing type.
    ///
    /// # Examples
    ///
    /// ```
    /// use central_publisher::PublishingType;
    /// use central_publisher::upload::CentralPortalClient;
    ///
    /// let client = CentralPortalClient::default();
    /// assert_eq!(
    ///     client.upload_url(PublishingType::Automatic),
    ///     "https://central.sonatype.com/api/v1/publisher/upload?publishingType=AUTOMATIC"
    /// );
    /// ```
    #[must_use]
    pub fn upload_url(&self, publishing_type: PublishingType) -> String {
        format!(
            "{}{UPLOAD_PATH}?publishingType={publishing_type}",
            self.base_url.trim_end_matches('/')
        )
    }
}

impl Default for CentralPortalClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_TIMEOUT)
    }
}

impl Uploader for CentralPortalClient {
    fn upload(
        &self,
        bundle: &Path,
        credentials: &Credentials,
        publishing_type: PublishingType,
    ) -> Result<UploadId, UploadError> {
        let url = self.upload_url(publishing_type);
        let body = MultipartFile::open(BUNDLE_FIELD, bundle)?;
        info!("Uploading {} to {url}", bundle.display());
        debug!("Bundle request body is {} bytes", body.content_length());

        let response = self
            .agent
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", credentials.bearer_token()),
            )
            .header("Content-Type", body.content_type())
            .header("Content-Length", body.content_length().to_string())
            .send(SendBody::from_owned_reader(body.into_reader()))
            .map_err(|e| transport_error(&url, &e))?;

        let status = response.status();
        let text = response
            .into_body()
            .read_to_string()
            .map_err(|e| transport_error(&url, &e))?;

        if status.as_u16() != STATUS_CREATED {
            return Err(UploadError::Rejected {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_owned(),
                body: text,
            });
        }
        Ok(UploadId(text))
    }
}

/// Map a ureq error to [`UploadError::Transport`].
fn transport_error(url: &str, err: &ureq::Error) -> UploadError {
    UploadError::Transport {
        url: url.to_owned(),
        reason: err.to_string(),
    }
}
