//! Portal user token credentials.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fmt;

/// A Central Portal user token.
///
/// The value is immutable and is passed explicitly to whatever needs it.
/// `Debug` output never includes the password.
///
/// # Examples
///
/// ```
/// use central_publisher::Credentials;
///
/// let credentials = Credentials::new("user", "secret");
/// assert_eq!(credentials.bearer_token(), "dXNlcjpzZWNyZXQ=");
/// assert!(!format!("{credentials:?}").contains("secret"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Create credentials from a token username and password.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Return the token username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Return the token password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Return `base64(username:password)` for the `Authorization` header.
    #[must_use]
    pub fn bearer_token(&self) -> String {
        STANDARD.encode(format!("{}:{}", self.username, self.password))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}
