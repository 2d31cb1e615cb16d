//! Portal deployment mode.
//!
//! Only the two values the portal documents are accepted. Anything else,
//! including near misses, is an error rather than a guess.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Whether a deployment waits for approval in the portal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PublishingType {
    /// Stop at `VALIDATED` and wait for a user to publish from the portal.
    #[default]
    UserManaged,
    /// Publish automatically once validation passes.
    Automatic,
}

impl PublishingType {
    /// Return the value sent as the `publishingType` query parameter.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UserManaged => "USER_MANAGED",
            Self::Automatic => "AUTOMATIC",
        }
    }
}

impl fmt::Display for PublishingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A string that is not a known publishing type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown publishing type \"{value}\"; expected USER_MANAGED or AUTOMATIC")]
pub struct UnknownPublishingType {
    /// The rejected value.
    pub value: String,
}

impl FromStr for PublishingType {
    type Err = UnknownPublishingType;

    /// Parse the exact portal spelling.
    ///
    /// # Examples
    ///
    /// ```
    /// use central_publisher::PublishingType;
    ///
    /// assert_eq!("AUTOMATIC".parse(), Ok(PublishingType::Automatic));
    /// assert!("USER_MANGED".parse::<PublishingType>().is_err());
    /// ```
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "USER_MANAGED" => Ok(Self::UserManaged),
            "AUTOMATIC" => Ok(Self::Automatic),
            _ => Err(UnknownPublishingType {
                value: value.to_owned(),
            }),
        }
    }
}
