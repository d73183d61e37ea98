// ABOUTME: Application identifier validation.
// ABOUTME: Hosting-platform app ids are lowercase DNS-label-like strings.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppIdError {
    #[error("application id cannot be empty")]
    Empty,

    #[error("application id exceeds maximum length of 100 characters")]
    TooLong,

    #[error("application id cannot start or end with a hyphen")]
    EdgeHyphen,

    #[error("application id must be lowercase")]
    NotLowercase,

    #[error("invalid character in application id: '{0}'")]
    InvalidChar(char),
}

/// An application identifier on the hosting platform.
///
/// The id becomes the leading DNS label of the deployed host
/// (`<app-id>.<server>`), so the same label restrictions apply.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AppId(String);

impl AppId {
    pub fn new(value: &str) -> Result<Self, AppIdError> {
        if value.is_empty() {
            return Err(AppIdError::Empty);
        }

        if value.len() > 100 {
            return Err(AppIdError::TooLong);
        }

        if value.starts_with('-') || value.ends_with('-') {
            return Err(AppIdError::EdgeHyphen);
        }

        for c in value.chars() {
            if c.is_ascii_uppercase() {
                return Err(AppIdError::NotLowercase);
            }
            if !c.is_ascii_lowercase() && !c.is_ascii_digit() && c != '-' && c != ':' {
                return Err(AppIdError::InvalidChar(c));
            }
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
