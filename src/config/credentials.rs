// ABOUTME: Credential resolution for platform uploads.
// ABOUTME: Literal token, locally cached token, or user id + password.

use super::DeployConfig;
use crate::deploy::DeployError;
use std::fs;

/// File under the home directory holding a previously obtained OAuth2 token.
pub const TOKEN_CACHE_FILE: &str = ".skylift_oauth2_tokens";

/// Resolved credentials handed to the upload capability.
#[derive(Debug, Clone)]
pub enum Credentials {
    Password { user_id: String, password: String },
    Token(String),
}

impl Credentials {
    /// Resolve credentials from the configuration.
    ///
    /// A non-empty `oauth2_token` is used literally; an empty one means
    /// read the local token cache; an absent one falls back to user id +
    /// password. Resolution happens before any upload is attempted, so a
    /// bad credential setup never reaches the platform.
    pub fn resolve(config: &DeployConfig) -> Result<Self, DeployError> {
        match config.oauth2_token.as_deref() {
            Some(token) if !token.trim().is_empty() => Ok(Credentials::Token(token.to_string())),
            Some(_) => cached_token().map(Credentials::Token),
            None => {
                let user_id = config.user_id.clone().ok_or_else(|| {
                    DeployError::Configuration(
                        "user_id is required when no oauth2 token is configured".to_string(),
                    )
                })?;
                let password = config
                    .password
                    .as_ref()
                    .ok_or_else(|| {
                        DeployError::Configuration(
                            "password is required when no oauth2 token is configured".to_string(),
                        )
                    })?
                    .resolve()
                    .map_err(|e| DeployError::Configuration(e.to_string()))?;
                Ok(Credentials::Password { user_id, password })
            }
        }
    }
}

fn cached_token() -> Result<String, DeployError> {
    let hint = format!(
        "store an OAuth2 token in ~/{TOKEN_CACHE_FILE} or set oauth2_token in the configuration"
    );

    let home = dirs::home_dir().ok_or_else(|| {
        DeployError::Configuration("cannot locate the home directory for the token cache".to_string())
    })?;

    let path = home.join(TOKEN_CACHE_FILE);
    if !path.is_file() {
        return Err(DeployError::Configuration(format!(
            "no cached oauth2 token at {}: {hint}",
            path.display()
        )));
    }

    let token = fs::read_to_string(&path)?.trim().to_string();
    if token.is_empty() {
        return Err(DeployError::Configuration(format!(
            "cached oauth2 token at {} is empty, tokens expired? {hint}",
            path.display()
        )));
    }

    Ok(token)
}
