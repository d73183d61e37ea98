// ABOUTME: Configuration types and parsing for skylift.yml.
// ABOUTME: Handles YAML parsing, env var interpolation, and validation.

mod credentials;
mod env_value;

pub use credentials::{Credentials, TOKEN_CACHE_FILE};
pub use env_value::EnvValue;

use crate::deploy::DeployError;
use crate::error::{Error, Result};
use crate::types::{AppId, ModuleName};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "skylift.yml";
pub const CONFIG_FILENAME_ALT: &str = "skylift.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".skylift/config.yml";

/// Server the deployed host lives under when none is configured.
pub const DEFAULT_SERVER: &str = "appspot.com";

/// Environment override for the platform server.
pub const SERVER_ENV_VAR: &str = "SKYLIFT_SERVER";

#[derive(Debug, Clone, Deserialize)]
pub struct DeployConfig {
    /// Override application identity; descriptor-embedded ids are used
    /// when absent.
    #[serde(default, deserialize_with = "deserialize_app_id")]
    pub app_id: Option<AppId>,

    /// Target a single named unit of a composite package.
    #[serde(default, deserialize_with = "deserialize_module")]
    pub module: Option<ModuleName>,

    #[serde(default)]
    pub server: Option<String>,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default)]
    pub user_id: Option<String>,

    #[serde(default)]
    pub password: Option<EnvValue>,

    /// `""` means read the local token cache; non-empty means use the
    /// literal token; absent means authenticate with user id + password.
    #[serde(default)]
    pub oauth2_token: Option<String>,

    /// Bound per wait cycle while blocking on an upload outcome.
    #[serde(default = "default_startup_timeout", with = "humantime_serde")]
    pub startup_timeout: Duration,

    /// Whether to query the version/nag endpoint before deploying.
    #[serde(default = "default_update_check")]
    pub update_check: bool,
}

fn default_port() -> u16 {
    80
}

fn default_startup_timeout() -> Duration {
    Duration::from_secs(120)
}

fn default_update_check() -> bool {
    true
}

impl DeployConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                return Self::load(path);
            }
        }

        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }

    /// Check that the configured credential mode is complete: without an
    /// oauth2 token, user id and password are both required.
    pub fn validate(&self) -> std::result::Result<(), DeployError> {
        if self.oauth2_token.is_none() {
            if self.user_id.is_none() {
                return Err(DeployError::Configuration(
                    "user_id is required when no oauth2 token is configured".to_string(),
                ));
            }
            if self.password.is_none() {
                return Err(DeployError::Configuration(
                    "password is required when no oauth2 token is configured".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Resolve the configured credentials (token cache included).
    pub fn resolve_credentials(&self) -> std::result::Result<Credentials, DeployError> {
        Credentials::resolve(self)
    }

    /// The server deployed hosts live under: configuration first, then the
    /// environment, then the platform default.
    pub fn effective_server(&self) -> String {
        if let Some(server) = &self.server {
            return server.clone();
        }
        std::env::var(SERVER_ENV_VAR).unwrap_or_else(|_| DEFAULT_SERVER.to_string())
    }

    pub fn template() -> Self {
        DeployConfig {
            app_id: None,
            module: None,
            server: None,
            port: default_port(),
            user_id: None,
            password: None,
            oauth2_token: Some(String::new()),
            startup_timeout: default_startup_timeout(),
            update_check: default_update_check(),
        }
    }
}

pub fn init_config(dir: &Path, app_id: Option<&str>, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    let app_id = match app_id {
        Some(value) => {
            AppId::new(value).map_err(|e| Error::InvalidConfig(e.to_string()))?;
            value
        }
        None => "my-app",
    };

    let yaml = generate_template_yaml(app_id);
    std::fs::write(&config_path, yaml)?;

    Ok(())
}

fn generate_template_yaml(app_id: &str) -> String {
    format!(
        r#"app_id: {app_id}
server: {DEFAULT_SERVER}
port: 80
# "" reads the local token cache (~/{TOKEN_CACHE_FILE});
# a non-empty value is used literally.
oauth2_token: ""
startup_timeout: 2m
update_check: true
"#
    )
}

// Custom deserializers

fn deserialize_app_id<'de, D>(deserializer: D) -> std::result::Result<Option<AppId>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    opt.map(|s| AppId::new(&s).map_err(serde::de::Error::custom))
        .transpose()
}

fn deserialize_module<'de, D>(deserializer: D) -> std::result::Result<Option<ModuleName>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    opt.map(|s| ModuleName::new(&s).map_err(serde::de::Error::custom))
        .transpose()
}
