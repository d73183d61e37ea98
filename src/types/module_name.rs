// ABOUTME: Logical module name validation.
// ABOUTME: Modules are the names units are registered and targeted under.

use std::fmt;
use thiserror::Error;

/// Name used for units whose descriptor declares no module.
pub const DEFAULT_MODULE: &str = "default";

#[derive(Debug, Error)]
pub enum ModuleNameError {
    #[error("module name cannot be empty")]
    Empty,

    #[error("module name exceeds maximum length of 63 characters")]
    TooLong,

    #[error("invalid character in module name: '{0}'")]
    InvalidChar(char),
}

/// The logical name under which a deployable unit is registered.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleName(String);

impl ModuleName {
    pub fn new(value: &str) -> Result<Self, ModuleNameError> {
        if value.is_empty() {
            return Err(ModuleNameError::Empty);
        }

        if value.len() > 63 {
            return Err(ModuleNameError::TooLong);
        }

        for c in value.chars() {
            if !c.is_ascii_lowercase() && !c.is_ascii_digit() && c != '-' {
                return Err(ModuleNameError::InvalidChar(c));
            }
        }

        Ok(Self(value.to_string()))
    }

    /// The implicit module name used when a descriptor omits one.
    pub fn default_module() -> Self {
        Self(DEFAULT_MODULE.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
