// ABOUTME: Error taxonomy for deploy orchestration.
// ABOUTME: Covers descriptor, routing, dispatch, and upload-time failures.

use crate::platform::UploadError;
use thiserror::Error;

/// Substrings that identify a schema-resolution failure caused by backend
/// declarations on a platform generation that cannot resolve them.
const SCHEMA_FAILURE_MARKER: &str = "Failed to read schema document";
const BACKENDS_SCHEMA_MARKER: &str = "backends.xsd";

/// Errors that can occur while orchestrating a deploy.
#[derive(Debug, Error)]
pub enum DeployError {
    /// Required configuration is missing or unusable.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A descriptor was present but could not be parsed.
    #[error("malformed descriptor {path}: {reason}")]
    MalformedDescriptor { path: String, reason: String },

    /// A web module carries no per-unit descriptor.
    #[error("missing {descriptor} in unit {unit}")]
    MissingUnitDescriptor { descriptor: String, unit: String },

    /// Two units registered the same module name.
    #[error("duplicate module {name} in {{{existing}}}")]
    DuplicateModule { name: String, existing: String },

    /// A targeted module is not in the registry.
    #[error("no such module {name}, known modules: {known:?}")]
    UnknownModule { name: String, known: Vec<String> },

    /// Backend declarations need a newer platform SDK generation.
    #[error("deploying a project with backend declarations requires platform SDK 1.5.0 or newer")]
    UnsupportedPlatformFeature(#[source] UploadError),

    /// The upload reached its terminal failure state.
    #[error("cannot deploy: {0}")]
    DeployFailed(String),

    /// Anything else raised while arranging the deploy.
    #[error("unexpected failure while deploying: {0}")]
    Unexpected(#[source] UploadError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DeployError {
    /// Classify an error an uploader raised while arranging an upload.
    ///
    /// A nested cause whose message names both the schema-document read
    /// failure and the backends schema is a recoverable misconfiguration
    /// and gets its own, more actionable variant. Message sniffing is the
    /// only signal the platform gives us here.
    pub fn classify_upload(err: UploadError) -> Self {
        let mut messages = vec![err.to_string()];
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            messages.push(cause.to_string());
            source = cause.source();
        }

        let is_backends_schema = messages
            .iter()
            .any(|m| m.contains(SCHEMA_FAILURE_MARKER) && m.contains(BACKENDS_SCHEMA_MARKER));

        if is_backends_schema {
            DeployError::UnsupportedPlatformFeature(err)
        } else {
            DeployError::Unexpected(err)
        }
    }
}
