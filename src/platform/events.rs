// ABOUTME: Event types delivered to an UpdateListener during an upload.
// ABOUTME: Progress plus the success/failure terminal notifications.

use thiserror::Error;

/// A progress notification: percentage complete plus the platform's
/// free-text console message.
#[derive(Debug, Clone)]
pub struct ProgressEvent {
    pub percentage: u32,
    pub message: String,
}

impl ProgressEvent {
    pub fn new(percentage: u32, message: impl Into<String>) -> Self {
        Self {
            percentage,
            message: message.into(),
        }
    }
}

/// The terminal success notification.
#[derive(Debug, Clone)]
pub struct SuccessEvent {
    pub message: String,
    /// Extended output the platform gathered along the way (compilation
    /// logs and the like). Not every platform generation supplies this.
    pub details: Option<String>,
}

impl SuccessEvent {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Classification an uploader assigns to a terminal failure.
///
/// Replaces runtime type probing: an uploader that can recognize
/// compilation failures says so here, and ones that cannot report
/// `Generic`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Generic,
    Compilation,
}

/// The terminal failure notification.
#[derive(Debug, Clone)]
pub struct FailureEvent {
    pub message: String,
    pub kind: FailureKind,
    /// Extended failure output, surfaced only for compilation failures.
    pub details: Option<String>,
}

impl FailureEvent {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: FailureKind::Generic,
            details: None,
        }
    }

    pub fn compilation(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: FailureKind::Compilation,
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Error raised by an uploader while arranging an upload, outside the
/// listener's terminal protocol. Carries the original cause so callers can
/// reclassify known platform misconfigurations.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct UploadError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl UploadError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
