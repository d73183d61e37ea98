// ABOUTME: Capability traits at the hosting-platform seam.
// ABOUTME: Defines Uploader, UpdateListener, and UpdateCheck.

mod endpoint;
mod events;

pub use endpoint::{DeployTarget, Endpoint};
pub use events::{FailureEvent, FailureKind, ProgressEvent, SuccessEvent, UploadError};

use crate::deploy::DeployRequest;
use async_trait::async_trait;

/// Listener for notifications emitted during a long-running upload.
///
/// An upload invokes `on_progress` zero or more times and then exactly one
/// of the terminal callbacks. Implementations must tolerate a buggy
/// platform delivering a duplicate terminal notification.
pub trait UpdateListener: Send + Sync {
    fn on_progress(&self, event: &ProgressEvent);
    fn on_success(&self, event: &SuccessEvent);
    fn on_failure(&self, event: &FailureEvent);
}

/// The injected long-running upload capability.
///
/// `upload` runs the entire update to completion on the worker task that
/// calls it, reporting lifecycle through the listener. An `Err` return
/// covers failures raised while arranging the upload, before the listener
/// protocol takes over; once a terminal callback has fired, the return
/// value no longer affects the deploy outcome.
#[async_trait]
pub trait Uploader: Send + Sync {
    async fn upload(
        &self,
        request: &DeployRequest,
        listener: &dyn UpdateListener,
    ) -> Result<(), UploadError>;
}

/// Optional version/nag endpoint queried before deploying.
#[async_trait]
pub trait UpdateCheck: Send + Sync {
    /// Returns a nag message when a newer platform SDK is available.
    async fn nag_message(&self) -> Option<String>;
}
