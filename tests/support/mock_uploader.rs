// ABOUTME: Scripted mock implementation of the Uploader capability.
// ABOUTME: Replays a fixed sequence of listener notifications.

use async_trait::async_trait;
use parking_lot::Mutex;
use skylift::deploy::DeployRequest;
use skylift::platform::{
    FailureEvent, ProgressEvent, SuccessEvent, UpdateListener, UploadError, Uploader,
};

/// One scripted listener notification.
pub enum Scripted {
    Progress(ProgressEvent),
    Success(SuccessEvent),
    Failure(FailureEvent),
}

/// Uploader that records requests and replays a fixed notification script.
pub struct MockUploader {
    script: Vec<Scripted>,
    arrange_error: Mutex<Option<UploadError>>,
    pub requests: Mutex<Vec<DeployRequest>>,
}

impl MockUploader {
    pub fn with_script(script: Vec<Scripted>) -> Self {
        Self {
            script,
            arrange_error: Mutex::new(None),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// An uploader that immediately emits a success terminal event.
    pub fn succeeding() -> Self {
        Self::with_script(vec![Scripted::Success(SuccessEvent::new(
            "Deployment successful",
        ))])
    }

    /// An uploader that fails while arranging the upload, before the
    /// listener protocol starts.
    pub fn failing_arrangement(error: UploadError) -> Self {
        Self {
            script: Vec::new(),
            arrange_error: Mutex::new(Some(error)),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl Uploader for MockUploader {
    async fn upload(
        &self,
        request: &DeployRequest,
        listener: &dyn UpdateListener,
    ) -> Result<(), UploadError> {
        self.requests.lock().push(request.clone());

        if let Some(error) = self.arrange_error.lock().take() {
            return Err(error);
        }

        for event in &self.script {
            match event {
                Scripted::Progress(e) => listener.on_progress(e),
                Scripted::Success(e) => listener.on_success(e),
                Scripted::Failure(e) => listener.on_failure(e),
            }
        }

        Ok(())
    }
}
