// ABOUTME: Runs a long-running upload on a background task and blocks the
// ABOUTME: caller on a monitor until the terminal outcome is reached.

use super::dispatch::DeployRequest;
use super::progress::PhaseCursor;
use super::DeployError;
use crate::output::Output;
use crate::platform::{FailureEvent, FailureKind, ProgressEvent, SuccessEvent, UpdateListener, Uploader};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

/// Terminal state of one deploy call. Set exactly once by the background
/// worker; immutable once non-pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployOutcome {
    Pending,
    Ok,
    Error,
}

struct Shared {
    outcome: DeployOutcome,
    percent_done: u32,
    failure_message: Option<String>,
    arrange_error: Option<DeployError>,
}

struct Monitor {
    state: Mutex<Shared>,
    notify: Notify,
}

impl Monitor {
    fn new() -> Self {
        Self {
            state: Mutex::new(Shared {
                outcome: DeployOutcome::Pending,
                percent_done: 0,
                failure_message: None,
                arrange_error: None,
            }),
            notify: Notify::new(),
        }
    }
}

/// Listener bridging platform notifications to the monitor and the output
/// channels.
///
/// All mutations happen on the worker task; the caller only reads after a
/// wake, under the same lock. The terminal transition is idempotent: a
/// duplicate terminal notification from a buggy platform cannot change an
/// outcome that is already non-pending.
pub struct DeployListener {
    monitor: Arc<Monitor>,
    cursor: Mutex<PhaseCursor>,
    output: Output,
}

impl DeployListener {
    pub fn new(output: Output) -> Self {
        Self {
            monitor: Arc::new(Monitor::new()),
            cursor: Mutex::new(PhaseCursor::new()),
            output,
        }
    }

    /// Percentage reported by the most recent progress event.
    pub fn percent_done(&self) -> u32 {
        self.monitor.state.lock().percent_done
    }

    /// The outcome as currently observable.
    pub fn outcome(&self) -> DeployOutcome {
        self.monitor.state.lock().outcome
    }
}

impl UpdateListener for DeployListener {
    fn on_progress(&self, event: &ProgressEvent) {
        self.monitor.state.lock().percent_done = event.percentage;

        let phase = self.cursor.lock().classify(&event.message);
        if let Some(phase) = phase {
            self.output.console(&format!("\n{}:", phase.header()));
        }
        self.output.console(&format!("\t{}", event.message));
    }

    fn on_success(&self, event: &SuccessEvent) {
        {
            let mut state = self.monitor.state.lock();
            if state.outcome != DeployOutcome::Pending {
                return;
            }
            state.outcome = DeployOutcome::Ok;
            state.percent_done = 0;
        }

        if let Some(details) = &event.details {
            // Extended output goes to the diagnostic channel so a clean
            // deploy doesn't flood the console.
            self.output.diagnostic(details);
        }
        self.output.console("\nDeployment completed successfully");

        self.monitor.notify.notify_one();
    }

    fn on_failure(&self, event: &FailureEvent) {
        {
            let mut state = self.monitor.state.lock();
            if state.outcome != DeployOutcome::Pending {
                return;
            }
            state.outcome = DeployOutcome::Error;
            state.failure_message = Some(event.message.clone());
        }

        self.output.console(&event.message);

        // Only compilation failures carry details worth the console.
        if event.kind == FailureKind::Compilation
            && let Some(details) = &event.details
        {
            self.output.console(details);
        }

        self.monitor.notify.notify_one();
    }
}

/// Run one upload to its terminal outcome.
///
/// The upload capability runs to completion on a dedicated background task;
/// the caller blocks here, re-checking the outcome after every wake so a
/// spurious or missed wakeup costs at most one `startup_timeout` cycle.
/// There is deliberately no bound on the number of wait iterations: a
/// platform that never terminates keeps the caller blocked, matching the
/// upstream tooling this orchestration fronts.
pub async fn run_upload(
    request: DeployRequest,
    uploader: Arc<dyn Uploader>,
    output: Output,
    startup_timeout: Duration,
) -> Result<(), DeployError> {
    let listener = Arc::new(DeployListener::new(output));
    let monitor = listener.monitor.clone();

    let worker_monitor = monitor.clone();
    let worker_listener = listener.clone();
    tokio::spawn(async move {
        if let Err(err) = uploader.upload(&request, worker_listener.as_ref()).await {
            // Arrangement failure outside the listener protocol. If a
            // terminal callback already ran, the outcome stands.
            let classified = DeployError::classify_upload(err);
            {
                let mut state = worker_monitor.state.lock();
                if state.outcome == DeployOutcome::Pending {
                    state.outcome = DeployOutcome::Error;
                    state.arrange_error = Some(classified);
                }
            }
            worker_monitor.notify.notify_one();
        }
    });

    loop {
        {
            let mut state = monitor.state.lock();
            match state.outcome {
                DeployOutcome::Pending => {}
                DeployOutcome::Ok => return Ok(()),
                DeployOutcome::Error => {
                    if let Some(err) = state.arrange_error.take() {
                        return Err(err);
                    }
                    let message = state
                        .failure_message
                        .take()
                        .unwrap_or_else(|| "platform reported an unspecified failure".to_string());
                    return Err(DeployError::DeployFailed(message));
                }
            }
        }

        // Bounded wait per cycle; the timeout does not cancel the upload,
        // it only forces a re-check of the outcome.
        let _ = tokio::time::timeout(startup_timeout, monitor.notify.notified()).await;
    }
}
