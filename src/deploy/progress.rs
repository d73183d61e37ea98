// ABOUTME: Lifecycle phase classification for platform progress messages.
// ABOUTME: A cyclic cursor advancing on prefix matches of the current phase.

/// A lifecycle phase of a platform update, in the order the platform
/// reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressPhase {
    Preparing,
    Deploying,
    VerifyingAvailability,
    UpdatingDatastore,
}

impl ProgressPhase {
    /// Header surfaced on the console when this phase begins.
    pub fn header(self) -> &'static str {
        match self {
            ProgressPhase::Preparing => "Preparing to deploy",
            ProgressPhase::Deploying => "Deploying",
            ProgressPhase::VerifyingAvailability => "Verifying availability",
            ProgressPhase::UpdatingDatastore => "Updating datastore",
        }
    }

    /// Console-message prefixes that mark the beginning of this phase.
    /// These are conventions of the external platform, not a stable
    /// contract; they track the SDK's console output.
    fn prefixes(self) -> &'static [&'static str] {
        match self {
            ProgressPhase::Preparing => {
                &["Created staging directory", "Scanning files on local disk"]
            }
            ProgressPhase::Deploying => &["Uploading"],
            ProgressPhase::VerifyingAvailability => &["Will check again in 1 seconds."],
            ProgressPhase::UpdatingDatastore => &["Uploading index"],
        }
    }

    fn next(self) -> Self {
        match self {
            ProgressPhase::Preparing => ProgressPhase::Deploying,
            ProgressPhase::Deploying => ProgressPhase::VerifyingAvailability,
            ProgressPhase::VerifyingAvailability => ProgressPhase::UpdatingDatastore,
            ProgressPhase::UpdatingDatastore => ProgressPhase::Preparing,
        }
    }
}

/// Cursor into the fixed phase sequence.
///
/// Each message is checked against the prefix set of the current expected
/// phase only; on a match the cursor advances one step, wrapping after the
/// last phase. It never regresses or skips, so changed platform wording
/// costs a header but nothing else. Best-effort cosmetics, not
/// correctness.
#[derive(Debug)]
pub struct PhaseCursor {
    current: ProgressPhase,
}

impl PhaseCursor {
    pub fn new() -> Self {
        Self {
            current: ProgressPhase::Preparing,
        }
    }

    /// The phase the cursor expects next.
    pub fn current(&self) -> ProgressPhase {
        self.current
    }

    /// Classify a progress message. Returns the phase that just began if
    /// the message matched, advancing the cursor.
    pub fn classify(&mut self, message: &str) -> Option<ProgressPhase> {
        let phase = self.current;
        if phase.prefixes().iter().any(|p| message.starts_with(p)) {
            self.current = phase.next();
            return Some(phase);
        }
        None
    }
}

impl Default for PhaseCursor {
    fn default() -> Self {
        Self::new()
    }
}
