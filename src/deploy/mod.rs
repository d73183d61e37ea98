// ABOUTME: Deploy orchestration core.
// ABOUTME: Rearrangement, routing, dispatch, and the upload orchestrator.

mod dispatch;
mod error;
mod orchestrator;
mod progress;
mod rearrange;
mod registry;

pub use dispatch::{ApplicationIdentity, DeployRequest, Deployer, plan};
pub use error::DeployError;
pub use orchestrator::{DeployListener, DeployOutcome, run_upload};
pub use progress::{PhaseCursor, ProgressPhase};
pub use rearrange::rearrange;
pub use registry::ModuleRegistry;
