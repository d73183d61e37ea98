// ABOUTME: Library root for skylift - deployment orchestration core.
// ABOUTME: The CLI binary is in main.rs.

pub mod config;
pub mod deploy;
pub mod error;
pub mod output;
pub mod package;
pub mod platform;
pub mod types;
