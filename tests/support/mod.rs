// ABOUTME: Test support utilities.
// ABOUTME: Provides the scripted mock uploader and on-disk package fixtures.

// Each test binary only uses some of these modules, so allow dead_code.
#[allow(dead_code)]
pub mod fixtures;
#[allow(dead_code)]
pub mod mock_uploader;
