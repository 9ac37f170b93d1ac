//! Browser capture error types.

use thiserror::Error;

/// Errors raised while driving the interactive browser session.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("browser launch failed: {0}")]
    LaunchFailed(String),

    #[error("navigation failed: {0}")]
    NavigationFailed(String),

    #[error("custom script failed: {0}")]
    ScriptFailed(String),

    #[error("autofill failed: {0}")]
    AutoFillFailed(String),

    #[error("no authorization response was captured within {0} seconds")]
    Timeout(u64),

    #[error("browser session ended before an authorization response was captured")]
    CaptureAborted,

    #[error("CDP error: {0}")]
    Cdp(String),
}

impl From<chromiumoxide::error::CdpError> for CaptureError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        CaptureError::Cdp(err.to_string())
    }
}
