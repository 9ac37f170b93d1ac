//! Interactive user-agent session for the authorization-code flow.
//!
//! Drives a headful Chromium over CDP: navigates to the authorization URL,
//! optionally scripts and autofills the provider's login page, then captures
//! the redirect carrying the authorization code by intercepting it before it
//! ever leaves the browser. The session is a scoped resource — it is torn
//! down no matter how the capture ends.

pub mod capture;
pub mod error;
mod page_setup;

pub use {
    capture::{AuthorizationResponse, capture_authorization_response},
    error::CaptureError,
};
