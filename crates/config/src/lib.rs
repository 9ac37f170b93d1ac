//! Per-environment OAuth client configuration.
//!
//! Config files are JSON maps from environment name to a client entry:
//!
//! ```json
//! {
//!   "dev": {
//!     "clientId": "…",
//!     "tokenEndpoint": "https://login.example.com/oauth/token",
//!     "flow": "client_credentials"
//!   }
//! }
//! ```
//!
//! Supports `${ENV_VAR}` substitution in the raw file text, so secrets can
//! stay out of the file entirely.

pub mod env_subst;
pub mod error;
pub mod loader;
pub mod schema;
pub mod validate;

pub use {
    error::{Error, Result},
    loader::load_auth_config,
    schema::{AuthConfig, AutoFill},
    validate::validate_config,
};
