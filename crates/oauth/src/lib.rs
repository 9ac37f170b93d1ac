//! OAuth 2.0 token acquisition: PKCE, flow selection, and the grant state
//! machines for the authorization-code and client-credentials flows.

pub mod authorization_code;
pub mod client_credentials;
pub mod error;
pub mod flow;
pub mod pkce;
pub mod types;

pub use {
    error::{Error, Result},
    flow::FlowKind,
    types::{PkceChallenge, TokenSet},
};
