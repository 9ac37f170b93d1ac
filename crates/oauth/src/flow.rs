//! Flow selection: a closed mapping from the config's declared `flow` value
//! to the grant implementation.

use {keymint_config::AuthConfig, tracing::debug};

use crate::{
    authorization_code, client_credentials,
    error::{Error, Result},
    types::TokenSet,
};

const AUTHORIZATION_CODE: &str = "authorization_code";
const CLIENT_CREDENTIALS: &str = "client_credentials";

/// The two grant types this tool implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowKind {
    AuthorizationCode,
    ClientCredentials,
}

impl FlowKind {
    /// Map a declared flow identifier to its implementation. Total over all
    /// strings: anything unknown is an `UnsupportedFlow` error.
    pub fn resolve(flow: &str) -> Result<Self> {
        match flow {
            AUTHORIZATION_CODE => Ok(Self::AuthorizationCode),
            CLIENT_CREDENTIALS => Ok(Self::ClientCredentials),
            other => Err(Error::UnsupportedFlow(other.to_string())),
        }
    }

    /// Run the grant. `stored_refresh_token` only matters for the
    /// authorization-code flow; client-credentials ignores it.
    pub async fn acquire(
        self,
        config: &AuthConfig,
        stored_refresh_token: Option<&str>,
    ) -> Result<TokenSet> {
        debug!(flow = ?self, "acquiring tokens");
        match self {
            Self::AuthorizationCode => {
                authorization_code::acquire(config, stored_refresh_token).await
            },
            Self::ClientCredentials => client_credentials::acquire(config).await,
        }
    }
}
