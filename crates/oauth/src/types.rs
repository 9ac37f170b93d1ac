use secrecy::Secret;

use crate::error::{Error, Result};

/// Tokens produced by one successful grant.
///
/// Built exactly once per run; the only later mutation is the orchestrator's
/// optional bearer-prefix rewrite of `access_token`.
#[derive(Clone)]
pub struct TokenSet {
    pub access_token: Secret<String>,
    pub refresh_token: Option<Secret<String>>,
    pub id_token: Option<Secret<String>>,
}

impl TokenSet {
    /// Parse a token-endpoint response body.
    ///
    /// `access_token` is required; `refresh_token` and `id_token` ride along
    /// when the server returns them. Anything else — including a body that
    /// isn't JSON at all — fails with the raw body attached.
    pub(crate) fn from_response(body: &str) -> Result<Self> {
        let json: serde_json::Value =
            serde_json::from_str(body).unwrap_or(serde_json::Value::Null);
        let Some(access_token) = json["access_token"].as_str() else {
            return Err(Error::TokenEndpoint { body: body.to_string() });
        };

        Ok(Self {
            access_token: Secret::new(access_token.to_string()),
            refresh_token: json["refresh_token"].as_str().map(|t| Secret::new(t.to_string())),
            id_token: json["id_token"].as_str().map(|t| Secret::new(t.to_string())),
        })
    }
}

impl std::fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSet")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "[REDACTED]"))
            .field("id_token", &self.id_token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// PKCE verifier/challenge pair.
#[derive(Debug, Clone)]
pub struct PkceChallenge {
    pub verifier: String,
    pub challenge: String,
}
