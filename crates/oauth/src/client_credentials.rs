//! Client-credentials grant: one confidential-client round trip.

use tracing::debug;

use {
    crate::{error::Result, types::TokenSet},
    keymint_config::AuthConfig,
};

/// Exchange client id/secret for an access token.
///
/// `resource` rides along only when configured. The response body is parsed
/// regardless of HTTP status — a body without `access_token` is the error,
/// and it keeps the raw text for diagnostics.
pub async fn acquire(config: &AuthConfig) -> Result<TokenSet> {
    let client = reqwest::Client::new();

    let mut params: Vec<(&str, &str)> = vec![("grant_type", "client_credentials")];
    if !config.resource.is_empty() {
        params.push(("resource", &config.resource));
    }

    debug!(endpoint = %config.token_endpoint, "requesting client-credentials grant");
    let response = client
        .post(&config.token_endpoint)
        .basic_auth(
            config.client_id.as_deref().unwrap_or_default(),
            config.client_secret.as_deref(),
        )
        .form(&params)
        .send()
        .await?;
    let body = response.text().await?;

    let tokens = TokenSet::from_response(&body)?;
    // This grant never yields an ID token.
    Ok(TokenSet { id_token: None, ..tokens })
}
