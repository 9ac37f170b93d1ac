//! Authorization-code + PKCE grant, with an opportunistic refresh-token
//! short-circuit ahead of the interactive round trip.

use {
    tracing::{debug, info},
    url::Url,
};

use {
    crate::{
        error::{Error, Result},
        pkce::{generate_pkce, generate_state},
        types::{PkceChallenge, TokenSet},
    },
    keymint_browser::{AuthorizationResponse, capture_authorization_response},
    keymint_config::AuthConfig,
};

/// Acquire tokens, trying `stored_refresh_token` first.
///
/// The state machine is linear: refresh attempt → authorization URL →
/// interactive capture → response validation → code exchange. Only the
/// refresh attempt is recoverable; everything after it aborts the run.
pub async fn acquire(config: &AuthConfig, stored_refresh_token: Option<&str>) -> Result<TokenSet> {
    let client = reqwest::Client::new();

    if let Some(refresh_token) = stored_refresh_token {
        if let Some(tokens) = try_refresh(&client, config, refresh_token).await {
            info!("access token refreshed from stored refresh token");
            return Ok(tokens);
        }
    }

    let pkce = generate_pkce();
    let state = generate_state();
    let auth_url = build_authorization_url(config, &pkce, &state)?;

    let response = capture_authorization_response(auth_url.as_str(), config).await?;
    let code = validate_response(&response, &state)?;

    exchange_code(&client, config, &code, &pkce.verifier, &response.redirect_uri).await
}

/// Refresh-token grant. Every failure mode — transport error, non-JSON
/// body, token-less response — falls through to the interactive flow.
async fn try_refresh(
    client: &reqwest::Client,
    config: &AuthConfig,
    refresh_token: &str,
) -> Option<TokenSet> {
    let params = [
        ("grant_type", "refresh_token"),
        ("refresh_token", refresh_token),
        ("client_id", config.client_id.as_deref().unwrap_or_default()),
    ];

    let response = match client.post(&config.token_endpoint).form(&params).send().await {
        Ok(response) => response,
        Err(e) => {
            debug!(error = %e, "refresh request failed, falling back to interactive flow");
            return None;
        },
    };
    let body = response.text().await.unwrap_or_default();

    match TokenSet::from_response(&body) {
        Ok(tokens) => Some(tokens),
        Err(_) => {
            debug!("refresh response carried no access token, falling back to interactive flow");
            None
        },
    }
}

/// Assemble the authorization URL with PKCE and anti-CSRF parameters.
fn build_authorization_url(
    config: &AuthConfig,
    pkce: &PkceChallenge,
    state: &str,
) -> Result<Url> {
    let mut url = Url::parse(&config.authorization_endpoint)?;
    url.query_pairs_mut()
        .append_pair("client_id", config.client_id.as_deref().unwrap_or_default())
        .append_pair("code_challenge", &pkce.challenge)
        .append_pair("code_challenge_method", "S256")
        .append_pair("response_type", "code");
    if !config.scope.is_empty() {
        url.query_pairs_mut().append_pair("scope", &config.scope);
    }
    url.query_pairs_mut().append_pair("state", state);
    if !config.redirect_uri.is_empty() {
        url.query_pairs_mut().append_pair("redirect_uri", &config.redirect_uri);
    }
    if !config.audience.is_empty() {
        url.query_pairs_mut().append_pair("audience", &config.audience);
    }
    Ok(url)
}

/// Check the captured query against the expected `state` and surface
/// provider protocol errors. Returns the authorization code.
fn validate_response(response: &AuthorizationResponse, expected_state: &str) -> Result<String> {
    let mut code = None;
    let mut state = None;
    for (name, value) in url::form_urlencoded::parse(response.query.as_bytes()) {
        match name.as_ref() {
            "error" => return Err(Error::Authorization(value.into_owned())),
            "code" => code = Some(value.into_owned()),
            "state" => state = Some(value.into_owned()),
            _ => {},
        }
    }

    if state.as_deref() != Some(expected_state) {
        return Err(Error::StateMismatch);
    }
    code.ok_or(Error::MissingCode)
}

/// Trade the authorization code and PKCE verifier for tokens.
async fn exchange_code(
    client: &reqwest::Client,
    config: &AuthConfig,
    code: &str,
    verifier: &str,
    redirect_uri: &str,
) -> Result<TokenSet> {
    let params = [
        ("grant_type", "authorization_code"),
        ("code", code),
        ("redirect_uri", redirect_uri),
        ("client_id", config.client_id.as_deref().unwrap_or_default()),
        ("code_verifier", verifier),
    ];

    let mut request = client.post(&config.token_endpoint).form(&params);
    if !config.origin.is_empty() {
        // Some servers enforce CORS-style origin checks even for this exchange.
        request = request.header("Origin", &config.origin);
    }

    debug!(endpoint = %config.token_endpoint, "exchanging authorization code");
    let response = request.send().await?;
    let body = response.text().await?;
    TokenSet::from_response(&body)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn test_config() -> AuthConfig {
        AuthConfig {
            client_id: Some("cli-client".into()),
            client_secret: None,
            redirect_uri: "http://localhost:7777/callback".into(),
            scope: "openid offline_access".into(),
            authorization_endpoint: "https://login.example.com/authorize".into(),
            token_endpoint: "https://login.example.com/token".into(),
            audience: String::new(),
            resource: String::new(),
            origin: String::new(),
            flow: "authorization_code".into(),
            auto_fill: None,
            custom_script_path: None,
        }
    }

    #[test]
    fn authorization_url_carries_pkce_and_state() {
        let config = test_config();
        let pkce = generate_pkce();
        let url = build_authorization_url(&config, &pkce, "state-123").unwrap();

        let params: HashMap<_, _> = url.query_pairs().collect();
        assert_eq!(params.get("client_id").map(AsRef::as_ref), Some("cli-client"));
        assert_eq!(
            params.get("code_challenge").map(AsRef::as_ref),
            Some(pkce.challenge.as_str())
        );
        assert_eq!(params.get("code_challenge_method").map(AsRef::as_ref), Some("S256"));
        assert_eq!(params.get("response_type").map(AsRef::as_ref), Some("code"));
        assert_eq!(params.get("state").map(AsRef::as_ref), Some("state-123"));
        assert_eq!(
            params.get("redirect_uri").map(AsRef::as_ref),
            Some("http://localhost:7777/callback")
        );
        assert_eq!(
            params.get("scope").map(AsRef::as_ref),
            Some("openid offline_access")
        );
    }

    #[test]
    fn optional_parameters_are_omitted_when_empty() {
        let mut config = test_config();
        config.scope = String::new();
        config.redirect_uri = String::new();
        let pkce = generate_pkce();

        let url = build_authorization_url(&config, &pkce, "s").unwrap();
        let params: HashMap<_, _> = url.query_pairs().collect();
        assert!(!params.contains_key("scope"));
        assert!(!params.contains_key("redirect_uri"));
        assert!(!params.contains_key("audience"));
    }

    #[test]
    fn audience_is_appended_when_configured() {
        let mut config = test_config();
        config.audience = "https://api.example.com".into();
        let pkce = generate_pkce();

        let url = build_authorization_url(&config, &pkce, "s").unwrap();
        let params: HashMap<_, _> = url.query_pairs().collect();
        assert_eq!(
            params.get("audience").map(AsRef::as_ref),
            Some("https://api.example.com")
        );
    }

    #[test]
    fn invalid_authorization_endpoint_is_rejected() {
        let mut config = test_config();
        config.authorization_endpoint = "not a url".into();
        let pkce = generate_pkce();
        assert!(build_authorization_url(&config, &pkce, "s").is_err());
    }

    fn captured(query: &str) -> AuthorizationResponse {
        AuthorizationResponse {
            redirect_uri: "http://localhost:7777/callback".into(),
            query: query.into(),
        }
    }

    #[test]
    fn validation_returns_the_code_on_matching_state() {
        let code = validate_response(&captured("code=abc&state=s1"), "s1").unwrap();
        assert_eq!(code, "abc");
    }

    #[test]
    fn validation_rejects_mismatched_state() {
        let err = validate_response(&captured("code=abc&state=other"), "s1").unwrap_err();
        assert!(matches!(err, Error::StateMismatch));
    }

    #[test]
    fn provider_error_code_is_surfaced() {
        let err =
            validate_response(&captured("error=access_denied&state=s1"), "s1").unwrap_err();
        assert_eq!(err.to_string(), "OAuth 2.0 Error: 'access_denied'.");
    }

    #[test]
    fn missing_code_with_matching_state_is_rejected() {
        let err = validate_response(&captured("state=s1"), "s1").unwrap_err();
        assert!(matches!(err, Error::MissingCode));
    }

    #[test]
    fn url_encoded_code_is_decoded() {
        let code = validate_response(&captured("code=a%2Fb&state=s1"), "s1").unwrap();
        assert_eq!(code, "a/b");
    }
}
