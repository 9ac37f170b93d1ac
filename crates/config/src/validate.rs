//! AuthConfig validation. Collects every violation before failing, so the
//! operator sees the whole list at once.

use crate::{
    error::{Error, Result},
    schema::AuthConfig,
};

const FLOW_AUTHORIZATION_CODE: &str = "authorization_code";
const FLOW_CLIENT_CREDENTIALS: &str = "client_credentials";

/// Check structural requirements on a normalized config.
pub fn validate_config(config: &AuthConfig) -> Result<()> {
    let mut errors = Vec::new();

    if config.client_id.as_deref().is_none_or(str::is_empty) {
        errors.push(required("clientId"));
    }
    if config.flow == FLOW_CLIENT_CREDENTIALS
        && config.client_secret.as_deref().is_none_or(str::is_empty)
    {
        errors.push(required("clientSecret"));
    }
    if config.flow == FLOW_AUTHORIZATION_CODE && config.authorization_endpoint.is_empty() {
        errors.push(required("authorizationEndpoint"));
    }
    if config.token_endpoint.is_empty() {
        errors.push(required("tokenEndpoint"));
    }
    if config.flow.is_empty() {
        errors.push(required("flow"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(Error::Validation { errors })
    }
}

fn required(field: &str) -> String {
    format!("You have to add '{field}' property to the configuration.")
}
