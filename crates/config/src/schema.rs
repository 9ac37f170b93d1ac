use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Login-page autofill: CSS selectors plus the literal values to type.
///
/// Each autofill step only runs when both its selector and its value are
/// present, so partially filled entries are harmless.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoFill {
    #[serde(default)]
    pub email_selector: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password_selector: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub submit_selector: Option<String>,
}

/// One environment's entry exactly as it appears in the config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAuthConfig {
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,
    #[serde(default)]
    pub redirect_uri: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default)]
    pub authorization_endpoint: Option<String>,
    #[serde(default)]
    pub token_endpoint: Option<String>,
    #[serde(default)]
    pub audience: Option<String>,
    #[serde(default)]
    pub resource: Option<String>,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub flow: Option<String>,
    #[serde(default)]
    pub auto_fill: Option<AutoFill>,
    #[serde(default)]
    pub custom_script_path: Option<String>,
}

/// Normalized per-run OAuth client configuration. Immutable once built.
///
/// Serializes back to the file's camelCase shape; custom page scripts receive
/// it in that form.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthConfig {
    /// `None` when the field is absent from the file, so validation can tell
    /// "absent" from "blank".
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub redirect_uri: String,
    pub scope: String,
    pub authorization_endpoint: String,
    pub token_endpoint: String,
    pub audience: String,
    pub resource: String,
    pub origin: String,
    /// Kept as declared; vetted when the flow handler is selected.
    pub flow: String,
    pub auto_fill: Option<AutoFill>,
    pub custom_script_path: Option<PathBuf>,
}

impl AuthConfig {
    /// Build the normalized config from a parsed entry.
    ///
    /// A pure transform: every string field is trimmed, missing optionals
    /// become empty strings, and `client_id`/`client_secret` keep a `None`
    /// sentinel when absent.
    pub fn from_raw(raw: RawAuthConfig) -> Self {
        Self {
            client_id: raw.client_id.map(|v| v.trim().to_string()),
            client_secret: raw.client_secret.map(|v| v.trim().to_string()),
            redirect_uri: trim_or_empty(raw.redirect_uri),
            scope: trim_or_empty(raw.scope),
            authorization_endpoint: trim_or_empty(raw.authorization_endpoint),
            token_endpoint: trim_or_empty(raw.token_endpoint),
            audience: trim_or_empty(raw.audience),
            resource: trim_or_empty(raw.resource),
            origin: trim_or_empty(raw.origin),
            flow: trim_or_empty(raw.flow),
            auto_fill: raw.auto_fill.map(normalize_auto_fill),
            custom_script_path: raw
                .custom_script_path
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
        }
    }
}

fn trim_or_empty(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

fn normalize_auto_fill(fill: AutoFill) -> AutoFill {
    AutoFill {
        email_selector: trim_to_option(fill.email_selector),
        email: trim_to_option(fill.email),
        password_selector: trim_to_option(fill.password_selector),
        password: trim_to_option(fill.password),
        submit_selector: trim_to_option(fill.submit_selector),
    }
}

fn trim_to_option(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_trims_and_defaults() {
        let raw = RawAuthConfig {
            client_id: Some("  client ".into()),
            client_secret: None,
            redirect_uri: Some(" https://localhost/cb ".into()),
            scope: None,
            authorization_endpoint: None,
            token_endpoint: Some("https://login.example.com/token".into()),
            audience: None,
            resource: None,
            origin: None,
            flow: Some(" client_credentials ".into()),
            auto_fill: None,
            custom_script_path: Some("   ".into()),
        };

        let config = AuthConfig::from_raw(raw);
        assert_eq!(config.client_id.as_deref(), Some("client"));
        assert!(config.client_secret.is_none());
        assert_eq!(config.redirect_uri, "https://localhost/cb");
        assert_eq!(config.scope, "");
        assert_eq!(config.flow, "client_credentials");
        assert!(config.custom_script_path.is_none());
    }

    #[test]
    fn blank_client_secret_stays_distinct_from_absent() {
        let raw = RawAuthConfig {
            client_id: None,
            client_secret: Some("  ".into()),
            redirect_uri: None,
            scope: None,
            authorization_endpoint: None,
            token_endpoint: None,
            audience: None,
            resource: None,
            origin: None,
            flow: None,
            auto_fill: None,
            custom_script_path: None,
        };

        let config = AuthConfig::from_raw(raw);
        assert_eq!(config.client_secret.as_deref(), Some(""));
        assert!(config.client_id.is_none());
    }

    #[test]
    fn auto_fill_drops_blank_entries() {
        let fill = AutoFill {
            email_selector: Some("#email".into()),
            email: Some(" user@example.com ".into()),
            password_selector: Some("".into()),
            password: None,
            submit_selector: Some(" button[type=submit] ".into()),
        };

        let normalized = normalize_auto_fill(fill);
        assert_eq!(normalized.email.as_deref(), Some("user@example.com"));
        assert!(normalized.password_selector.is_none());
        assert_eq!(normalized.submit_selector.as_deref(), Some("button[type=submit]"));
    }
}
