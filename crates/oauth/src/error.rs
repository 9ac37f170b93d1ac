use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The config names a flow this tool doesn't implement.
    #[error("An unexpected auth flow: '{0}'.")]
    UnsupportedFlow(String),

    /// The authorization server answered the interactive step with a
    /// protocol-level error code.
    #[error("OAuth 2.0 Error: '{0}'.")]
    Authorization(String),

    #[error("state in the authorization response doesn't match the request")]
    StateMismatch,

    #[error("authorization response doesn't carry a code parameter")]
    MissingCode,

    /// The token endpoint answered without an access token; carries the raw
    /// body for diagnostics.
    #[error("OAuth 2.0 Error: Unrecognized response from a token endpoint '{body}'.")]
    TokenEndpoint { body: String },

    #[error("invalid endpoint URL: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Capture(#[from] keymint_browser::CaptureError),
}

pub type Result<T> = std::result::Result<T, Error>;
