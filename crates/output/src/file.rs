//! File destination: merges tokens into an existing JSON document through
//! the dot-path codec.

use std::path::PathBuf;

use {
    secrecy::ExposeSecret,
    serde_json::Value,
    tracing::{debug, info},
};

use {
    crate::{
        error::{Error, Result},
        path as token_path,
    },
    keymint_oauth::TokenSet,
};

/// Dot-path expressions for each persisted token.
#[derive(Debug, Clone)]
pub struct OutputKeys {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub id_token: Option<String>,
}

/// Writes tokens into a pre-existing JSON file, preserving everything else
/// in the document.
#[derive(Debug, Clone)]
pub struct FileOutput {
    path: PathBuf,
    env: String,
    windows_newlines: bool,
}

impl FileOutput {
    pub fn new(path: impl Into<PathBuf>, env: impl Into<String>, windows_newlines: bool) -> Self {
        Self { path: path.into(), env: env.into(), windows_newlines }
    }

    /// Read a refresh token stored by a previous run.
    ///
    /// A missing file, unparsable document, or absent key all degrade to
    /// `None`; refresh reuse is best-effort by design.
    pub fn stored_refresh_token(&self, refresh_token_key: &str) -> Option<String> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        let mut doc: Value = serde_json::from_str(&raw).ok()?;
        let token = token_path::read_value(&mut doc, refresh_token_key, &self.env);
        match &token {
            Some(_) => debug!(path = %self.path.display(), "stored refresh token found"),
            None => debug!(path = %self.path.display(), "no stored refresh token"),
        }
        token
    }

    /// Merge the token set into the output document and rewrite it in place.
    pub fn write(&self, keys: &OutputKeys, tokens: &TokenSet) -> Result<()> {
        if !self.path.exists() {
            return Err(Error::OutputFileMissing { path: self.path.clone() });
        }

        let raw = std::fs::read_to_string(&self.path)?;
        let mut doc: Value = serde_json::from_str(&raw)?;

        token_path::write_value(
            &mut doc,
            Some(&keys.access_token),
            &self.env,
            Some(tokens.access_token.expose_secret()),
        );
        token_path::write_value(
            &mut doc,
            keys.refresh_token.as_deref(),
            &self.env,
            tokens.refresh_token.as_ref().map(|t| t.expose_secret().as_str()),
        );
        token_path::write_value(
            &mut doc,
            keys.id_token.as_deref(),
            &self.env,
            tokens.id_token.as_ref().map(|t| t.expose_secret().as_str()),
        );

        std::fs::write(&self.path, token_path::render(&doc, self.windows_newlines))?;
        info!(path = %self.path.display(), "tokens written");
        Ok(())
    }
}
