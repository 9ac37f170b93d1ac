//! PKCE (RFC 7636) verifier/challenge generation and the anti-CSRF state.

use {
    base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD},
    rand::Rng,
    sha2::{Digest, Sha256},
};

use crate::types::PkceChallenge;

/// Generate a fresh code verifier and its S256 challenge.
pub fn generate_pkce() -> PkceChallenge {
    let verifier = random_token();
    let challenge = URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes()));
    PkceChallenge { verifier, challenge }
}

/// Generate an unguessable `state` value.
pub fn generate_state() -> String {
    random_token()
}

/// 32 random bytes, base64url without padding (43 chars).
fn random_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
