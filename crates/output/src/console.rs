//! Console destination: prints the access token for copy/paste use.

use {keymint_oauth::TokenSet, secrecy::ExposeSecret};

/// Print the final access token to stdout.
pub fn print_access_token(tokens: &TokenSet) {
    println!("{}", tokens.access_token.expose_secret());
}
