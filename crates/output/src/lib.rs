//! Token output: the quoted dot-path JSON codec plus the console and file
//! destinations.

pub mod console;
pub mod error;
pub mod file;
pub mod path;

use std::path::Path;

pub use {
    console::print_access_token,
    error::{Error, Result},
    file::{FileOutput, OutputKeys},
};

/// Where the tokens should land, given the caller's options.
#[derive(Debug)]
pub enum Destination<'a> {
    File { path: &'a Path, access_token_key: &'a str },
    Console,
}

/// File output needs both a destination file and an access-token path;
/// anything less falls back to the console.
pub fn resolve_destination<'a>(
    output_file_path: Option<&'a Path>,
    access_token_key: Option<&'a str>,
) -> Destination<'a> {
    match (output_file_path, access_token_key) {
        (Some(path), Some(key)) if !key.is_empty() => {
            Destination::File { path, access_token_key: key }
        },
        _ => Destination::Console,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_destination_needs_both_path_and_key() {
        let path = Path::new("/tmp/out.json");
        assert!(matches!(
            resolve_destination(Some(path), Some("'a'")),
            Destination::File { .. }
        ));
        assert!(matches!(resolve_destination(Some(path), None), Destination::Console));
        assert!(matches!(resolve_destination(Some(path), Some("")), Destination::Console));
        assert!(matches!(resolve_destination(None, Some("'a'")), Destination::Console));
    }
}
