use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The output document must already exist; this tool only mutates it.
    #[error("Output file doesn't exist (path = '{}').", path.display())]
    OutputFileMissing { path: PathBuf },

    #[error("failed to parse output file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
