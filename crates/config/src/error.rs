use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("A configuration file (path = '{}') doesn't exist.", path.display())]
    NotFound { path: PathBuf },

    #[error(
        "A configuration file (path = '{}') doesn't contain the given environment ('{env}').",
        path.display()
    )]
    EnvironmentNotFound { path: PathBuf, env: String },

    /// Aggregate of every violation found; validation never stops at the
    /// first problem.
    #[error("The given configuration is incorrect. Validation errors: '{}'.", errors.join(" "))]
    Validation { errors: Vec<String> },

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
