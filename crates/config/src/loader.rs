use std::{collections::HashMap, path::Path};

use tracing::debug;

use crate::{
    env_subst::substitute_env,
    error::{Error, Result},
    schema::{AuthConfig, RawAuthConfig},
};

/// Load the entry for `env` from the JSON config at `path` and normalize it.
///
/// The raw file text goes through `${ENV_VAR}` substitution before parsing.
pub fn load_auth_config(path: &Path, env: &str) -> Result<AuthConfig> {
    if !path.exists() {
        return Err(Error::NotFound { path: path.to_path_buf() });
    }

    let raw = std::fs::read_to_string(path)?;
    let raw = substitute_env(&raw);

    let mut environments: HashMap<String, RawAuthConfig> = serde_json::from_str(&raw)?;
    let Some(entry) = environments.remove(env) else {
        return Err(Error::EnvironmentNotFound {
            path: path.to_path_buf(),
            env: env.to_string(),
        });
    };

    debug!(path = %path.display(), env, "configuration entry loaded");
    Ok(AuthConfig::from_raw(entry))
}
