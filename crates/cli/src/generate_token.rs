//! The `generate-token` command: options validation, config loading, flow
//! dispatch, and output.

use std::path::PathBuf;

use {
    anyhow::Result,
    clap::Args,
    secrecy::{ExposeSecret, Secret},
    tracing::debug,
};

use {
    keymint_config::{load_auth_config, validate_config},
    keymint_oauth::{FlowKind, TokenSet},
    keymint_output::{Destination, FileOutput, OutputKeys, print_access_token, resolve_destination},
};

/// Invocation parameters for `generate-token`. Read-only after parsing.
#[derive(Debug, Args)]
pub struct RunOptions {
    /// JSON config file mapping environment names to OAuth client entries.
    #[arg(long)]
    pub config_file_path: PathBuf,

    /// Environment key to read from the config file.
    #[arg(long)]
    pub env: String,

    /// Prefix the access token with "Bearer " before output.
    #[arg(long, default_value_t = false)]
    pub add_prefix_to_access_token: bool,

    /// Existing JSON file to write the tokens into.
    #[arg(long)]
    pub output_file_path: Option<PathBuf>,

    /// Dot-path for the access token, e.g. "'auth'.{env}.'accessToken'".
    #[arg(long)]
    pub output_file_access_token_key: Option<String>,

    /// Dot-path for the refresh token.
    #[arg(long)]
    pub output_file_refresh_token_key: Option<String>,

    /// Dot-path for the ID token.
    #[arg(long)]
    pub output_file_id_token_key: Option<String>,

    /// Write Windows (CRLF) line endings to the output file.
    #[arg(long, default_value_t = false)]
    pub output_file_win_new_line_char: bool,

    /// Skip reusing a refresh token stored in the output file.
    #[arg(long, default_value_t = false)]
    pub not_use_refresh_token: bool,
}

/// Run the whole token lifecycle for one invocation.
pub async fn run(options: &RunOptions) -> Result<()> {
    validate_options(options)?;

    let config = load_auth_config(&options.config_file_path, &options.env)?;
    validate_config(&config)?;

    let stored_refresh_token = stored_refresh_token(options);
    let flow = FlowKind::resolve(&config.flow)?;
    let mut tokens = flow.acquire(&config, stored_refresh_token.as_deref()).await?;

    if options.add_prefix_to_access_token {
        apply_bearer_prefix(&mut tokens);
    }

    write_output(options, &tokens)
}

/// Structural checks on the options. Collects every violation so the
/// operator sees the whole list in one composite error.
fn validate_options(options: &RunOptions) -> Result<()> {
    let mut errors = Vec::new();

    if !options.config_file_path.exists() {
        errors.push(format!(
            "Path from --config-file-path option doesn't exist (path = '{}').",
            options.config_file_path.display()
        ));
    }
    if options.env.trim().is_empty() {
        errors.push("--env option is required.".to_string());
    }
    if let Some(output_path) = &options.output_file_path {
        if !output_path.exists() {
            errors.push(format!(
                "Path from --output-file-path option doesn't exist (path = '{}').",
                output_path.display()
            ));
        }
        if options.output_file_access_token_key.as_deref().is_none_or(str::is_empty) {
            errors.push(
                "--output-file-access-token-key option is required when --output-file-path is set."
                    .to_string(),
            );
        }
        if options.output_file_refresh_token_key.as_deref().is_none_or(str::is_empty) {
            errors.push(
                "--output-file-refresh-token-key option is required when --output-file-path is set."
                    .to_string(),
            );
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        anyhow::bail!(
            "The given options are incorrect. Validation errors: '{}'.",
            errors.join(" ")
        )
    }
}

/// Best-effort read of a refresh token stored by a previous run.
fn stored_refresh_token(options: &RunOptions) -> Option<String> {
    if options.not_use_refresh_token {
        return None;
    }
    let output_path = options.output_file_path.as_ref()?;
    let key = options.output_file_refresh_token_key.as_deref()?;

    let token = FileOutput::new(output_path, &options.env, options.output_file_win_new_line_char)
        .stored_refresh_token(key);
    debug!(found = token.is_some(), "stored refresh token lookup");
    token
}

/// Rewrite the access token for direct use in an Authorization header.
/// Applied exactly once per run; rerunning against the same output file
/// prefixes whatever is acquired next, not the stored value.
fn apply_bearer_prefix(tokens: &mut TokenSet) {
    tokens.access_token =
        Secret::new(format!("Bearer {}", tokens.access_token.expose_secret()));
}

fn write_output(options: &RunOptions, tokens: &TokenSet) -> Result<()> {
    match resolve_destination(
        options.output_file_path.as_deref(),
        options.output_file_access_token_key.as_deref(),
    ) {
        Destination::File { path, access_token_key } => {
            let keys = OutputKeys {
                access_token: access_token_key.to_string(),
                refresh_token: options.output_file_refresh_token_key.clone(),
                id_token: options.output_file_id_token_key.clone(),
            };
            FileOutput::new(path, &options.env, options.output_file_win_new_line_char)
                .write(&keys, tokens)?;
        },
        Destination::Console => print_access_token(tokens),
    }
    Ok(())
}
