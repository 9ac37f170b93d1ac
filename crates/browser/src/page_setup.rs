//! Pre-capture page preparation: user-supplied page scripts and credential
//! autofill.

use {
    chromiumoxide::Page,
    tracing::{debug, warn},
};

use {
    crate::error::CaptureError,
    keymint_config::{AuthConfig, AutoFill},
};

/// Run the configured custom script (if any), then autofill the login form.
pub(crate) async fn prepare(page: &Page, config: &AuthConfig) -> Result<(), CaptureError> {
    run_custom_script(page, config).await?;
    if let Some(fill) = &config.auto_fill {
        auto_fill(page, fill).await?;
    }
    Ok(())
}

/// Evaluate the configured script file in the live page.
///
/// The script text becomes the body of an async function that receives the
/// normalized config as its `config` argument, mirroring the file's
/// camelCase field names. A missing file is logged and skipped.
async fn run_custom_script(page: &Page, config: &AuthConfig) -> Result<(), CaptureError> {
    let Some(path) = &config.custom_script_path else {
        return Ok(());
    };
    if !path.exists() {
        warn!(path = %path.display(), "custom script not found, skipping");
        return Ok(());
    }

    let script = std::fs::read_to_string(path)
        .map_err(|e| CaptureError::ScriptFailed(format!("{}: {e}", path.display())))?;
    let config_json = serde_json::to_string(config)
        .map_err(|e| CaptureError::ScriptFailed(e.to_string()))?;
    let wrapped = format!("(async (config) => {{\n{script}\n}})({config_json})");

    page.evaluate(wrapped)
        .await
        .map_err(|e| CaptureError::ScriptFailed(e.to_string()))?;
    debug!(path = %path.display(), "custom script evaluated");
    Ok(())
}

/// Fill the provider's login form with the configured credentials.
///
/// Typing steps need both a selector and a value; the submit click needs
/// its selector. Anything not fully configured is skipped.
async fn auto_fill(page: &Page, fill: &AutoFill) -> Result<(), CaptureError> {
    type_into(page, fill.email_selector.as_deref(), fill.email.as_deref()).await?;
    type_into(page, fill.password_selector.as_deref(), fill.password.as_deref()).await?;

    if let Some(selector) = fill.submit_selector.as_deref() {
        page.find_element(selector)
            .await
            .map_err(|e| CaptureError::AutoFillFailed(format!("{selector}: {e}")))?
            .click()
            .await
            .map_err(|e| CaptureError::AutoFillFailed(format!("{selector}: {e}")))?;
        debug!(selector, "submit clicked");
    }

    Ok(())
}

async fn type_into(
    page: &Page,
    selector: Option<&str>,
    value: Option<&str>,
) -> Result<(), CaptureError> {
    let (Some(selector), Some(value)) = (selector, value) else {
        return Ok(());
    };

    page.find_element(selector)
        .await
        .map_err(|e| CaptureError::AutoFillFailed(format!("{selector}: {e}")))?
        .type_str(value)
        .await
        .map_err(|e| CaptureError::AutoFillFailed(format!("{selector}: {e}")))?;
    debug!(selector, "field filled");
    Ok(())
}
