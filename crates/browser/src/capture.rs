//! Authorization-redirect capture via CDP request interception.

use std::{sync::Arc, time::Duration};

use {
    chromiumoxide::{
        Browser, BrowserConfig, Page,
        cdp::browser_protocol::{
            fetch::{
                ContinueRequestParams, EnableParams, EventRequestPaused, FailRequestParams,
            },
            network::ErrorReason,
        },
        handler::viewport::Viewport,
    },
    futures::{Stream, StreamExt},
    tokio::sync::oneshot,
    tracing::{debug, info, warn},
    url::Url,
};

use {
    crate::{error::CaptureError, page_setup},
    keymint_config::AuthConfig,
};

/// Upper bound for the whole interactive session, CDP protocol included.
const SESSION_TIMEOUT_SECS: u64 = 600;

const VIEWPORT_WIDTH: u32 = 800;
const VIEWPORT_HEIGHT: u32 = 800;

/// Redirect captured from the authorization server, split into the bare
/// redirect URI and the raw query string carrying `code`/`state`.
#[derive(Debug, Clone)]
pub struct AuthorizationResponse {
    pub redirect_uri: String,
    pub query: String,
}

/// Navigate a headful browser to `auth_url` and wait for the authorization
/// server to redirect back with a `code` parameter.
///
/// The first outbound request whose URL carries `code` is captured and
/// aborted inside the browser; every other request proceeds untouched.
/// The browser is torn down whether the capture succeeds, fails, or times
/// out.
pub async fn capture_authorization_response(
    auth_url: &str,
    config: &AuthConfig,
) -> Result<AuthorizationResponse, CaptureError> {
    let (mut browser, mut handler) = Browser::launch(browser_config()?)
        .await
        .map_err(|e| CaptureError::LaunchFailed(e.to_string()))?;

    let handler_task = tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            debug!(?event, "browser event");
        }
    });

    let result = tokio::time::timeout(
        Duration::from_secs(SESSION_TIMEOUT_SECS),
        drive_session(&browser, auth_url, config),
    )
    .await
    .unwrap_or(Err(CaptureError::Timeout(SESSION_TIMEOUT_SECS)));

    // Scoped release: the session never outlives this function.
    if let Err(e) = browser.close().await {
        warn!(error = %e, "browser close failed");
    }
    if let Err(e) = browser.wait().await {
        debug!(error = %e, "browser process wait failed");
    }
    handler_task.abort();

    result
}

async fn drive_session(
    browser: &Browser,
    auth_url: &str,
    config: &AuthConfig,
) -> Result<AuthorizationResponse, CaptureError> {
    let page = browser
        .new_page("about:blank")
        .await
        .map_err(|e| CaptureError::LaunchFailed(e.to_string()))?;

    // Pause every outbound request before the first navigation, so the
    // redirect back to the client can never escape the browser.
    page.execute(EnableParams::default()).await?;
    let events = page.event_listener::<EventRequestPaused>().await?;
    let (capture_tx, capture_rx) = oneshot::channel();
    let interceptor = tokio::spawn(pump_paused_requests(page.clone(), events, capture_tx));

    info!(url = auth_url, "opening authorization page");
    page.goto(auth_url)
        .await
        .map_err(|e| CaptureError::NavigationFailed(e.to_string()))?;
    let _ = page.wait_for_navigation().await;

    page_setup::prepare(&page, config).await?;

    let response = capture_rx.await.map_err(|_| CaptureError::CaptureAborted);
    interceptor.abort();
    response
}

/// Resume every paused request except the first one that carries a `code`
/// query parameter; that one is recorded and aborted, completing the
/// capture channel exactly once.
async fn pump_paused_requests(
    page: Page,
    mut events: impl Stream<Item = Arc<EventRequestPaused>> + Unpin + Send + 'static,
    capture_tx: oneshot::Sender<AuthorizationResponse>,
) {
    let mut capture_tx = Some(capture_tx);

    while let Some(event) = events.next().await {
        let request_id = event.request_id.clone();

        if capture_tx.is_some()
            && let Some(response) = split_code_redirect(&event.request.url)
        {
            info!(redirect_uri = %response.redirect_uri, "authorization redirect intercepted");
            match FailRequestParams::builder()
                .request_id(request_id)
                .error_reason(ErrorReason::Aborted)
                .build()
            {
                Ok(abort) => {
                    if let Err(e) = page.execute(abort).await {
                        debug!(error = %e, "failed to abort captured request");
                    }
                },
                Err(e) => debug!(error = %e, "failed to build abort command"),
            }
            if let Some(tx) = capture_tx.take() {
                let _ = tx.send(response);
            }
            continue;
        }

        if let Err(e) = page.execute(ContinueRequestParams::new(request_id)).await {
            debug!(error = %e, "failed to resume paused request");
        }
    }
}

/// If `raw_url` carries a `code` query parameter, split it into the bare
/// redirect URI (query stripped) and the raw query string.
fn split_code_redirect(raw_url: &str) -> Option<AuthorizationResponse> {
    let mut url = Url::parse(raw_url).ok()?;
    if !url.query_pairs().any(|(name, _)| name == "code") {
        return None;
    }

    let query = url.query().unwrap_or_default().to_string();
    url.set_query(None);
    Some(AuthorizationResponse { redirect_uri: url.to_string(), query })
}

fn browser_config() -> Result<BrowserConfig, CaptureError> {
    BrowserConfig::builder()
        .with_head()
        .viewport(Viewport {
            width: VIEWPORT_WIDTH,
            height: VIEWPORT_HEIGHT,
            device_scale_factor: None,
            emulating_mobile: false,
            is_landscape: false,
            has_touch: false,
        })
        .arg(format!("--window-size={VIEWPORT_WIDTH},{VIEWPORT_HEIGHT}"))
        .request_timeout(Duration::from_secs(SESSION_TIMEOUT_SECS))
        .build()
        .map_err(CaptureError::LaunchFailed)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn split_ignores_urls_without_code() {
        assert!(split_code_redirect("https://app.example.com/cb?state=xyz").is_none());
        assert!(split_code_redirect("https://app.example.com/cb").is_none());
        assert!(split_code_redirect("not a url").is_none());
    }

    #[test]
    fn split_strips_query_from_redirect_uri() {
        let response =
            split_code_redirect("https://app.example.com/cb?code=abc&state=xyz").unwrap();
        assert_eq!(response.redirect_uri, "https://app.example.com/cb");
        assert_eq!(response.query, "code=abc&state=xyz");
    }

    #[test]
    fn split_requires_code_as_a_parameter_name() {
        // `code` appearing only inside a value must not trigger a capture.
        assert!(split_code_redirect("https://app.example.com/cb?next=code").is_none());
    }
}
