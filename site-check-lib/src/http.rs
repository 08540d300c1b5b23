//! Built-in HTTP probe.
//!
//! Issues a HEAD request first (cheap, no body) and falls back to GET when the
//! server rejects HEAD, then classifies the response: 2xx/3xx means up,
//! 4xx/5xx means down, and transport failures (timeout, connect, DNS) leave
//! the status undetermined.

use crate::error::SiteCheckError;
use crate::probe::Probe;
use crate::types::{ProbeMethod, ProbeOutcome};
use futures::future::BoxFuture;
use reqwest::StatusCode;
use std::time::Duration;

/// HEAD is allowed to be rejected with these codes before we retry with GET.
const HEAD_FALLBACK_CODES: &[u16] = &[403, 405, 501];

/// HTTP probe backed by a pooled `reqwest` client.
#[derive(Clone)]
pub struct HttpProbe {
    client: reqwest::Client,
    head_first: bool,
}

impl HttpProbe {
    /// Create a probe with default settings (5s timeout, 5 redirects, HEAD first).
    pub fn new() -> Result<Self, SiteCheckError> {
        Self::with_config(Duration::from_secs(5), 5, true)
    }

    /// Create a probe with custom timeout, redirect limit, and HEAD behavior.
    pub fn with_config(
        timeout: Duration,
        redirect_limit: usize,
        head_first: bool,
    ) -> Result<Self, SiteCheckError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(redirect_limit))
            .user_agent(concat!("site-check/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| SiteCheckError::internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, head_first })
    }

    async fn check(&self, url: &str) -> ProbeOutcome {
        if self.head_first {
            match self.client.head(url).send().await {
                Ok(response) => {
                    let code = response.status().as_u16();
                    if !HEAD_FALLBACK_CODES.contains(&code) {
                        return classify_status(response.status(), ProbeMethod::Head);
                    }
                    tracing::debug!(url = %url, code, "HEAD rejected, retrying with GET");
                }
                Err(e) => return classify_transport_error(&e, ProbeMethod::Head),
            }
        }

        match self.client.get(url).send().await {
            Ok(response) => classify_status(response.status(), ProbeMethod::Get),
            Err(e) => classify_transport_error(&e, ProbeMethod::Get),
        }
    }
}

impl Probe for HttpProbe {
    fn probe<'a>(&'a self, url: &'a str) -> BoxFuture<'a, ProbeOutcome> {
        Box::pin(self.check(url))
    }
}

/// Map an HTTP status code to a probe outcome.
///
/// Redirect statuses only surface here once the redirect limit is exhausted
/// or the server omits a Location header; a reachable endpoint behind a
/// short redirect chain resolves to its final status instead.
fn classify_status(status: StatusCode, method: ProbeMethod) -> ProbeOutcome {
    let code = status.as_u16();
    let detail = format!("HTTP {}", code);

    if status.is_success() || status.is_redirection() {
        ProbeOutcome::up().with_code(code).via(method).with_detail(detail)
    } else {
        ProbeOutcome::down().with_code(code).via(method).with_detail(detail)
    }
}

/// Map a transport-level failure to an undetermined outcome with a reason.
fn classify_transport_error(error: &reqwest::Error, method: ProbeMethod) -> ProbeOutcome {
    let text = error.to_string();

    let reason = if error.is_timeout() {
        "request timed out".to_string()
    } else if error.is_redirect() {
        "too many redirects".to_string()
    } else if error.is_connect() {
        if text.contains("dns") {
            "could not resolve hostname".to_string()
        } else {
            "connection failed".to_string()
        }
    } else {
        text
    };

    ProbeOutcome::undetermined(reason).via(method)
}
