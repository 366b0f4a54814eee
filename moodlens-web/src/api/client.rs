//! `gloo-net` transport for the analysis service.

use futures::future::{self, Either};
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use moodlens::api::DEFAULT_TIMEOUT_SECS;
use moodlens::{RawResponse, ServiceClient, Session, Transport};

use crate::storage::{self, BrowserStorage};

pub type WebSession = Session<ServiceClient<GlooTransport>, BrowserStorage>;

/// `fetch`-based transport. A request still pending after the timeout is
/// reported as failed and its result ignored.
#[derive(Debug, Clone, Copy)]
pub struct GlooTransport {
    timeout_ms: u32,
}

impl GlooTransport {
    pub fn new(timeout_secs: u64) -> Self {
        let timeout_ms = timeout_secs.saturating_mul(1000).min(u32::MAX as u64) as u32;
        Self { timeout_ms }
    }
}

impl Default for GlooTransport {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT_SECS)
    }
}

async fn send(url: &str, body: String) -> Result<RawResponse, gloo_net::Error> {
    let response = Request::post(url)
        .header("Content-Type", "application/json")
        .header("Accept", "application/json")
        .body(body)?
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;
    Ok(RawResponse { status, body })
}

impl Transport for GlooTransport {
    async fn post_json(&self, url: &str, body: String) -> Result<RawResponse, String> {
        let request = Box::pin(send(url, body));
        let timeout = Box::pin(TimeoutFuture::new(self.timeout_ms));

        match future::select(request, timeout).await {
            Either::Left((result, _)) => result.map_err(|e| e.to_string()),
            Either::Right(_) => Err(format!("Request timed out after {} ms", self.timeout_ms)),
        }
    }
}

/// Session against `api_url` that records into `localStorage`.
pub fn open_session(api_url: &str) -> WebSession {
    let client = ServiceClient::new(api_url.trim(), GlooTransport::default());
    Session::new(client, BrowserStorage, storage::now_millis)
}
