//! Contract for the remote analysis service and the shared request logic.
//!
//! Front ends only provide a [`Transport`] (a way to POST a JSON body); the
//! endpoint table, error mapping and response decoding live here so the
//! browser and terminal clients behave the same.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{AnalysisError, Result};
use crate::schema::{Validate, decode};
use crate::types::{
    AspectAnalysisResponse, BulkAnalysisResponse, EmotionResponse, SentimentResponse, UrlContent,
};

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Upper bound on a single request before it is abandoned.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// The five remote operations.
#[allow(async_fn_in_trait)]
pub trait AnalysisApi {
    async fn analyze_sentiment(&self, text: &str) -> Result<SentimentResponse>;
    async fn analyze_emotion(&self, text: &str) -> Result<EmotionResponse>;
    async fn analyze_aspects(&self, text: &str) -> Result<AspectAnalysisResponse>;
    async fn analyze_bulk(&self, texts: &[String]) -> Result<BulkAnalysisResponse>;
    async fn fetch_url(&self, url: &str) -> Result<UrlContent>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Sentiment,
    Emotion,
    Aspects,
    Bulk,
    FetchUrl,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Sentiment => "/analysis/sentiment",
            Endpoint::Emotion => "/analysis/emotion",
            Endpoint::Aspects => "/analysis/aspects",
            Endpoint::Bulk => "/analysis/bulk",
            Endpoint::FetchUrl => "/fetch-url",
        }
    }

    /// Message used when the service gives no usable `detail`.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Endpoint::Sentiment => "Failed to analyze sentiment",
            Endpoint::Emotion => "Failed to analyze emotion",
            Endpoint::Aspects => "Failed to analyze aspects",
            Endpoint::Bulk => "Failed to analyze bulk",
            Endpoint::FetchUrl => "Failed to fetch URL",
        }
    }

    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TextRequest<'a> {
    pub text: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct BulkRequest<'a> {
    pub texts: &'a [String],
}

#[derive(Debug, Clone, Serialize)]
pub struct UrlRequest<'a> {
    pub url: &'a str,
}

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Minimal HTTP capability a front end has to supply.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// POST `body` as JSON. `Err` means no response was obtained at all
    /// (network failure, timeout); the string is the cause, for logging.
    async fn post_json(&self, url: &str, body: String) -> std::result::Result<RawResponse, String>;
}

/// Build the error for a non-success response.
///
/// Uses the service's `detail` field when it is a non-empty string, otherwise
/// the endpoint's fallback message.
pub fn failure_from_body(endpoint: Endpoint, body: &str) -> AnalysisError {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string))
        .filter(|d| !d.trim().is_empty());

    AnalysisError::Request(detail.unwrap_or_else(|| endpoint.failure_message().to_string()))
}

/// [`AnalysisApi`] over any [`Transport`].
#[derive(Debug, Clone)]
pub struct ServiceClient<T> {
    base_url: String,
    transport: T,
}

impl<T: Transport> ServiceClient<T> {
    pub fn new(base_url: impl Into<String>, transport: T) -> Self {
        Self {
            base_url: base_url.into(),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn call<B, R>(&self, endpoint: Endpoint, request: &B) -> Result<R>
    where
        B: Serialize,
        R: DeserializeOwned + Validate,
    {
        let url = endpoint.url(&self.base_url);
        let body = serde_json::to_string(request)
            .map_err(|e| AnalysisError::request(format!("Failed to serialize request: {}", e)))?;

        debug!(%url, "Sending analysis request");

        let response = self.transport.post_json(&url, body).await.map_err(|cause| {
            warn!(%url, %cause, "Analysis request failed before a response arrived");
            AnalysisError::request(endpoint.failure_message())
        })?;

        if !response.is_success() {
            warn!(%url, status = response.status, "Analysis service returned an error");
            return Err(failure_from_body(endpoint, &response.body));
        }

        decode(&response.body).inspect_err(|e| {
            warn!(%url, error = %e, "Analysis response failed validation");
        })
    }
}

impl<T: Transport> AnalysisApi for ServiceClient<T> {
    async fn analyze_sentiment(&self, text: &str) -> Result<SentimentResponse> {
        self.call(Endpoint::Sentiment, &TextRequest { text }).await
    }

    async fn analyze_emotion(&self, text: &str) -> Result<EmotionResponse> {
        self.call(Endpoint::Emotion, &TextRequest { text }).await
    }

    async fn analyze_aspects(&self, text: &str) -> Result<AspectAnalysisResponse> {
        self.call(Endpoint::Aspects, &TextRequest { text }).await
    }

    async fn analyze_bulk(&self, texts: &[String]) -> Result<BulkAnalysisResponse> {
        self.call(Endpoint::Bulk, &BulkRequest { texts }).await
    }

    async fn fetch_url(&self, url: &str) -> Result<UrlContent> {
        self.call(Endpoint::FetchUrl, &UrlRequest { url }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use std::cell::RefCell;

    /// Transport returning one canned outcome and recording what was sent.
    struct CannedTransport {
        outcome: std::result::Result<RawResponse, String>,
        sent: RefCell<Vec<(String, String)>>,
    }

    impl CannedTransport {
        fn respond(status: u16, body: &str) -> Self {
            Self {
                outcome: Ok(RawResponse {
                    status,
                    body: body.to_string(),
                }),
                sent: RefCell::new(Vec::new()),
            }
        }

        fn unreachable() -> Self {
            Self {
                outcome: Err("connection refused".to_string()),
                sent: RefCell::new(Vec::new()),
            }
        }
    }

    impl Transport for &CannedTransport {
        async fn post_json(&self, url: &str, body: String) -> std::result::Result<RawResponse, String> {
            self.sent.borrow_mut().push((url.to_string(), body));
            self.outcome.clone()
        }
    }

    #[test]
    fn test_endpoint_urls() {
        assert_eq!(
            Endpoint::Sentiment.url("http://localhost:8000/api/"),
            "http://localhost:8000/api/analysis/sentiment"
        );
        assert_eq!(Endpoint::FetchUrl.url("http://x"), "http://x/fetch-url");
    }

    #[test]
    fn test_sentiment_request_body() {
        let transport = CannedTransport::respond(
            200,
            r#"{"sentiment":"neutral","scores":{"positive":0.1,"neutral":0.8,"negative":0.1}}"#,
        );
        let client = ServiceClient::new("http://svc/api", &transport);

        let result = block_on(client.analyze_sentiment("hello")).unwrap();
        assert_eq!(result.confidence(), 0.8);

        let sent = transport.sent.borrow();
        assert_eq!(sent[0].0, "http://svc/api/analysis/sentiment");
        assert_eq!(sent[0].1, r#"{"text":"hello"}"#);
    }

    #[test]
    fn test_bulk_request_body() {
        let transport = CannedTransport::respond(200, r#"{"results":[],"total":2,"successful":0,"failed":2}"#);
        let client = ServiceClient::new("http://svc/api", &transport);

        let texts = vec!["a".to_string(), "b".to_string()];
        block_on(client.analyze_bulk(&texts)).unwrap();
        assert_eq!(transport.sent.borrow()[0].1, r#"{"texts":["a","b"]}"#);
    }

    #[test]
    fn test_server_detail_is_reported() {
        let transport = CannedTransport::respond(429, r#"{"detail":"Rate limit exceeded"}"#);
        let client = ServiceClient::new("http://svc/api", &transport);

        let err = block_on(client.analyze_emotion("hi")).unwrap_err();
        assert_eq!(err, AnalysisError::Request("Rate limit exceeded".to_string()));
    }

    #[test]
    fn test_fallback_message_without_detail() {
        // FastAPI validation errors carry a list, not a string
        let transport = CannedTransport::respond(422, r#"{"detail":[{"msg":"field required"}]}"#);
        let client = ServiceClient::new("http://svc/api", &transport);

        let err = block_on(client.analyze_aspects("hi")).unwrap_err();
        assert_eq!(err.to_string(), "Failed to analyze aspects");
    }

    #[test]
    fn test_transport_failure_uses_fallback() {
        let transport = CannedTransport::unreachable();
        let client = ServiceClient::new("http://svc/api", &transport);

        let err = block_on(client.fetch_url("https://example.com")).unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch URL");
    }

    #[test]
    fn test_malformed_success_body() {
        let transport = CannedTransport::respond(200, "<html>oops</html>");
        let client = ServiceClient::new("http://svc/api", &transport);

        let err = block_on(client.analyze_sentiment("hi")).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidResponse(_)));
    }
}
