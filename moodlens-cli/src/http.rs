//! `reqwest` transport for the analysis service.

use moodlens::{RawResponse, Transport};
use reqwest::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Transport whose requests are abandoned after `timeout`.
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("moodlens/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    async fn post_json(&self, url: &str, body: String) -> Result<RawResponse, String> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| if e.is_timeout() { format!("timed out: {}", e) } else { e.to_string() })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| e.to_string())?;
        debug!(status, bytes = body.len(), "Received response");

        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moodlens::{AnalysisApi, AnalysisError, Sentiment, ServiceClient};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, timeout: Duration) -> ServiceClient<ReqwestTransport> {
        let transport = ReqwestTransport::new(timeout).unwrap();
        ServiceClient::new(format!("{}/api", server.uri()), transport)
    }

    #[tokio::test]
    async fn test_sentiment_roundtrip() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/analysis/sentiment"))
            .and(body_json(json!({"text": "I love this product!"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "sentiment": "positive",
                "scores": {"positive": 0.95, "neutral": 0.02, "negative": 0.03}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, Duration::from_secs(5));
        let result = client.analyze_sentiment("I love this product!").await.unwrap();

        assert_eq!(result.sentiment, Sentiment::Positive);
        assert_eq!(moodlens::display::percent(result.confidence(), 1), "95.0%");
    }

    #[tokio::test]
    async fn test_error_detail_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/analysis/bulk"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({"detail": "Maximum 50 texts allowed"})))
            .mount(&server)
            .await;

        let client = client_for(&server, Duration::from_secs(5));
        let err = client.analyze_bulk(&["a".to_string()]).await.unwrap_err();
        assert_eq!(err, AnalysisError::Request("Maximum 50 texts allowed".to_string()));
    }

    #[tokio::test]
    async fn test_server_error_without_detail() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/analysis/emotion"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&server)
            .await;

        let client = client_for(&server, Duration::from_secs(5));
        let err = client.analyze_emotion("hello").await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to analyze emotion");
    }

    #[tokio::test]
    async fn test_timeout_reports_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/fetch-url"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_millis(500))
                    .set_body_json(json!({"url": "https://a.b", "text": "hello world!", "length": 12})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server, Duration::from_millis(50));
        let err = client.fetch_url("https://a.b").await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch URL");
    }

    #[tokio::test]
    async fn test_unreachable_service() {
        // Nothing listens on the discard port
        let transport = ReqwestTransport::new(Duration::from_secs(2)).unwrap();
        let client = ServiceClient::new("http://127.0.0.1:9/api", transport);

        let err = client.analyze_aspects("battery life").await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to analyze aspects");
    }
}
