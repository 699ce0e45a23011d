//! HTTP client for the analysis service.
//!
//! Sends `POST /analyze` with a JSON body of `{ "command": ... }` or
//! `{ "code": ... }` and decodes the response leniently.

use async_trait::async_trait;
use lexa_core::{AnalysisRequest, RawAnalysis};
use std::time::Duration;
use tracing::debug;

use crate::error::{ClientError, ClientResult};
use crate::service::AnalysisService;

/// Default analysis service URL.
pub const DEFAULT_SERVICE_URL: &str = "http://localhost:8080";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Path of the analysis endpoint.
pub const ANALYZE_PATH: &str = "/analyze";

/// Connection settings for [`HttpAnalyzer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SERVICE_URL, DEFAULT_TIMEOUT_SECS)
    }
}

impl ClientConfig {
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(timeout_secs.max(1)),
        }
    }

    /// Full URL of the analysis endpoint.
    ///
    /// A base URL that already points at the endpoint is used as is.
    pub fn endpoint(&self) -> String {
        if self.base_url.ends_with(ANALYZE_PATH) {
            self.base_url.clone()
        } else {
            format!("{}{}", self.base_url, ANALYZE_PATH)
        }
    }
}

/// Analysis service client over HTTP.
#[derive(Clone)]
pub struct HttpAnalyzer {
    config: ClientConfig,
    client: reqwest::Client,
}

impl HttpAnalyzer {
    pub fn new(config: ClientConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_default();

        debug!(endpoint = %config.endpoint(), timeout_secs = config.timeout.as_secs(), "HttpAnalyzer initialized");

        Self { config, client }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Check whether the service answers at all.
    ///
    /// Sends a CORS preflight to the endpoint; any HTTP response counts.
    pub async fn health_check(&self) -> bool {
        let url = self.config.endpoint();
        match self
            .client
            .request(reqwest::Method::OPTIONS, &url)
            .send()
            .await
        {
            Ok(resp) => {
                debug!(url = %url, status = %resp.status(), "Analysis service reachable");
                true
            }
            Err(e) => {
                debug!(url = %url, error = %e, "Analysis service unreachable");
                false
            }
        }
    }

    fn transport_error(&self, url: &str, error: reqwest::Error) -> ClientError {
        if error.is_timeout() {
            ClientError::Timeout {
                seconds: self.config.timeout.as_secs(),
            }
        } else {
            ClientError::Transport {
                url: url.to_string(),
                source: error,
            }
        }
    }
}

#[async_trait]
impl AnalysisService for HttpAnalyzer {
    async fn analyze(&self, request: &AnalysisRequest) -> ClientResult<RawAnalysis> {
        let url = self.config.endpoint();
        debug!(url = %url, field = request.field().as_str(), bytes = request.text().len(), "Sending analysis request");

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| self.transport_error(&url, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(&url, e))?;

        if !status.is_success() {
            return Err(ClientError::Server { status, body });
        }

        let raw = RawAnalysis::from_json(&body).map_err(|e| ClientError::Decode(e.to_string()))?;

        debug!(
            status = ?raw.status,
            tokens = raw.tokens.len(),
            "Received analysis result"
        );

        Ok(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexa_core::{RequestField, Token};
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn analyzer(base_url: &str, timeout_secs: u64) -> HttpAnalyzer {
        HttpAnalyzer::new(ClientConfig::new(base_url, timeout_secs))
    }

    fn command(text: &str) -> AnalysisRequest {
        AnalysisRequest::new(RequestField::Command, text).unwrap()
    }

    #[test]
    fn test_endpoint_resolution() {
        assert_eq!(
            ClientConfig::new("http://localhost:8080/", 5).endpoint(),
            "http://localhost:8080/analyze"
        );
        assert_eq!(
            ClientConfig::new("http://localhost:8080/analyze", 5).endpoint(),
            "http://localhost:8080/analyze"
        );
        assert_eq!(ClientConfig::new("http://x", 0).timeout, Duration::from_secs(1));
        assert_eq!(ClientConfig::default().base_url, DEFAULT_SERVICE_URL);
    }

    #[tokio::test]
    async fn test_analyze_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/analyze"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({"command": "git commit -m \"feat\""})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "Correcto",
                "message": "Comando `git commit` válido.",
                "tokens": [
                    {"type": 1, "value": "git"},
                    {"type": 1, "value": "commit"},
                    {"type": 2, "value": "-m"},
                    {"type": 3, "value": "feat"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let raw = analyzer(&server.uri(), 5)
            .analyze(&command("  git commit -m \"feat\"  "))
            .await
            .unwrap();

        assert_eq!(raw.status.as_deref(), Some("Correcto"));
        assert_eq!(raw.tokens.len(), 4);
        assert_eq!(raw.tokens[2], Token::coded("-m", 2));
    }

    #[tokio::test]
    async fn test_code_request_field() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/analyze"))
            .and(body_json(json!({"code": "int x = 1;"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"tokens": []})))
            .expect(1)
            .mount(&server)
            .await;

        let request = AnalysisRequest::new(RequestField::Code, "int x = 1;").unwrap();
        let raw = analyzer(&server.uri(), 5).analyze(&request).await.unwrap();
        assert!(raw.tokens.is_empty());
    }

    #[tokio::test]
    async fn test_non_success_status_surfaces_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/analyze"))
            .respond_with(ResponseTemplate::new(400).set_body_string("Cuerpo de la petición inválido"))
            .mount(&server)
            .await;

        let err = analyzer(&server.uri(), 5)
            .analyze(&command("git status"))
            .await
            .unwrap_err();

        match &err {
            ClientError::Server { status, body } => {
                assert_eq!(status.as_u16(), 400);
                assert_eq!(body, "Cuerpo de la petición inválido");
            }
            other => panic!("expected server error, got {:?}", other),
        }
        assert!(err.user_message().contains("400"));
    }

    #[tokio::test]
    async fn test_non_json_body_is_decode_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/analyze"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = analyzer(&server.uri(), 5)
            .analyze(&command("git status"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[tokio::test]
    async fn test_timeout() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/analyze"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"status": "Correcto"}))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let err = analyzer(&server.uri(), 1)
            .analyze(&command("git status"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Timeout { seconds: 1 }));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport() {
        let err = analyzer("http://127.0.0.1:1", 2)
            .analyze(&command("git status"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Transport { .. }));
        assert!(err.user_message().contains("127.0.0.1:1"));
    }

    #[tokio::test]
    async fn test_health_check() {
        let server = MockServer::start().await;
        assert!(analyzer(&server.uri(), 2).health_check().await);
        assert!(!analyzer("http://127.0.0.1:1", 2).health_check().await);
    }
}
