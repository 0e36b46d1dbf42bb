use super::types::{ApiErrorResponse, GenerateContentRequest, GenerateContentResponse};
use crate::config::GeminiConfig;
use chatrelay_errors::{AppError, UpstreamError};
use secrecy::ExposeSecret;

pub struct GeminiClient {
    http_client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, AppError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            config,
        })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    pub async fn generate_reply(&self, message: &str) -> Result<String, UpstreamError> {
        let request = GenerateContentRequest::from_text(message);

        let response = self
            .http_client
            .post(self.config.endpoint())
            .query(&[("key", self.config.api_key.expose_secret())])
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        tracing::info!("Gemini API status code: {}", status.as_u16());
        tracing::debug!("Gemini API response: {}", body);

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorResponse>(&body)
                .map(|e| e.error.describe())
                .unwrap_or(body);
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let completion: GenerateContentResponse =
            serde_json::from_str(&body).map_err(|e| UpstreamError::Decode(e.to_string()))?;

        completion
            .first_text()
            .map(str::to_string)
            .ok_or(UpstreamError::ShapeMismatch)
    }
}

// The request URL carries the API key, so it is dropped before the error is
// rendered anywhere.
fn transport_error(e: reqwest::Error) -> UpstreamError {
    if e.is_timeout() {
        UpstreamError::Timeout
    } else {
        UpstreamError::Network(e.without_url().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const GENERATE_PATH: &str = "/v1/models/gemini-1.5-flash:generateContent";

    fn client_for(server: &MockServer) -> GeminiClient {
        GeminiClient::new(GeminiConfig::new("test-key").with_base_url(server.uri())).unwrap()
    }

    #[tokio::test]
    async fn test_generate_reply_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .and(query_param("key", "test-key"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({ "contents": [{ "parts": [{ "text": "hello" }] }] })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{ "content": { "parts": [{ "text": "Hi there" }] } }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let reply = client_for(&server).generate_reply("hello").await;
        assert_eq!(reply, Ok("Hi there".to_string()));
    }

    #[tokio::test]
    async fn test_configured_model_in_path() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/models/gemini-2.0-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{ "content": { "parts": [{ "text": "from 2.0" }] } }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GeminiClient::new(
            GeminiConfig::new("test-key")
                .with_base_url(server.uri())
                .with_model("gemini-2.0-flash"),
        )
        .unwrap();

        assert_eq!(client.model(), "gemini-2.0-flash");
        assert_eq!(client.generate_reply("hi").await, Ok("from 2.0".to_string()));
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": { "code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT" }
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).generate_reply("hello").await.unwrap_err();
        assert_eq!(
            err,
            UpstreamError::Status {
                status: 400,
                message: "INVALID_ARGUMENT: API key not valid.".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_non_success_status_plain_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream overloaded"))
            .mount(&server)
            .await;

        let err = client_for(&server).generate_reply("hello").await.unwrap_err();
        assert_eq!(
            err,
            UpstreamError::Status {
                status: 503,
                message: "upstream overloaded".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_invalid_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).generate_reply("hello").await.unwrap_err();
        assert!(matches!(err, UpstreamError::Decode(_)), "{err:?}");
    }

    #[tokio::test]
    async fn test_empty_candidates() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
            .mount(&server)
            .await;

        let err = client_for(&server).generate_reply("hello").await.unwrap_err();
        assert_eq!(err, UpstreamError::ShapeMismatch);
    }

    #[tokio::test]
    async fn test_null_content_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "candidates": [{ "content": null }] })),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).generate_reply("hello").await.unwrap_err();
        assert!(matches!(err, UpstreamError::Decode(_)), "{err:?}");
    }

    #[tokio::test]
    async fn test_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "candidates": [] }))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let client = GeminiClient::new(
            GeminiConfig::new("test-key")
                .with_base_url(server.uri())
                .with_timeout(Duration::from_millis(200)),
        )
        .unwrap();

        let err = client.generate_reply("hello").await.unwrap_err();
        assert_eq!(err, UpstreamError::Timeout);
    }

    #[tokio::test]
    async fn test_connection_refused_hides_key() {
        // Nothing listens on the discard port locally.
        let client = GeminiClient::new(
            GeminiConfig::new("test-key").with_base_url("http://127.0.0.1:9"),
        )
        .unwrap();

        let err = client.generate_reply("hello").await.unwrap_err();
        assert!(matches!(err, UpstreamError::Network(_)), "{err:?}");
        assert!(!err.to_string().contains("test-key"));
    }
}
