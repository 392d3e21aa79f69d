//! HTTP transport for the CBC REST API

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::{debug, error, info};

use crate::config::ConsoleConfig;
use crate::transport::Transport;
use crate::types::MessageRequest;
use crate::{EcbeError, Result};

/// JSON-over-HTTP client for the CBC's `/api/ecbe/v1` endpoints
pub struct HttpTransport {
    /// Pooled reqwest client with JSON headers preset
    client: Client,

    /// Connection settings, used to build endpoint URLs
    config: ConsoleConfig,
}

impl HttpTransport {
    /// Create a new transport for the configured backend
    pub fn new(config: ConsoleConfig) -> Result<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| {
                EcbeError::transport_failed_with_source("could not build HTTP client", Box::new(e))
            })?;

        info!(endpoint = %config.endpoint(""), "HTTP transport ready");
        Ok(Self { client, config })
    }

    /// Get the transport configuration
    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    /// Send one request and pass the response body through
    async fn dispatch(
        &self,
        operation: &'static str,
        url: String,
        request: RequestBuilder,
    ) -> Result<Value> {
        debug!(operation, %url, "Sending request");

        let response = request.send().await.map_err(|e| {
            error!(operation, %url, error = %e, "Request to CBC failed");
            EcbeError::from(e)
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!(
                operation,
                %url,
                status = status.as_u16(),
                error = %e,
                "Failed to read response body"
            );
            EcbeError::from(e)
        })?;

        if !status.is_success() {
            error!(operation, %url, status = status.as_u16(), body = %body, "CBC rejected request");
            return Err(EcbeError::transport_status(status.as_u16(), body));
        }

        debug!(operation, status = status.as_u16(), bytes = body.len(), "Request completed");
        Ok(parse_body(&body))
    }
}

/// Empty bodies become `null`; bodies that are not JSON are kept as a JSON string.
pub(crate) fn parse_body(body: &str) -> Value {
    if body.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn post_message(&self, request: &MessageRequest) -> Result<Value> {
        let url = self.config.endpoint("/message");
        let builder = self.client.post(&url).json(request);
        self.dispatch("post_message", url, builder).await
    }

    async fn delete_message(&self, message_id: u16) -> Result<Value> {
        let url = self.config.endpoint(&format!("/message/{message_id}"));
        let builder = self.client.delete(&url);
        self.dispatch("delete_message", url, builder).await
    }

    async fn list_broadcasts(&self) -> Result<Value> {
        let url = self.config.endpoint("/broadcasts");
        let builder = self.client.get(&url);
        self.dispatch("list_broadcasts", url, builder).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bodies_pass_through() {
        assert_eq!(parse_body(""), Value::Null);
        assert_eq!(parse_body("  \n"), Value::Null);
        assert_eq!(parse_body(r#"{"id": 7}"#), serde_json::json!({"id": 7}));
        assert_eq!(parse_body("[1,2]"), serde_json::json!([1, 2]));
        assert_eq!(parse_body("created"), Value::String("created".to_string()));
    }

    #[test]
    fn rejects_invalid_config() {
        assert!(HttpTransport::new(ConsoleConfig::new("nope")).is_err());
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_transport_failure() {
        // discard port, nothing listens there
        let config = ConsoleConfig {
            connect_timeout_secs: 1,
            request_timeout_secs: 2,
            ..ConsoleConfig::new("http://127.0.0.1:9")
        };
        let transport = HttpTransport::new(config).unwrap();
        let err = transport.list_broadcasts().await.unwrap_err();
        assert!(matches!(err, EcbeError::Transport { .. }));
        assert!(!err.is_validation());
    }
}
