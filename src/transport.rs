//! Transport trait for the CBC REST API

use serde_json::Value;

use crate::Result;
use crate::types::MessageRequest;

/// Base path of the CBC's external CBS entity API.
pub const API_BASE_PATH: &str = "/api/ecbe/v1";

/// Trait for clients of the CBC REST API
///
/// Transports perform exactly one request per call and never retry. Response
/// bodies come back as parsed JSON without any schema applied; how a body that
/// is empty or not JSON is represented is up to the implementation.
///
/// Returns:
/// - `Ok(body)` - the backend answered with a 2xx status
/// - `Err(EcbeError::Transport { .. })` - the call failed or the status was not 2xx
#[async_trait::async_trait]
pub trait Transport: Send + Sync + 'static {
    /// `POST /message` with the request as JSON body
    async fn post_message(&self, request: &MessageRequest) -> Result<Value>;

    /// `DELETE /message/{message_id}`
    async fn delete_message(&self, message_id: u16) -> Result<Value>;

    /// `GET /broadcasts`
    async fn list_broadcasts(&self) -> Result<Value>;
}
