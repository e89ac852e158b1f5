//! The network seam: how a payload reaches the endpoint under test.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response data the executor needs to classify a dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status_code: u16,
    /// Response body, when the client captured one.
    pub body: Option<String>,
}

impl ApiResponse {
    pub fn new(status_code: u16) -> Self {
        Self {
            status_code,
            body: None,
        }
    }
}

/// Sends payloads to a REST endpoint.
///
/// Implementations return `Ok` for every HTTP response, whatever its status;
/// `Err` is reserved for transport failures (DNS, connect, timeout, I/O).
pub trait ApiClient {
    fn send_payload(
        &self,
        url: &str,
        payload: &Value,
        access_token: Option<&str>,
    ) -> Result<ApiResponse>;
}
