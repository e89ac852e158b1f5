use std::time::Duration;

use anyhow::{anyhow, Result};
use serde_json::Value;
use tracing::debug;

use baf_core::{ApiClient, ApiResponse};
use baf_types::env_utils::env_var_or;

/// Blocking JSON-over-HTTP client.
#[derive(Clone)]
pub struct HttpApiClient {
    agent: ureq::Agent,
}

impl HttpApiClient {
    /// Default request timeout in seconds (can be overridden by env).
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
    /// Default connect timeout in seconds (can be overridden by env).
    pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

    fn default_timeouts() -> (Duration, Duration) {
        let timeout_secs = env_var_or("BAF_HTTP_TIMEOUT_SECS", Self::DEFAULT_TIMEOUT_SECS);
        let connect_secs =
            env_var_or("BAF_HTTP_CONNECT_TIMEOUT_SECS", Self::DEFAULT_CONNECT_TIMEOUT_SECS);
        (
            Duration::from_secs(timeout_secs),
            Duration::from_secs(connect_secs),
        )
    }

    fn build_agent(timeout: Duration, connect_timeout: Duration) -> ureq::Agent {
        ureq::AgentBuilder::new()
            .timeout(timeout)
            .timeout_connect(connect_timeout)
            .build()
    }

    /// Create a client with timeouts from `BAF_HTTP_TIMEOUT_SECS` and
    /// `BAF_HTTP_CONNECT_TIMEOUT_SECS`.
    pub fn new() -> Self {
        let (timeout, connect_timeout) = Self::default_timeouts();
        Self::with_timeouts(timeout, connect_timeout)
    }

    /// Create a client with explicit timeouts.
    pub fn with_timeouts(timeout: Duration, connect_timeout: Duration) -> Self {
        Self {
            agent: Self::build_agent(timeout, connect_timeout),
        }
    }
}

impl Default for HttpApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient for HttpApiClient {
    fn send_payload(
        &self,
        url: &str,
        payload: &Value,
        access_token: Option<&str>,
    ) -> Result<ApiResponse> {
        let body = serde_json::to_string(payload)
            .map_err(|e| anyhow!("Failed to serialize payload: {}", e))?;

        let mut request = self
            .agent
            .post(url)
            .set("Content-Type", "application/json");
        if let Some(token) = access_token {
            request = request.set("Authorization", &format!("Bearer {}", token));
        }

        let response = match request.send_string(&body) {
            Ok(response) => response,
            // ureq reports 4xx/5xx as errors; for fuzzing they are ordinary answers.
            Err(ureq::Error::Status(_, response)) => response,
            Err(ureq::Error::Transport(e)) => {
                return Err(anyhow!("HTTP request to {} failed: {}", url, e));
            }
        };

        let status_code = response.status();
        let body = response.into_string().ok();
        debug!(
            status_code,
            body_len = body.as_ref().map_or(0, |b| b.len()),
            "Received response"
        );
        Ok(ApiResponse { status_code, body })
    }
}
