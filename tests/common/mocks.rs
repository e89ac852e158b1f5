//! Call-recording API client.

use std::cell::RefCell;

use anyhow::{anyhow, Result};
use baf::{ApiClient, ApiResponse};
use serde_json::Value;

/// One recorded `send_payload` call.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub url: String,
    pub payload: Value,
    pub access_token: Option<String>,
}

/// Answers every request with a fixed status, or fails them all with a
/// transport error, and records what it was asked to send.
pub struct SpyClient {
    status: Option<u16>,
    calls: RefCell<Vec<Call>>,
}

impl SpyClient {
    pub fn answering(status: u16) -> Self {
        Self {
            status: Some(status),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            status: None,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn payloads(&self) -> Vec<Value> {
        self.calls.borrow().iter().map(|c| c.payload.clone()).collect()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }
}

impl ApiClient for SpyClient {
    fn send_payload(
        &self,
        url: &str,
        payload: &Value,
        access_token: Option<&str>,
    ) -> Result<ApiResponse> {
        self.calls.borrow_mut().push(Call {
            url: url.to_string(),
            payload: payload.clone(),
            access_token: access_token.map(String::from),
        });
        self.status
            .map(ApiResponse::new)
            .ok_or_else(|| anyhow!("connection refused"))
    }
}
