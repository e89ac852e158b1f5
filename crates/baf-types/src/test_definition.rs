//! Test definitions: which endpoint to hit and which payload mutations to apply.

use std::convert::Infallible;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::serde_helpers::{lenient_u16, non_empty_string, yes_no};

/// HTTP method declared by a test.
///
/// Only [`HttpMethod::Post`] is dispatched by the executor. Every other method,
/// including ones not listed here, still loads so that one unusual test does
/// not make the whole definition file unreadable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
    /// Any other method, kept uppercased as written.
    Other(String),
}

impl HttpMethod {
    pub fn as_str(&self) -> &str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Other(method) => method,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let method = s.trim().to_uppercase();
        Ok(match method.as_str() {
            "GET" => HttpMethod::Get,
            "POST" => HttpMethod::Post,
            "PUT" => HttpMethod::Put,
            "PATCH" => HttpMethod::Patch,
            "DELETE" => HttpMethod::Delete,
            "HEAD" => HttpMethod::Head,
            "OPTIONS" => HttpMethod::Options,
            _ => HttpMethod::Other(method),
        })
    }
}

impl From<String> for HttpMethod {
    fn from(value: String) -> Self {
        match value.parse::<HttpMethod>() {
            Ok(method) => method,
            Err(never) => match never {},
        }
    }
}

impl From<HttpMethod> for String {
    fn from(method: HttpMethod) -> Self {
        method.as_str().to_string()
    }
}

/// One declarative API test.
///
/// Field names follow the column headings of the original test tables, so a
/// spreadsheet export converts 1:1 into YAML or JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Test {
    /// Optional human label; falls back to the endpoint in logs.
    #[serde(rename = "Name", default, deserialize_with = "non_empty_string")]
    pub name: Option<String>,

    /// Name of the environment variable holding the server base address.
    #[serde(rename = "Server")]
    pub server: String,

    #[serde(rename = "Prefix", default)]
    pub prefix: String,

    #[serde(rename = "Endpoint")]
    pub endpoint: String,

    #[serde(rename = "Method")]
    pub method: HttpMethod,

    #[serde(rename = "Expected status", deserialize_with = "lenient_u16")]
    pub expected_status: u16,

    #[serde(rename = "Add items", default, deserialize_with = "yes_no")]
    pub add_items: bool,

    #[serde(rename = "Remove items", default, deserialize_with = "yes_no")]
    pub remove_items: bool,

    #[serde(rename = "Change types", default, deserialize_with = "yes_no")]
    pub change_types: bool,

    #[serde(rename = "Mutate payload", default, deserialize_with = "yes_no")]
    pub mutate_payload: bool,

    /// Path to the original JSON payload.
    #[serde(rename = "Payload")]
    pub payload: PathBuf,

    #[serde(rename = "Fuzzer setting", default, deserialize_with = "non_empty_string")]
    pub fuzzer_setting: Option<String>,
}

impl Test {
    /// True when at least one mutation strategy is enabled.
    pub fn any_mutation_enabled(&self) -> bool {
        self.add_items || self.remove_items || self.change_types || self.mutate_payload
    }

    /// True when a strategy that requires an object-shaped payload is enabled.
    pub fn requires_object_payload(&self) -> bool {
        self.add_items || self.remove_items || self.change_types
    }

    /// Short label for logs and reports.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.endpoint)
    }
}
