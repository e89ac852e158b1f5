//! HTTP transport for the fuzzing engine.
//!
//! [`HttpApiClient`] implements [`baf_core::ApiClient`] on top of a blocking
//! `ureq` agent. Every HTTP response, 2xx or not, is returned as an
//! [`ApiResponse`]; only transport failures surface as errors.

mod http;

pub use http::HttpApiClient;

pub use baf_core::{ApiClient, ApiResponse};
