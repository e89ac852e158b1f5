#![allow(dead_code)]
//! Shared test utilities for integration tests.
//!
//! - `fixtures`: test definitions and payload files in a temp dir
//! - `mocks`: a call-recording `ApiClient` spy

pub mod fixtures;
pub mod mocks;

pub use fixtures::{post_test, Fixture};
pub use mocks::SpyClient;
