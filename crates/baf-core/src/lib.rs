//! REST API fuzzing engine.
//!
//! Turns one declarative [`Test`](baf_types::Test) and its original JSON
//! payload into a deterministic sequence of dispatches against an endpoint,
//! and classifies every response by exact status-code match.
//!
//! # Architecture
//!
//! - [`url`]: builds the request URL from a server variable, prefix and endpoint
//! - [`fuzz`]: the mutation engine (removal, addition, change, mutate) and the
//!   random payload generator
//! - [`executor`]: dispatches one payload (or records a dry run) and classifies it
//! - [`runner`]: per-test control flow with configuration short-circuiting
//! - [`results`]: append-only log of classified outcomes
//!
//! Network access and environment lookup come in through the [`ApiClient`]
//! and [`Environment`] traits so the engine can be driven by spies in tests.

pub mod client;
pub mod env;
pub mod error;
pub mod executor;
pub mod fuzz;
pub mod results;
pub mod runner;
pub mod url;

pub use client::{ApiClient, ApiResponse};
pub use env::{Environment, MapEnvironment, ProcessEnvironment};
pub use error::ConfigurationError;
pub use executor::{RunConfig, TestExecutor};
pub use results::{ResultKind, ResultSummary, Results, TestResult};
pub use runner::{planned_dispatch_count, TestOutcome, TestRunner};
pub use url::construct_url;
