//! baf - blind API fuzzer.
//!
//! Loads declarative endpoint tests and fuzzer settings from YAML or JSON
//! files, runs them through the [`baf_core`] engine and renders the results.
//! The `baf` binary is a thin clap wrapper over this crate.

pub mod definitions;
pub mod output;

pub use definitions::{load_fuzzer_settings, load_tests, TestSuite};
pub use output::{format_results_json, format_summary, write_results_json};

pub use baf_core::{
    ApiClient, ApiResponse, Environment, MapEnvironment, ProcessEnvironment, ResultKind,
    ResultSummary, Results, RunConfig, TestOutcome, TestResult, TestRunner,
};
pub use baf_transport::HttpApiClient;
pub use baf_types::{FuzzerSetting, HttpMethod, Test};
