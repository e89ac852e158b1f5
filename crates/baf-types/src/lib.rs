//! Shared types for the baf workspace.
//!
//! This crate holds the declarative inputs of a fuzzing run, kept separate from
//! the engine so loaders and reporters can depend on them without pulling in
//! the mutation code:
//!
//! - [`Test`](test_definition::Test) - one endpoint test with its mutation flags
//! - [`FuzzerSetting`](fuzzer_setting::FuzzerSetting) - named bounds for random payload generation
//! - [`env_utils`] - environment variable parsing helpers

pub mod env_utils;
pub mod fuzzer_setting;
pub mod serde_helpers;
pub mod test_definition;

pub use fuzzer_setting::{find_fuzzer_setting, FuzzerSetting};
pub use test_definition::{HttpMethod, Test};
