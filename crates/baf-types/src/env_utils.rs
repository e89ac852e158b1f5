//! Environment variable parsing utilities.
//!
//! Used for run configuration fallbacks (`BAF_ACCESS_TOKEN`, `BAF_DRY_RUN`)
//! and transport tuning (`BAF_HTTP_TIMEOUT_SECS`).
//!
//! # Example
//!
//! ```
//! use baf_types::env_utils::{env_bool, env_var_or};
//!
//! let timeout: u64 = env_var_or("BAF_HTTP_TIMEOUT_SECS", 30);
//! let dry_run = env_bool("BAF_DRY_RUN");
//! ```

use std::str::FromStr;

/// Parse an environment variable into a type that implements `FromStr`.
///
/// Returns `None` if the variable is not set or cannot be parsed.
pub fn env_var<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Parse an environment variable with a default value.
pub fn env_var_or<T: FromStr>(key: &str, default: T) -> T {
    env_var(key).unwrap_or(default)
}

/// Check if an environment variable is set to "1", "true", "yes", or "on" (case-insensitive).
pub fn env_bool(key: &str) -> bool {
    env_bool_or(key, false)
}

pub fn env_bool_or(key: &str, default: bool) -> bool {
    match std::env::var(key).ok() {
        Some(v) => matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on"),
        None => default,
    }
}

/// Get an environment variable as a string, treating blank values as unset.
pub fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
