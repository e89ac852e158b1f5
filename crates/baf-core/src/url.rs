//! Request URL construction.

use baf_types::Test;
use tracing::error;

use crate::env::Environment;

/// Build the request URL for a test.
///
/// The test's `server` field names an environment entry holding the base
/// address. Base, prefix and endpoint are joined with exactly one `/` between
/// them regardless of slashes already present. An empty prefix is skipped.
///
/// Returns `None` when the server entry is missing or blank; the caller records
/// a configuration error and makes no request.
pub fn construct_url(test: &Test, environment: &dyn Environment) -> Option<String> {
    let Some(base) = environment
        .lookup(&test.server)
        .filter(|v| !v.trim().is_empty())
    else {
        error!(
            server = %test.server,
            "The following environment variable is not set: {}", test.server
        );
        return None;
    };

    Some(join_url(base.trim(), &test.prefix, &test.endpoint))
}

fn join_url(base: &str, prefix: &str, endpoint: &str) -> String {
    let mut url = base.trim_end_matches('/').to_string();
    url.push('/');

    let prefix = prefix.trim().trim_matches('/');
    if !prefix.is_empty() {
        url.push_str(prefix);
        url.push('/');
    }

    url.push_str(endpoint.trim().trim_start_matches('/'));
    url
}
