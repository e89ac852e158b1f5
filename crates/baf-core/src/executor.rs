//! Dispatch of a single payload and classification of the outcome.

use baf_types::{HttpMethod, Test};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info, warn};

use crate::client::{ApiClient, ApiResponse};
use crate::results::{ResultKind, Results, TestResult};

/// Run-wide settings shared by every test.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Record DRY_RUN results instead of calling the API.
    pub dry_run: bool,
    /// Bearer token sent with every request, if any.
    pub access_token: Option<String>,
}

/// Sends payloads for one run and appends the classified outcomes.
pub struct TestExecutor<'a> {
    client: &'a dyn ApiClient,
    config: &'a RunConfig,
}

impl<'a> TestExecutor<'a> {
    pub fn new(client: &'a dyn ApiClient, config: &'a RunConfig) -> Self {
        Self { client, config }
    }

    /// Dispatch `payload` for `test` and record the outcome.
    ///
    /// Dry runs always record DRY_RUN without touching the network. Otherwise
    /// only POST is implemented; any other method is logged and skipped, and
    /// produces no result. Returns the kind of result recorded, if any.
    pub fn perform_test(
        &self,
        url: &str,
        test: &Test,
        payload: &Value,
        results: &mut Results,
    ) -> Option<ResultKind> {
        if self.config.dry_run {
            info!(url, "(dry run)");
            results.add_test_result(TestResult::dry_run(test, url, payload));
            return Some(ResultKind::DryRun);
        }

        match &test.method {
            HttpMethod::Post => Some(self.post(url, test, payload, results)),
            other => {
                warn!(
                    method = %other,
                    test = test.label(),
                    "HTTP method is not supported by the executor; nothing sent"
                );
                None
            }
        }
    }

    fn post(&self, url: &str, test: &Test, payload: &Value, results: &mut Results) -> ResultKind {
        info!(url, "POSTing data");
        let response = match self.client.send_payload(
            url,
            payload,
            self.config.access_token.as_deref(),
        ) {
            Ok(response) => response,
            Err(e) => {
                error!(url, error = %e, "Fail: request did not complete");
                results.add_test_result(TestResult::transport_failure(
                    test,
                    url,
                    payload,
                    e.to_string(),
                ));
                return ResultKind::Failure;
            }
        };

        let ApiResponse { status_code, body } = response;
        info!(status_code, "HTTP status code {}", status_code);

        if status_code == test.expected_status {
            info!("Success");
            results.add_test_result(TestResult::success(test, url, status_code, payload));
            ResultKind::Success
        } else {
            error!(status_code, expected = test.expected_status, "Fail");
            results.add_test_result(
                TestResult::failure(test, url, status_code, payload).with_data(body),
            );
            ResultKind::Failure
        }
    }
}
