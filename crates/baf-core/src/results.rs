//! Result types for fuzz test runs.

use std::collections::BTreeMap;

use baf_types::Test;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Classification of one dispatch (or of a test that never got that far).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResultKind {
    Success,
    Failure,
    DryRun,
    ConfigurationError,
}

impl ResultKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultKind::Success => "SUCCESS",
            ResultKind::Failure => "FAILURE",
            ResultKind::DryRun => "DRY_RUN",
            ResultKind::ConfigurationError => "CONFIGURATION_ERROR",
        }
    }
}

impl std::fmt::Display for ResultKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classified outcome, attached to the test and the URL it resolved to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub test: Test,
    /// `None` when the URL could not be built or the run stopped before it mattered.
    pub url: Option<String>,
    pub kind: ResultKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    /// The payload that was (or, in a dry run, would have been) submitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl TestResult {
    fn bare(test: &Test, url: Option<&str>, kind: ResultKind) -> Self {
        Self {
            test: test.clone(),
            url: url.map(String::from),
            kind,
            status_code: None,
            payload: None,
            cause: None,
            data: None,
        }
    }

    pub fn success(test: &Test, url: &str, status_code: u16, payload: &Value) -> Self {
        Self {
            status_code: Some(status_code),
            payload: Some(payload.clone()),
            ..Self::bare(test, Some(url), ResultKind::Success)
        }
    }

    pub fn failure(test: &Test, url: &str, status_code: u16, payload: &Value) -> Self {
        Self {
            status_code: Some(status_code),
            payload: Some(payload.clone()),
            ..Self::bare(test, Some(url), ResultKind::Failure)
        }
    }

    /// A dispatch that never produced a status code (connect error, timeout, ...).
    pub fn transport_failure(test: &Test, url: &str, payload: &Value, cause: String) -> Self {
        Self {
            payload: Some(payload.clone()),
            cause: Some(cause),
            ..Self::bare(test, Some(url), ResultKind::Failure)
        }
    }

    /// Attach extra detail, such as the response body of a failed request.
    /// Blank text is dropped.
    pub fn with_data(mut self, data: Option<String>) -> Self {
        self.data = data.filter(|d| !d.trim().is_empty());
        self
    }

    pub fn dry_run(test: &Test, url: &str, payload: &Value) -> Self {
        Self {
            payload: Some(payload.clone()),
            ..Self::bare(test, Some(url), ResultKind::DryRun)
        }
    }

    pub fn configuration_error(
        test: &Test,
        url: Option<&str>,
        cause: &str,
        data: Option<String>,
    ) -> Self {
        Self {
            cause: Some(cause.to_string()),
            data,
            ..Self::bare(test, url, ResultKind::ConfigurationError)
        }
    }
}

/// Counts per result kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSummary {
    pub total: usize,
    pub successes: usize,
    pub failures: usize,
    pub dry_runs: usize,
    pub configuration_errors: usize,
    /// Number of results per test label, in label order.
    pub per_test: BTreeMap<String, usize>,
}

/// Append-only, ordered log of test results for one run.
///
/// Entries are never removed or rewritten; readers that want to follow a run
/// incrementally remember how many entries they have seen and call
/// [`Results::since`].
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Results {
    entries: Vec<TestResult>,
}

impl Results {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_test_result(&mut self, result: TestResult) {
        self.entries.push(result);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TestResult> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[TestResult] {
        &self.entries
    }

    /// Entries appended after the first `seen` ones.
    pub fn since(&self, seen: usize) -> &[TestResult] {
        self.entries.get(seen..).unwrap_or(&[])
    }

    pub fn count(&self, kind: ResultKind) -> usize {
        self.entries.iter().filter(|r| r.kind == kind).count()
    }

    pub fn summary(&self) -> ResultSummary {
        let mut summary = ResultSummary {
            total: self.entries.len(),
            ..Default::default()
        };
        for result in &self.entries {
            match result.kind {
                ResultKind::Success => summary.successes += 1,
                ResultKind::Failure => summary.failures += 1,
                ResultKind::DryRun => summary.dry_runs += 1,
                ResultKind::ConfigurationError => summary.configuration_errors += 1,
            }
            *summary
                .per_test
                .entry(result.test.label().to_string())
                .or_insert(0) += 1;
        }
        summary
    }
}

impl<'a> IntoIterator for &'a Results {
    type Item = &'a TestResult;
    type IntoIter = std::slice::Iter<'a, TestResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
