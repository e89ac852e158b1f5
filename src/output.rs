//! Output formatting for the baf CLI.
//!
//! Provides the human-readable summary and the JSON result list.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use baf_core::{ResultKind, Results};

/// Format the run summary as a small table.
pub fn format_summary(results: &Results) -> String {
    let summary = results.summary();
    let mut out = String::new();

    out.push_str("Fuzzing results\n");
    out.push_str("===============\n");
    out.push_str(&format!("  {:<22}{:>8}\n", "Total", summary.total));
    out.push_str(&format!("  {:<22}{:>8}\n", ResultKind::Success.as_str(), summary.successes));
    out.push_str(&format!("  {:<22}{:>8}\n", ResultKind::Failure.as_str(), summary.failures));
    out.push_str(&format!("  {:<22}{:>8}\n", ResultKind::DryRun.as_str(), summary.dry_runs));
    out.push_str(&format!(
        "  {:<22}{:>8}\n",
        ResultKind::ConfigurationError.as_str(),
        summary.configuration_errors
    ));

    if !summary.per_test.is_empty() {
        out.push_str("\nPer test\n");
        for (label, count) in &summary.per_test {
            out.push_str(&format!("  {:<40}{:>8}\n", label, count));
        }
    }

    let problems: Vec<_> = results
        .iter()
        .filter(|r| matches!(r.kind, ResultKind::Failure | ResultKind::ConfigurationError))
        .collect();
    if !problems.is_empty() {
        out.push_str("\nProblems\n");
        for result in problems {
            let detail = match (result.status_code, result.cause.as_deref()) {
                (Some(code), _) => format!(
                    "status {} (expected {})",
                    code, result.test.expected_status
                ),
                (None, Some(cause)) => match result.data.as_deref() {
                    Some(data) => format!("{}: {}", cause, data),
                    None => cause.to_string(),
                },
                (None, None) => "no detail".to_string(),
            };
            out.push_str(&format!(
                "  [{}] {} {} {}\n",
                result.kind,
                result.test.label(),
                result.url.as_deref().unwrap_or("-"),
                detail
            ));
        }
    }

    out
}

#[derive(Serialize)]
struct ResultsJson<'a> {
    summary: baf_core::ResultSummary,
    results: &'a Results,
}

/// Format the summary and the full ordered result list as pretty JSON.
pub fn format_results_json(results: &Results) -> Result<String> {
    let json = ResultsJson {
        summary: results.summary(),
        results,
    };
    serde_json::to_string_pretty(&json).context("Failed to serialize results")
}

/// Write the JSON form of `results` to `path`.
pub fn write_results_json(results: &Results, path: &Path) -> Result<()> {
    let json = format_results_json(results)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}
