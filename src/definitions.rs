//! Loading of test definitions and fuzzer settings.
//!
//! Both files hold a list of records. Files ending in `.yaml` or `.yml` are
//! parsed as YAML, anything else as JSON.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use baf_types::{FuzzerSetting, Test};

/// Tests loaded from one file, with the directory their relative payload
/// paths are resolved against.
#[derive(Debug, Clone)]
pub struct TestSuite {
    pub tests: Vec<Test>,
    pub payload_root: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Yaml,
    Json,
}

impl Format {
    fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => Format::Yaml,
            _ => Format::Json,
        }
    }
}

fn load_records<T: DeserializeOwned>(path: &Path, what: &str) -> Result<Vec<T>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {} file {}", what, path.display()))?;
    let records = match Format::from_path(path) {
        Format::Yaml => serde_yaml::from_str(&raw)
            .with_context(|| format!("Failed to parse {} YAML {}", what, path.display()))?,
        Format::Json => serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse {} JSON {}", what, path.display()))?,
    };
    Ok(records)
}

/// Load the ordered test list from `path`.
pub fn load_tests(path: &Path) -> Result<TestSuite> {
    let tests: Vec<Test> = load_records(path, "tests")?;
    let payload_root = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    info!(count = tests.len(), path = %path.display(), "Loaded tests");
    Ok(TestSuite {
        tests,
        payload_root,
    })
}

/// Load the fuzzer settings from `path`.
///
/// Duplicate names are kept but only the first one is ever selected.
pub fn load_fuzzer_settings(path: &Path) -> Result<Vec<FuzzerSetting>> {
    let settings: Vec<FuzzerSetting> = load_records(path, "fuzzer settings")?;
    let mut seen = HashSet::new();
    for setting in &settings {
        if !seen.insert(setting.name.as_str()) {
            warn!(name = %setting.name, "Duplicate fuzzer setting name; the first one wins");
        }
    }
    info!(count = settings.len(), path = %path.display(), "Loaded fuzzer settings");
    Ok(settings)
}
