//! Fixture files for tests.
//!
//! Payloads are written into a fresh temp dir; tests reference them by file
//! name and the runner resolves them against the dir.

use std::fs;
use std::path::{Path, PathBuf};

use baf::{HttpMethod, Test};
use serde_json::Value;
use tempfile::TempDir;

/// Server variable every fixture test points at.
pub const SERVER_VAR: &str = "BAF_FIXTURE_SERVER";

pub struct Fixture {
    dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `payload` as `<name>` and return the relative path.
    pub fn payload(&self, name: &str, payload: &Value) -> PathBuf {
        fs::write(self.dir.path().join(name), payload.to_string()).unwrap();
        PathBuf::from(name)
    }

    /// Write arbitrary text to `<name>` and return the absolute path.
    pub fn file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }
}

/// A POST test against `SERVER_VAR` with every mutation flag off.
pub fn post_test(name: &str, payload: PathBuf) -> Test {
    Test {
        name: Some(name.to_string()),
        server: SERVER_VAR.to_string(),
        prefix: "api".to_string(),
        endpoint: "items".to_string(),
        method: HttpMethod::Post,
        expected_status: 200,
        add_items: false,
        remove_items: false,
        change_types: false,
        mutate_payload: false,
        payload,
        fuzzer_setting: Some("default".to_string()),
    }
}
