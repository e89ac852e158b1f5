//! Server-address lookup.
//!
//! A test names its server indirectly (e.g. `API_SERVER`); the environment maps
//! that name to a base address at URL-construction time.

use std::collections::HashMap;

/// Named lookup of server base addresses.
pub trait Environment {
    fn lookup(&self, name: &str) -> Option<String>;
}

/// Reads process environment variables.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn lookup(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

/// Fixed name-to-address map, for tests and embedding.
#[derive(Debug, Default, Clone)]
pub struct MapEnvironment {
    vars: HashMap<String, String>,
}

impl MapEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl Environment for MapEnvironment {
    fn lookup(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}
