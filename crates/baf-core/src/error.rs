use thiserror::Error;

/// A test definition that cannot be executed.
///
/// These never abort a run: the runner records them as
/// [`ResultKind::ConfigurationError`](crate::results::ResultKind) and moves on
/// to the next test.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// The server variable is not set, so no URL can be built.
    #[error("can not construct URL to API: server variable '{server}' is not set")]
    UrlConstruction { server: String },

    /// The test names no fuzzer setting, or names one that does not exist.
    #[error("fuzzer setting does not exist: {}", name.as_deref().unwrap_or("<none>"))]
    MissingFuzzerSetting { name: Option<String> },

    /// The original payload could not be read or decoded.
    #[error("cannot load JSON payload from {path}: {reason}")]
    PayloadLoad { path: String, reason: String },

    /// A key-based strategy is enabled but the payload root is not an object.
    #[error("payload root in {path} is not a JSON object")]
    PayloadNotObject { path: String },
}

impl ConfigurationError {
    /// Stable cause string recorded with the result.
    pub fn cause(&self) -> &'static str {
        match self {
            ConfigurationError::UrlConstruction { .. } => "URL construction",
            ConfigurationError::MissingFuzzerSetting { .. } => "missing fuzzer setting",
            ConfigurationError::PayloadLoad { .. } => "payload load failure",
            ConfigurationError::PayloadNotObject { .. } => "payload root is not an object",
        }
    }

    /// The offending value (server variable, setting name, or payload path).
    pub fn data(&self) -> Option<String> {
        match self {
            ConfigurationError::UrlConstruction { server } => Some(server.clone()),
            ConfigurationError::MissingFuzzerSetting { name } => name.clone(),
            ConfigurationError::PayloadLoad { path, .. }
            | ConfigurationError::PayloadNotObject { path } => Some(path.clone()),
        }
    }
}
