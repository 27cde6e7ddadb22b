//! Harness error types

use std::path::PathBuf;

use thiserror::Error;

use parley_llm::GenError;

/// Errors from the evaluation harness
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Unknown model identifier: {0}")]
    UnknownModel(String),

    #[error("No API key for model {model}: set {env_var} or add api_key to its config entry")]
    MissingApiKey { model: String, env_var: String },

    #[error("Run already in progress: lock file {0} exists (remove it if the owner crashed)")]
    RunLocked(PathBuf),

    #[error(transparent)]
    Gen(#[from] GenError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl HarnessError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
