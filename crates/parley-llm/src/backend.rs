//! Backend dispatch and common types

use thiserror::Error;

use crate::local::LocalBackend;
use crate::mock::MockBackend;
use crate::remote::RemoteBackend;

/// Errors from model backends
#[derive(Debug, Error)]
pub enum GenError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Request failed: {0}")]
    RequestFailed(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("Prompt/system prompt length mismatch: {prompts} vs {systems}")]
    LengthMismatch { prompts: usize, systems: usize },
}

/// The closed set of model backends.
///
/// Every agent call goes through [`Backend::generate`]; the variants differ
/// only in transport and failure policy. Local failures propagate and abort
/// the batch; the remote variant degrades exhausted items to empty strings
/// and keeps going.
#[derive(Debug)]
pub enum Backend {
    Local(LocalBackend),
    Remote(RemoteBackend),
    Mock(MockBackend),
}

impl Backend {
    /// Short name for logging
    pub fn name(&self) -> &str {
        match self {
            Backend::Local(b) => b.model(),
            Backend::Remote(b) => b.model(),
            Backend::Mock(_) => "mock",
        }
    }

    /// Generate one completion per (prompt, system prompt) pair.
    ///
    /// Returns exactly `prompts.len()` outputs in input order. An empty
    /// string is a valid degraded output, never an omission. Requests are
    /// issued sequentially per item.
    pub async fn generate(
        &self,
        prompts: &[String],
        system_prompts: &[String],
        max_tokens: u32,
    ) -> Result<Vec<String>, GenError> {
        if prompts.len() != system_prompts.len() {
            return Err(GenError::LengthMismatch {
                prompts: prompts.len(),
                systems: system_prompts.len(),
            });
        }
        match self {
            Backend::Local(b) => b.generate(prompts, system_prompts, max_tokens).await,
            Backend::Remote(b) => Ok(b.generate(prompts, system_prompts, max_tokens).await),
            Backend::Mock(b) => b.generate(prompts, system_prompts),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mismatched_lengths_are_rejected() {
        let backend = Backend::Mock(MockBackend::constant("x"));
        let err = backend
            .generate(&["a".into(), "b".into()], &["s".into()], 8)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            GenError::LengthMismatch {
                prompts: 2,
                systems: 1
            }
        ));
    }
}
