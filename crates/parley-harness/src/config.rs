//! Run configuration
//!
//! A TOML document mapping model identifiers to backend specs, plus the
//! dataset path and output directory:
//!
//! ```toml
//! dataset_path = "data/counterfact.json"
//! output_dir = "results"
//! temperature = 0.7
//!
//! [models.llama3]
//! kind = "local"
//! model = "llama3:8b"
//! base_url = "http://localhost:11434"
//!
//! [models.gpt4o]
//! kind = "remote"
//! model = "gpt-4o"
//! base_url = "https://api.openai.com"
//! api_key_env = "OPENAI_API_KEY"
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use parley_llm::{Backend, LocalBackend, RemoteBackend};

use crate::error::HarnessError;

fn default_temperature() -> f32 {
    0.7
}

/// Configuration for one run
#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    /// Path to the JSON dataset of knowledge items
    pub dataset_path: PathBuf,
    /// Directory receiving checkpoint files
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Sampling temperature applied to every backend
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Model identifier → backend spec
    pub models: HashMap<String, ModelSpec>,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./results")
}

/// Backend spec for one model identifier
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ModelSpec {
    /// Locally-hosted inference server
    Local { model: String, base_url: String },
    /// Remote chat-completion API; the key comes inline or from an
    /// environment variable
    Remote {
        model: String,
        base_url: String,
        #[serde(default)]
        api_key: Option<String>,
        #[serde(default)]
        api_key_env: Option<String>,
    },
}

impl RunConfig {
    /// Load and parse a TOML config file
    pub fn load(path: &Path) -> Result<Self, HarnessError> {
        let content = std::fs::read_to_string(path).map_err(|e| HarnessError::io(path, e))?;
        toml::from_str(&content).map_err(|source| HarnessError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve a model identifier into a constructed backend
    pub fn backend(&self, id: &str) -> Result<Backend, HarnessError> {
        let spec = self
            .models
            .get(id)
            .ok_or_else(|| HarnessError::UnknownModel(id.to_string()))?;
        match spec {
            ModelSpec::Local { model, base_url } => Ok(Backend::Local(
                LocalBackend::new(base_url, model).with_temperature(self.temperature),
            )),
            ModelSpec::Remote {
                model,
                base_url,
                api_key,
                api_key_env,
            } => {
                let key = resolve_api_key(id, api_key.as_deref(), api_key_env.as_deref())?;
                Ok(Backend::Remote(
                    RemoteBackend::new(base_url, model, &key).with_temperature(self.temperature),
                ))
            }
        }
    }
}

fn resolve_api_key(
    model: &str,
    inline: Option<&str>,
    env_var: Option<&str>,
) -> Result<String, HarnessError> {
    if let Some(key) = inline {
        return Ok(key.to_string());
    }
    let env_var = env_var.unwrap_or("PARLEY_API_KEY");
    std::env::var(env_var).map_err(|_| HarnessError::MissingApiKey {
        model: model.to_string(),
        env_var: env_var.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
dataset_path = "data/counterfact.json"
output_dir = "out"

[models.llama3]
kind = "local"
model = "llama3:8b"
base_url = "http://localhost:11434"

[models.gpt4o]
kind = "remote"
model = "gpt-4o"
base_url = "https://api.openai.com"
api_key = "sk-test"
"#;

    #[test]
    fn parses_sample_config() {
        let config: RunConfig = toml::from_str(SAMPLE).unwrap();
        assert_eq!(config.dataset_path, PathBuf::from("data/counterfact.json"));
        assert_eq!(config.temperature, 0.7);
        assert_eq!(config.models.len(), 2);
        assert!(matches!(config.models["llama3"], ModelSpec::Local { .. }));
    }

    #[test]
    fn resolves_local_and_remote_backends() {
        let config: RunConfig = toml::from_str(SAMPLE).unwrap();
        assert!(matches!(
            config.backend("llama3").unwrap(),
            Backend::Local(_)
        ));
        assert!(matches!(
            config.backend("gpt4o").unwrap(),
            Backend::Remote(_)
        ));
    }

    #[test]
    fn unknown_model_is_an_error() {
        let config: RunConfig = toml::from_str(SAMPLE).unwrap();
        assert!(matches!(
            config.backend("claude"),
            Err(HarnessError::UnknownModel(id)) if id == "claude"
        ));
    }

    #[test]
    fn remote_without_key_reports_env_var() {
        let toml_text = r#"
dataset_path = "d.json"
[models.api]
kind = "remote"
model = "m"
base_url = "https://example.com"
api_key_env = "PARLEY_TEST_KEY_THAT_IS_NOT_SET"
"#;
        let config: RunConfig = toml::from_str(toml_text).unwrap();
        assert!(matches!(
            config.backend("api"),
            Err(HarnessError::MissingApiKey { env_var, .. })
                if env_var == "PARLEY_TEST_KEY_THAT_IS_NOT_SET"
        ));
    }
}
