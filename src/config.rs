// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{QaError, Result};
use crate::parser::DocumentFormat;
use crate::utils::Validator;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub generation: GenerationConfig,
    pub upload: UploadConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerationConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub system_prompt: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UploadConfig {
    pub max_file_size_mb: usize,
    pub allowed_extensions: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: 50,
            allowed_extensions: DocumentFormat::SUPPORTED
                .iter()
                .map(|format| format.extension().to_string())
                .collect(),
        }
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let defaults = Self::default_config();
        let mut builder = config::Config::builder()
            .set_default("generation.base_url", defaults.generation.base_url.clone())
            .and_then(|b| b.set_default("generation.model", defaults.generation.model.clone()))
            .and_then(|b| {
                b.set_default(
                    "generation.system_prompt",
                    defaults.generation.system_prompt.clone(),
                )
            })
            .and_then(|b| b.set_default("generation.timeout_secs", defaults.generation.timeout_secs))
            .and_then(|b| {
                b.set_default(
                    "upload.max_file_size_mb",
                    defaults.upload.max_file_size_mb as u64,
                )
            })
            .and_then(|b| {
                b.set_default(
                    "upload.allowed_extensions",
                    defaults.upload.allowed_extensions.clone(),
                )
            })
            .map_err(|e| QaError::Config(e.to_string()))?;

        let file = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));
        builder = builder.add_source(config::File::from(file).required(path.is_some()));

        builder = builder.add_source(
            config::Environment::with_prefix("FILE_QA")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| QaError::Config(e.to_string()))?;

        let mut config: Config = settings
            .try_deserialize()
            .map_err(|e| QaError::Config(e.to_string()))?;

        config.generation.resolve_api_key();
        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            generation: GenerationConfig {
                api_key: None,
                base_url: "https://api.groq.com/openai/v1".to_string(),
                model: "llama-3.1-70b-versatile".to_string(),
                system_prompt: "You are a helpful assistant.".to_string(),
                timeout_secs: 60,
            },
            upload: UploadConfig::default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.generation.timeout_secs == 0 {
            return Err(QaError::Config(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.generation.model.trim().is_empty() {
            return Err(QaError::Config("model must not be empty".to_string()));
        }

        Validator::validate_url(&self.generation.base_url)
            .map_err(|e| QaError::Config(e.to_string()))?;

        if self.upload.max_file_size_mb == 0 {
            return Err(QaError::Config(
                "max_file_size_mb must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl GenerationConfig {
    /// Fall back to the conventional `GROQ_API_KEY` variable when no key is configured.
    pub fn resolve_api_key(&mut self) {
        let configured = self
            .api_key
            .as_deref()
            .map(|key| !key.trim().is_empty())
            .unwrap_or(false);

        if !configured {
            self.api_key = std::env::var("GROQ_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default_config();
        assert!(config.validate().is_ok());
        assert_eq!(
            config.upload.allowed_extensions,
            vec!["pdf", "docx", "pptx", "xlsx", "csv"]
        );
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default_config();
        config.generation.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let mut config = Config::default_config();
        config.generation.base_url = "api.groq.com".to_string();
        assert!(matches!(config.validate(), Err(QaError::Config(_))));
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("qa.toml");
        fs::write(
            &path,
            "[generation]\nmodel = \"llama-3.3-70b-versatile\"\n\n[upload]\nmax_file_size_mb = 5\n",
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.generation.model, "llama-3.3-70b-versatile");
        assert_eq!(config.generation.timeout_secs, 60);
        assert_eq!(config.upload.max_file_size_mb, 5);
        assert_eq!(config.upload.allowed_extensions.len(), 5);
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("absent.toml");
        assert!(Config::load(Some(&path)).is_err());
    }
}
