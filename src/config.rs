//! Configuration for the benchmark.
//!
//! Supports both environment variables and YAML config file.
//! Environment variables take precedence over config file values.

use crate::error::{BenchError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Judging-model configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Base URL for the LLM API (e.g., "https://api.openai.com")
    pub api_base: String,

    /// API key for authentication
    pub api_key: String,

    /// Model name (e.g., "gpt-4o-mini")
    pub model: String,

    /// Token budget for the judgment response
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature (kept at 0 for reproducible judgments)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Fixed sampling seed for reproducible judgments
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_temperature() -> f32 {
    0.0
}

fn default_seed() -> u64 {
    42
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            api_key: String::new(),
            model: "gpt-4o-mini".to_string(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            seed: default_seed(),
        }
    }
}

/// Answer-provider endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Endpoint answering via retrieval-plus-generation.
    pub rag_url: String,

    /// Endpoint answering via text-to-Cypher against the knowledge graph.
    pub kg_url: String,

    /// Time budget per provider call, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            rag_url: String::new(),
            kg_url: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Full application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Judging-model settings
    pub llm: LlmConfig,
    /// Answer-provider settings
    #[serde(default)]
    pub providers: ProviderConfig,
}

/// Configuration file structure (YAML format).
#[derive(Debug, Deserialize)]
struct ConfigFile {
    llm: Option<LlmFileSection>,
    providers: Option<ProviderFileSection>,
}

#[derive(Debug, Deserialize)]
struct LlmFileSection {
    api_base: Option<String>,
    api_key: Option<String>,
    model: Option<String>,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
    seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ProviderFileSection {
    rag_url: Option<String>,
    kg_url: Option<String>,
    timeout_secs: Option<u64>,
}

impl Config {
    /// Load configuration from environment variables and optional config file.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (LLM_API_BASE, LLM_API_KEY, LLM_MODEL,
    ///    RAG_PROVIDER_URL, KG_PROVIDER_URL, ...)
    /// 2. Config file (~/.config/kg-rag-bench/config.yaml)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        let mut config = Config::default();

        // Try to load from config file first
        if let Some(config_path) = Self::config_file_path() {
            if config_path.exists() {
                config = Self::load_from_file(&config_path)?;
            }
        }

        // Override with environment variables
        if let Ok(api_base) = env::var("LLM_API_BASE") {
            config.llm.api_base = api_base;
        }

        if let Ok(api_key) = env::var("LLM_API_KEY") {
            config.llm.api_key = api_key;
        }

        if let Ok(model) = env::var("LLM_MODEL") {
            config.llm.model = model;
        }

        if let Ok(max_tokens) = env::var("LLM_MAX_TOKENS") {
            if let Ok(tokens) = max_tokens.parse() {
                config.llm.max_tokens = tokens;
            }
        }

        if let Ok(seed) = env::var("LLM_SEED") {
            if let Ok(seed) = seed.parse() {
                config.llm.seed = seed;
            }
        }

        if let Ok(rag_url) = env::var("RAG_PROVIDER_URL") {
            config.providers.rag_url = rag_url;
        }

        if let Ok(kg_url) = env::var("KG_PROVIDER_URL") {
            config.providers.kg_url = kg_url;
        }

        if let Ok(timeout) = env::var("PROVIDER_TIMEOUT_SECS") {
            if let Ok(secs) = timeout.parse() {
                config.providers.timeout_secs = secs;
            }
        }

        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| BenchError::io(path, e))?;

        let file_config: ConfigFile = serde_yaml::from_str(&content)
            .map_err(|e| BenchError::Config(format!("Failed to parse config file: {}", e)))?;

        let mut config = Config::default();

        if let Some(llm) = file_config.llm {
            if let Some(api_base) = llm.api_base {
                config.llm.api_base = api_base;
            }
            if let Some(api_key) = llm.api_key {
                config.llm.api_key = api_key;
            }
            if let Some(model) = llm.model {
                config.llm.model = model;
            }
            if let Some(max_tokens) = llm.max_tokens {
                config.llm.max_tokens = max_tokens;
            }
            if let Some(temperature) = llm.temperature {
                config.llm.temperature = temperature;
            }
            if let Some(seed) = llm.seed {
                config.llm.seed = seed;
            }
        }

        if let Some(providers) = file_config.providers {
            if let Some(rag_url) = providers.rag_url {
                config.providers.rag_url = rag_url;
            }
            if let Some(kg_url) = providers.kg_url {
                config.providers.kg_url = kg_url;
            }
            if let Some(timeout_secs) = providers.timeout_secs {
                config.providers.timeout_secs = timeout_secs;
            }
        }

        Ok(config)
    }

    /// Get the default config file path.
    pub fn config_file_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "kg-rag-bench")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Validate that required configuration is present.
    pub fn validate(&self) -> Result<()> {
        if self.llm.api_base.is_empty() {
            return Err(BenchError::Config(
                "LLM API base URL is required. Set LLM_API_BASE environment variable or add to config file.".to_string()
            ));
        }

        if self.llm.api_key.is_empty() {
            return Err(BenchError::Config(
                "LLM API key is required. Set LLM_API_KEY environment variable or add to config file.".to_string()
            ));
        }

        if self.llm.model.is_empty() {
            return Err(BenchError::Config(
                "LLM model is required. Set LLM_MODEL environment variable or add to config file."
                    .to_string(),
            ));
        }

        Ok(())
    }

    /// Validate that both provider endpoints are configured (needed for runs,
    /// not for `test`).
    pub fn validate_providers(&self) -> Result<()> {
        if self.providers.rag_url.is_empty() {
            return Err(BenchError::Config(
                "RAG provider URL is required. Set RAG_PROVIDER_URL environment variable or add to config file.".to_string()
            ));
        }

        if self.providers.kg_url.is_empty() {
            return Err(BenchError::Config(
                "Knowledge Graph provider URL is required. Set KG_PROVIDER_URL environment variable or add to config file.".to_string()
            ));
        }

        Ok(())
    }

    /// Create a config from explicit values (useful for testing).
    pub fn with_llm(
        api_base: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            llm: LlmConfig {
                api_base: api_base.into(),
                api_key: api_key.into(),
                model: model.into(),
                ..Default::default()
            },
            providers: ProviderConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.llm.api_base.is_empty());
        assert!(config.llm.api_key.is_empty());
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.llm.max_tokens, 1000);
        assert_eq!(config.llm.temperature, 0.0);
        assert_eq!(config.llm.seed, 42);
        assert_eq!(config.providers.timeout_secs, 60);
    }

    #[test]
    fn test_validate_fails_without_required_fields() {
        let config = Config::default();
        assert!(config.validate().is_err());
        assert!(config.validate_providers().is_err());
    }

    #[test]
    fn test_with_llm() {
        let config = Config::with_llm("https://api.example.com", "test-key", "gpt-4");
        assert_eq!(config.llm.api_base, "https://api.example.com");
        assert_eq!(config.llm.api_key, "test-key");
        assert_eq!(config.llm.model, "gpt-4");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
llm:
  api_base: https://api.example.com
  api_key: file-key
  model: gpt-4o-mini
  seed: 7
providers:
  rag_url: http://localhost:8001/answer
  kg_url: http://localhost:8002/answer
  timeout_secs: 30
"#
        )
        .unwrap();

        let config = Config::load_from_file(&file.path().to_path_buf()).unwrap();
        assert_eq!(config.llm.api_key, "file-key");
        assert_eq!(config.llm.seed, 7);
        assert_eq!(config.providers.rag_url, "http://localhost:8001/answer");
        assert_eq!(config.providers.timeout_secs, 30);
        assert!(config.validate().is_ok());
        assert!(config.validate_providers().is_ok());
    }
}
