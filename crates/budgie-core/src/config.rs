//! Settings for Budgie
//!
//! Resolution order:
//! 1. Explicit path (`--config`), else the override file in the data dir
//!    (~/.local/share/budgie/config.toml), else embedded defaults
//! 2. Environment overrides for the AI backend (`AI_BACKEND`, `OLLAMA_HOST`, ...)
//!
//! Missing keys in an override file fall back to the built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/budgie.toml");

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub ai: AiSettings,
    pub artifact: ArtifactSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7860,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AiSettings {
    /// ollama | openai_compatible | mock
    pub backend: String,
    pub host: String,
    pub model: String,
    pub api_key: Option<String>,
    /// Default generation budget for chat replies
    pub max_tokens: u32,
    /// Upper bound on a single generation
    pub timeout_secs: u64,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            backend: "ollama".to_string(),
            host: "http://localhost:11434".to_string(),
            model: "orca-mini:3b".to_string(),
            api_key: None,
            max_tokens: crate::advisor::DEFAULT_MAX_TOKENS,
            timeout_secs: 120,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ArtifactSettings {
    /// Fetch the model file on server startup when it is missing
    pub auto_download: bool,
    pub path: PathBuf,
    pub url: String,
    /// Write size for the download, in bytes
    pub chunk_size: usize,
    /// Expected hex SHA-256 of the file, if known
    pub sha256: Option<String>,
}

impl Default for ArtifactSettings {
    fn default() -> Self {
        Self {
            auto_download: false,
            path: PathBuf::from("orca-mini-3b-gguf2-q4_0.gguf"),
            url: "https://gpt4all.io/models/gguf/orca-mini-3b-gguf2-q4_0.gguf".to_string(),
            chunk_size: 8192,
            sha256: None,
        }
    }
}

impl Settings {
    /// Load settings from file(s) and apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => Self::from_toml(DEFAULT_CONFIG)?,
            },
        };
        settings.apply_overrides(|key| std::env::var(key).ok().filter(|v| !v.is_empty()));
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Invalid config: {}", e)))
    }

    /// Apply AI backend overrides from a key lookup (the environment in production)
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(backend) = lookup("AI_BACKEND") {
            self.ai.backend = backend.to_lowercase();
        }

        let (host_key, model_key) = match self.ai.backend.as_str() {
            "openai_compatible" | "openai" | "vllm" | "localai" | "llamacpp" => {
                if let Some(key) = lookup("OPENAI_COMPATIBLE_API_KEY") {
                    self.ai.api_key = Some(key);
                }
                ("OPENAI_COMPATIBLE_HOST", "OPENAI_COMPATIBLE_MODEL")
            }
            _ => ("OLLAMA_HOST", "OLLAMA_MODEL"),
        };

        if let Some(host) = lookup(host_key) {
            self.ai.host = host;
        }
        if let Some(model) = lookup(model_key) {
            self.ai.model = model;
        }
    }
}

/// Default override location: ~/.local/share/budgie/config.toml
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("budgie").join("config.toml"))
}
