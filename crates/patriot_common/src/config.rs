//! Configuration for the agent.
//!
//! Loads ~/.config/patriot/config.toml when present, otherwise compiled-in
//! defaults. Every field has a serde default so partial files work.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::retry::RetryPolicy;

/// Config file name under the user config directory
const CONFIG_DIR: &str = "patriot";
const CONFIG_FILE: &str = "config.toml";

/// Model backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Chat endpoint base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model used for every gateway call
    #[serde(default = "default_model")]
    pub model: String,

    /// Per-call HTTP timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Total attempts per call, including the first
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,

    /// Backoff base delay in milliseconds; doubles each retry
    #[serde(default = "default_retry_base_ms")]
    pub retry_base_ms: u64,
}

fn default_endpoint() -> String {
    "http://127.0.0.1:11434".to_string()
}

fn default_model() -> String {
    "qwen3:8b".to_string()
}

fn default_request_timeout() -> u64 {
    120
}

fn default_retry_attempts() -> u32 {
    3
}

fn default_retry_base_ms() -> u64 {
    500
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            request_timeout_secs: default_request_timeout(),
            retry_attempts: default_retry_attempts(),
            retry_base_ms: default_retry_base_ms(),
        }
    }
}

impl LlmConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.retry_attempts, Duration::from_millis(self.retry_base_ms))
    }
}

/// Agent loop and tool limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Hard cap on model decision rounds per task. The only liveness
    /// guarantee the executor loop has.
    #[serde(default = "default_max_rounds")]
    pub max_rounds: usize,

    /// Default shell command timeout in seconds
    #[serde(default = "default_shell_timeout")]
    pub shell_timeout_secs: u64,

    /// Default byte cap for the text file reader
    #[serde(default = "default_read_max_bytes")]
    pub read_max_bytes: usize,
}

fn default_max_rounds() -> usize {
    5
}

fn default_shell_timeout() -> u64 {
    30
}

fn default_read_max_bytes() -> usize {
    5000
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_rounds: default_max_rounds(),
            shell_timeout_secs: default_shell_timeout(),
            read_max_bytes: default_read_max_bytes(),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatriotConfig {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub agent: AgentConfig,
}

impl PatriotConfig {
    /// Default config file path (~/.config/patriot/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Load from the default location, falling back to defaults when the
    /// file is absent or unreadable.
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) if path.exists() => match Self::load_from(&path) {
                Ok(config) => {
                    info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    warn!("Failed to load {}: {} - using defaults", path.display(), e);
                    Self::default()
                }
            },
            _ => Self::default(),
        }
    }

    /// Load from an explicit path; errors propagate to the caller
    pub fn load_from(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = PatriotConfig::default();
        assert_eq!(config.llm.endpoint, "http://127.0.0.1:11434");
        assert_eq!(config.llm.retry_attempts, 3);
        assert_eq!(config.llm.retry_base_ms, 500);
        assert_eq!(config.agent.max_rounds, 5);
        assert_eq!(config.agent.shell_timeout_secs, 30);
        assert_eq!(config.agent.read_max_bytes, 5000);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[llm]\nmodel = \"llama3.1:8b\"").unwrap();

        let config = PatriotConfig::load_from(file.path()).unwrap();
        assert_eq!(config.llm.model, "llama3.1:8b");
        assert_eq!(config.llm.endpoint, "http://127.0.0.1:11434");
        assert_eq!(config.agent.max_rounds, 5);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[llm\nmodel=").unwrap();
        assert!(PatriotConfig::load_from(file.path()).is_err());
    }

    #[test]
    fn test_retry_policy_from_config() {
        let config = LlmConfig::default();
        let policy = config.retry_policy();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.base_delay, Duration::from_millis(500));
    }
}
