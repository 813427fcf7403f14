//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly; parsing into domain/application types
//! happens at the wiring layer.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which model backend the process uses, selected once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendMode {
    /// Deterministic offline stand-in.
    Fixture,
    /// Live OpenAI-compatible endpoint.
    OpenAi,
}

impl std::str::FromStr for BackendMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fixture" | "offline" | "mock" => Ok(BackendMode::Fixture),
            "openai" | "live" => Ok(BackendMode::OpenAi),
            other => Err(format!(
                "unknown backend mode '{other}' (expected 'fixture' or 'openai')"
            )),
        }
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Backend selection and live-endpoint settings
    pub backend: FileBackendConfig,
    /// Solve loop settings
    pub solve: FileSolveConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Audit logging settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration, returning human-readable warnings.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.backend.parse_mode().is_err() {
            issues.push(format!(
                "backend.mode: unknown value '{}', falling back to 'fixture'",
                self.backend.mode
            ));
        }
        if self.backend.timeout_secs == 0 {
            issues.push("backend.timeout_secs: must be positive, using 60".to_string());
        }
        if !["full", "answer", "json"].contains(&self.output.format.to_lowercase().as_str()) {
            issues.push(format!(
                "output.format: unknown value '{}', falling back to 'full'",
                self.output.format
            ));
        }

        issues
    }
}

/// Backend selection (raw TOML structure)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBackendConfig {
    /// "fixture" or "openai"
    pub mode: String,
    /// Model identifier for the live backend
    pub model: String,
    /// Base URL of the OpenAI-compatible API
    pub base_url: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Direct API key (not recommended - use the env var instead)
    pub api_key: Option<String>,
    /// Per-call timeout in seconds
    pub timeout_secs: u64,
    /// Max tokens per response
    pub max_tokens: u32,
}

impl Default for FileBackendConfig {
    fn default() -> Self {
        Self {
            mode: "fixture".to_string(),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            timeout_secs: 60,
            max_tokens: 1024,
        }
    }
}

impl FileBackendConfig {
    /// Parse the configured mode.
    pub fn parse_mode(&self) -> Result<BackendMode, String> {
        self.mode.parse()
    }
}

/// Solve loop settings (raw TOML structure)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSolveConfig {
    /// Failed attempts tolerated before giving up
    pub max_retries: u32,
}

impl Default for FileSolveConfig {
    fn default() -> Self {
        Self { max_retries: 2 }
    }
}

/// Output settings (raw TOML structure)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// "full", "answer", or "json"
    pub format: String,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: "full".to_string(),
        }
    }
}

/// Audit logging settings (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Path of the JSONL audit log; disabled when unset
    pub audit_log: Option<PathBuf>,
}
