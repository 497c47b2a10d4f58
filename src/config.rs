use crate::error::{Error, Result};
use crate::registry::ModelEntry;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize)]
pub struct Config {
    /// Model table keyed by short name. A `[models]` section in the file
    /// replaces the builtin table wholesale.
    #[serde(default = "crate::registry::builtin_entries")]
    pub models: BTreeMap<String, ModelEntry>,
    #[serde(default)]
    pub request: RequestConfig,
    #[serde(default)]
    pub invoke: InvokeConfig,
}

/// Sampling knobs sent with every request.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestConfig {
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_top_p")]
    pub top_p: f64,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            top_p: default_top_p(),
        }
    }
}

impl RequestConfig {
    /// Apply CLI overrides on top of the configured defaults.
    pub fn with_overrides(
        &self,
        max_tokens: Option<u32>,
        temperature: Option<f64>,
        top_p: Option<f64>,
    ) -> Self {
        Self {
            max_tokens: max_tokens.unwrap_or(self.max_tokens),
            temperature: temperature.unwrap_or(self.temperature),
            top_p: top_p.unwrap_or(self.top_p),
        }
    }
}

/// How the external inference CLI is launched.
#[derive(Debug, Clone, Deserialize)]
pub struct InvokeConfig {
    /// Program name or path; tests point this at a stub executable.
    #[serde(default = "default_program")]
    pub program: String,
    /// Parent directory for per-run scratch dirs. System temp dir when unset.
    #[serde(default)]
    pub work_dir: Option<PathBuf>,
}

impl Default for InvokeConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            work_dir: None,
        }
    }
}

// Defaults
fn default_max_tokens() -> u32 {
    1024
}
fn default_temperature() -> f64 {
    0.7
}
fn default_top_p() -> f64 {
    0.9
}
fn default_program() -> String {
    "aws".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            models: crate::registry::builtin_entries(),
            request: RequestConfig::default(),
            invoke: InvokeConfig::default(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("Failed to read config {}: {e}", path.display())))?;
        toml::from_str(&content).map_err(|e| Error::config(format!("Failed to parse config: {e}")))
    }

    /// Load from `path`, falling back to defaults when the file is absent.
    /// A present-but-invalid file is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!(path = %path.display(), "no config file, using builtin defaults");
            Ok(Self::default())
        }
    }
}
