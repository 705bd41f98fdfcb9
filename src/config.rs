//! Tool configuration.
//!
//! Configuration is loaded in the following order (later overrides earlier):
//! 1. Default values
//! 2. YAML config file (if specified via FIELDWIRE_CONFIG or --config)
//! 3. Environment variables

use fieldwire_protocol::{ProtocolError, WriteFifo8Options, WriteFifo8Request};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Tool configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Request to encode, or to match replies against.
    pub request: Option<RequestConfig>,
    /// Output configuration.
    pub output: OutputConfig,
}

impl Config {
    /// Loads configuration from `path` (or FIELDWIRE_CONFIG), then applies
    /// environment variable overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let path = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var("FIELDWIRE_CONFIG").ok().map(PathBuf::from));
        if let Some(path) = path {
            config = Self::from_file(&path)?;
        }

        config.apply_env_overrides();

        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::Parse(path.to_path_buf(), e.to_string()))?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        self.output.apply_env_overrides();
    }

    /// Builds the configured request, validating its parameters.
    pub fn build_request(&self) -> Result<WriteFifo8Request, ConfigError> {
        match &self.request {
            Some(request) => Ok(request.build()?),
            None => Err(ConfigError::MissingRequest),
        }
    }
}

/// A request described by its function name and parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "function", rename_all = "snake_case")]
pub enum RequestConfig {
    WriteFifo8(WriteFifo8Options),
}

impl RequestConfig {
    pub fn build(&self) -> Result<WriteFifo8Request, ProtocolError> {
        match self {
            RequestConfig::WriteFifo8(options) => WriteFifo8Request::from_options(options.clone()),
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl OutputConfig {
    fn apply_env_overrides(&mut self) {
        if let Ok(pretty) = std::env::var("FIELDWIRE_PRETTY") {
            self.pretty = pretty == "1" || pretty.to_lowercase() == "true";
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {0:?}: {1}")]
    Io(PathBuf, std::io::Error),

    #[error("failed to parse config file {0:?}: {1}")]
    Parse(PathBuf, String),

    #[error("no request configured (use --config or --id/--values)")]
    MissingRequest,

    #[error("invalid request: {0}")]
    InvalidRequest(#[from] ProtocolError),
}
