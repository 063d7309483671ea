use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::risk::{FinancialInputs, MacroPlatformInputs, StructuralInputs, TechnicalInputs};

/// Environment variable naming the settings file
pub const CONFIG_FILE_ENV: &str = "RISK_CONFIG_FILE";
/// Settings file looked up when `RISK_CONFIG_FILE` is unset (any supported extension)
pub const DEFAULT_CONFIG_FILE: &str = "config/risk";
/// Prefix of environment overrides, e.g. `RISK_INPUTS__FINANCIAL__HEALTH_FACTOR=1.4`
pub const ENV_PREFIX: &str = "RISK";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub logging: LoggingSettings,
    pub inputs: InputSettings,
    pub collaborators: CollaboratorSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

/// Fixed inputs of each risk category
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    pub technical: TechnicalInputs,
    pub structural: StructuralInputs,
    pub macro_platform: MacroPlatformInputs,
    pub financial: FinancialInputs,
}

/// JSON result files for the sub-risk collaborators. Unset entries fall back
/// to the zero-score stubs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CollaboratorSettings {
    pub rsi_overbought: Option<PathBuf>,
    pub rsi_divergence: Option<PathBuf>,
    pub trend: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            level: "info".to_string(),
            format: LogFormat::Compact,
        }
    }
}

impl Settings {
    /// Defaults, then the optional settings file, then `RISK_*` environment overrides
    pub fn new() -> Result<Self, ConfigError> {
        let path = env::var(CONFIG_FILE_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
        Self::load(File::with_name(&path).required(false))
    }

    /// Settings from an explicit file, which must exist
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        Self::load(File::from(path).required(true))
    }

    fn load<S>(file: S) -> Result<Self, ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
