//! # Node Configuration
//!
//! Defaults suitable for a local node, overridden from the environment:
//!
//! | Variable | Field |
//! |----------|-------|
//! | `PC_DATA_DIR` | `storage.data_dir` |
//! | `PC_UPLOAD_DIR` | `gateway.uploads.dir` |
//! | `PC_HTTP_HOST` | `gateway.http.host` |
//! | `PC_HTTP_PORT` | `gateway.http.port` |
//! | `PC_ENFORCE_SCORES` | `scoring.enforce` |
//! | `PC_LOG_LEVEL` | `logging.level` |
//! | `PC_JSON_LOGS` | `logging.json` |

use pc_02_chain_ledger::ScoringPolicy;
use pc_03_api_gateway::GatewayConfig;
use std::path::PathBuf;
use std::str::FromStr;

/// Complete node configuration.
#[derive(Debug, Clone, Default)]
pub struct NodeConfig {
    /// Ledger storage.
    pub storage: StorageConfig,
    /// HTTP API, including the upload directory.
    pub gateway: GatewayConfig,
    /// Media admission thresholds.
    pub scoring: ScoringPolicy,
    pub logging: LoggingConfig,
}

impl NodeConfig {
    /// Defaults overridden by `PC_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each `PC_*` key.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup("PC_DATA_DIR") {
            config.storage.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("PC_UPLOAD_DIR") {
            config.gateway.uploads.dir = PathBuf::from(dir);
        }
        if let Some(host) = lookup("PC_HTTP_HOST") {
            config.gateway.http.host = parse("PC_HTTP_HOST", &host)?;
        }
        if let Some(port) = lookup("PC_HTTP_PORT") {
            config.gateway.http.port = parse("PC_HTTP_PORT", &port)?;
        }
        if let Some(flag) = lookup("PC_ENFORCE_SCORES") {
            config.scoring.enforce = parse_flag("PC_ENFORCE_SCORES", &flag)?;
        }
        if let Some(level) = lookup("PC_LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Some(flag) = lookup("PC_JSON_LOGS") {
            config.logging.json = parse_flag("PC_JSON_LOGS", &flag)?;
        }

        Ok(config)
    }

    /// Validate configuration before anything touches the disk.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("data directory cannot be empty".into()));
        }
        if self.storage.data_dir == self.gateway.uploads.dir {
            return Err(ConfigError::Invalid(
                "upload directory must differ from the data directory".into(),
            ));
        }
        let policy = &self.scoring;
        if policy.min_std_dev > policy.max_std_dev {
            return Err(ConfigError::Invalid(format!(
                "scoring: min_std_dev {} exceeds max_std_dev {}",
                policy.min_std_dev, policy.max_std_dev
            )));
        }
        self.gateway.validate()?;
        Ok(())
    }
}

/// Storage configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Holds `chain.jsonl` and the `LOCK` file.
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
        }
    }
}

/// Logging configuration. `RUST_LOG` takes precedence over `level`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error(transparent)]
    Gateway(#[from] pc_03_api_gateway::ConfigError),
}

fn parse<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidValue {
            key,
            value: value.to_string(),
            reason: e.to_string(),
        })
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
            reason: "expected a boolean".into(),
        }),
    }
}
