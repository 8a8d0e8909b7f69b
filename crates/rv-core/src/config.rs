//! Report configuration resolution for rv-core.
//!
//! Resolution order (highest to lowest priority):
//! 1. Explicit `--config <FILE>` flag
//! 2. `RV_CONFIG` environment variable
//! 3. `RV_CONFIG_DIR/report.json`
//! 4. `<user config dir>/receipt-viewer/report.json`
//! 5. Built-in defaults
//!
//! Explicit files (1 and 2) must exist; directory candidates are skipped
//! when absent.

use rv_report::{ReportConfig, ReportError};
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "RV_CONFIG";

/// Environment variable naming a config directory.
pub const CONFIG_DIR_ENV: &str = "RV_CONFIG_DIR";

/// Config directory name under the user's config directory.
const CONFIG_DIR_NAME: &str = "receipt-viewer";

/// Config file name inside a config directory.
pub const CONFIG_FILE_NAME: &str = "report.json";

/// Errors that can occur during config loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("I/O error reading {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: ReportError,
    },
}

/// Where the effective configuration came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigSource {
    Flag,
    Env,
    ConfigDir,
    UserConfigDir,
    Defaults,
}

/// Candidate locations, in priority order.
#[derive(Debug, Default, Clone)]
pub struct ConfigOptions {
    /// `--config` flag.
    pub config_path: Option<PathBuf>,
    /// `RV_CONFIG`.
    pub env_path: Option<PathBuf>,
    /// `RV_CONFIG_DIR`.
    pub config_dir: Option<PathBuf>,
    /// Platform config directory.
    pub user_config_dir: Option<PathBuf>,
}

impl ConfigOptions {
    /// Candidates from the flag, the environment and the platform.
    pub fn from_env(config_path: Option<PathBuf>) -> Self {
        Self {
            config_path,
            env_path: std::env::var_os(CONFIG_ENV).map(PathBuf::from),
            config_dir: std::env::var_os(CONFIG_DIR_ENV).map(PathBuf::from),
            user_config_dir: dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME)),
        }
    }
}

/// Resolved configuration with provenance information.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedConfig {
    /// Effective report configuration.
    pub report: ReportConfig,
    /// Which candidate supplied it.
    pub source: ConfigSource,
    /// File it was read from (None for defaults).
    pub path: Option<PathBuf>,
}

/// Load configuration with the standard resolution order.
pub fn load_config(options: &ConfigOptions) -> Result<ResolvedConfig, ConfigError> {
    if let Some(path) = &options.config_path {
        return load_required(path, ConfigSource::Flag);
    }

    if let Some(path) = &options.env_path {
        return load_required(path, ConfigSource::Env);
    }

    let dir_candidates = [
        (options.config_dir.as_ref(), ConfigSource::ConfigDir),
        (options.user_config_dir.as_ref(), ConfigSource::UserConfigDir),
    ];
    for (dir, source) in dir_candidates {
        let Some(dir) = dir else { continue };
        let path = dir.join(CONFIG_FILE_NAME);
        if path.is_file() {
            return load_from_file(&path, source);
        }
    }

    debug!("No report config found; using defaults");
    Ok(ResolvedConfig {
        report: ReportConfig::default(),
        source: ConfigSource::Defaults,
        path: None,
    })
}

fn load_required(path: &Path, source: ConfigSource) -> Result<ResolvedConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }
    load_from_file(path, source)
}

fn load_from_file(path: &Path, source: ConfigSource) -> Result<ResolvedConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let report = ReportConfig::from_json(&content).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        source: e,
    })?;

    debug!(path = %path.display(), ?source, "Loaded report config");
    Ok(ResolvedConfig {
        report,
        source,
        path: Some(path.to_path_buf()),
    })
}
