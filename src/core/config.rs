//! Plant configuration
//!
//! Loaded from `config.yaml` in the data directory, falling back to the
//! user-level file (`<config dir>/carangos/config.yaml`) and then to the
//! built-in defaults. Missing keys take their default values.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::production::DEFAULT_MONTHLY_TARGET;

/// Config file name, both in the data directory and the user config dir
pub const CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config in {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Hours used when computing payroll
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayrollConfig {
    /// Regular hours per month for HR payslips
    pub payslip_hours: f64,
    /// Regular hours per month for finance cost reports (8h x 22 days)
    pub regular_hours: f64,
    /// Overtime hours per month for finance cost reports
    pub overtime_hours: f64,
}

impl Default for PayrollConfig {
    fn default() -> Self {
        Self {
            payslip_hours: 220.0,
            regular_hours: 176.0,
            overtime_hours: 10.0,
        }
    }
}

/// Plant-wide settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub payroll: PayrollConfig,

    /// Days per month the plant runs (24h a day)
    pub operating_days: u32,

    /// Monthly production target used when none is given
    pub production_target: f64,

    /// Sale price multiplier over unit cost
    pub sale_markup: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            payroll: PayrollConfig::default(),
            operating_days: 30,
            production_target: DEFAULT_MONTHLY_TARGET,
            sale_markup: 1.5,
        }
    }
}

impl Config {
    /// Load config for a data directory
    pub fn load(data_dir: &Path) -> Result<Self, ConfigError> {
        let local = data_dir.join(CONFIG_FILE);
        if local.is_file() {
            return Self::from_file(&local);
        }
        if let Some(user) = Self::user_config_path().filter(|p| p.is_file()) {
            return Self::from_file(&user);
        }
        Ok(Self::default())
    }

    /// Parse a single config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let mut config: Config = serde_yml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        if config.production_target.is_nan() || config.production_target <= 0.0 {
            tracing::warn!(
                path = %path.display(),
                production_target = config.production_target,
                "production_target must be positive, using {}",
                DEFAULT_MONTHLY_TARGET
            );
            config.production_target = DEFAULT_MONTHLY_TARGET;
        }
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// User-level config file location, if the platform has one
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "carangos").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Config file contents written by `init`
    pub fn default_template() -> String {
        let body = serde_yml::to_string(&Config::default()).unwrap_or_default();
        format!("# Carangos plant configuration\n{}", body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.payroll.regular_hours, 176.0);
        assert_eq!(config.payroll.overtime_hours, 10.0);
        assert_eq!(config.operating_days, 30);
        assert_eq!(config.production_target, 750.0);
        assert_eq!(config.sale_markup, 1.5);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join(CONFIG_FILE),
            "operating_days: 22\npayroll:\n  overtime_hours: 0\n",
        )
        .unwrap();

        let config = Config::load(tmp.path()).unwrap();
        assert_eq!(config.operating_days, 22);
        assert_eq!(config.payroll.overtime_hours, 0.0);
        assert_eq!(config.payroll.regular_hours, 176.0);
        assert_eq!(config.sale_markup, 1.5);
    }

    #[test]
    fn test_template_round_trips() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILE), Config::default_template()).unwrap();
        assert_eq!(Config::load(tmp.path()).unwrap(), Config::default());
    }

    #[test]
    fn test_nonpositive_production_target_is_replaced() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILE), "production_target: 0\n").unwrap();
        assert_eq!(Config::load(tmp.path()).unwrap().production_target, 750.0);

        std::fs::write(tmp.path().join(CONFIG_FILE), "production_target: -40\n").unwrap();
        assert_eq!(Config::load(tmp.path()).unwrap().production_target, 750.0);

        std::fs::write(tmp.path().join(CONFIG_FILE), "production_target: 900\n").unwrap();
        assert_eq!(Config::load(tmp.path()).unwrap().production_target, 900.0);
    }

    #[test]
    fn test_invalid_file_is_reported() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILE), "operating_days: [1, 2").unwrap();
        assert!(matches!(
            Config::load(tmp.path()),
            Err(ConfigError::Parse { .. })
        ));
    }
}
