//! Settings for budgets, renewals and display
//!
//! ## Configuration Resolution
//!
//! Settings are loaded with a two-layer resolution:
//! 1. An explicit path, or the override in the data dir
//!    (~/.local/share/subtrack/config.toml)
//! 2. Fall back to embedded defaults (compiled into binary)
//!
//! Keys missing from an override keep their default value.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::BudgetThresholds;

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/subtrack.toml");

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub budget: BudgetThresholds,
    /// Days ahead to look for renewals
    pub horizon_days: u32,
    /// Rows per page in list views
    pub page_size: i64,
    pub currency_symbol: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            budget: BudgetThresholds::default(),
            horizon_days: 30,
            page_size: 10,
            currency_symbol: "$".to_string(),
        }
    }
}

impl Settings {
    /// Load from `path` if given, else the data dir override, else defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let candidate = match path {
            Some(p) => {
                if !p.exists() {
                    return Err(Error::Config(format!(
                        "config file not found: {}",
                        p.display()
                    )));
                }
                Some(p.to_path_buf())
            }
            None => default_config_path().filter(|p| p.exists()),
        };

        let mut settings = parse_config(DEFAULT_CONFIG)?;
        if let Some(path) = candidate {
            debug!(path = %path.display(), "loading settings override");
            let content = fs::read_to_string(&path)?;
            settings = apply_overrides(settings, &content)?;
        } else {
            debug!("using embedded default settings");
        }
        Ok(settings)
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("subtrack").join("config.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    budget: Option<RawBudget>,
    renewals: Option<RawRenewals>,
    query: Option<RawQuery>,
    display: Option<RawDisplay>,
}

#[derive(Debug, Deserialize)]
struct RawBudget {
    monthly_portfolio_ceiling: Option<f64>,
    per_category_ceiling: Option<f64>,
    single_item_ceiling: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawRenewals {
    horizon_days: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawQuery {
    page_size: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct RawDisplay {
    currency_symbol: Option<String>,
}

/// Parse config from TOML content on top of the built-in defaults
pub fn parse_config(content: &str) -> Result<Settings> {
    apply_overrides(Settings::default(), content)
}

fn apply_overrides(mut settings: Settings, content: &str) -> Result<Settings> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    if let Some(budget) = raw.budget {
        if let Some(v) = budget.monthly_portfolio_ceiling {
            settings.budget.monthly_portfolio_ceiling = check_ceiling("monthly_portfolio_ceiling", v)?;
        }
        if let Some(v) = budget.per_category_ceiling {
            settings.budget.per_category_ceiling = check_ceiling("per_category_ceiling", v)?;
        }
        if let Some(v) = budget.single_item_ceiling {
            settings.budget.single_item_ceiling = check_ceiling("single_item_ceiling", v)?;
        }
    }

    if let Some(days) = raw.renewals.and_then(|r| r.horizon_days) {
        settings.horizon_days = days;
    }

    if let Some(size) = raw.query.and_then(|q| q.page_size) {
        if size < 1 {
            return Err(Error::InvalidPageSize(size));
        }
        settings.page_size = size;
    }

    if let Some(symbol) = raw.display.and_then(|d| d.currency_symbol) {
        settings.currency_symbol = symbol;
    }

    Ok(settings)
}

fn check_ceiling(name: &str, value: f64) -> Result<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::Config(format!(
            "{} must be a non-negative number, got {}",
            name, value
        )));
    }
    Ok(value)
}
