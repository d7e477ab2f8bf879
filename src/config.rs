use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default reporting (domestic) currency.
fn default_reporting_currency() -> String {
    "CNY".to_string()
}

/// Default foreign currency for the second holdings group.
fn default_foreign_currency() -> String {
    "USD".to_string()
}

/// Default reporting timezone (UTC+8).
fn default_reporting_timezone() -> String {
    "Asia/Shanghai".to_string()
}

/// FX rate used until the first successful fetch is persisted.
fn default_fx_rate() -> Decimal {
    Decimal::new(725, 2)
}

fn default_token_env() -> String {
    "FINNHUB_KEY".to_string()
}

/// Quote provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Name of the env var holding the Finnhub API token.
    ///
    /// When the var is unset or empty, the foreign-equity price refresh is
    /// skipped entirely and valuation proceeds with last-known prices.
    pub finnhub_token_env: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            finnhub_token_env: default_token_env(),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the portfolio state file. If relative, resolved from the
    /// config file location. Defaults to `portfolio.json`.
    pub state_file: Option<PathBuf>,

    /// Currency all totals are reported in.
    #[serde(default = "default_reporting_currency")]
    pub reporting_currency: String,

    /// Currency the foreign holdings group and foreign cash are held in.
    #[serde(default = "default_foreign_currency")]
    pub foreign_currency: String,

    /// IANA timezone deciding which calendar day a run belongs to.
    #[serde(default = "default_reporting_timezone")]
    pub reporting_timezone: String,

    /// FX rate assumed before the first successful fetch.
    #[serde(default = "default_fx_rate", with = "rust_decimal::serde::float")]
    pub default_fx_rate: Decimal,

    /// Quote provider settings.
    #[serde(default)]
    pub providers: ProviderConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            state_file: None,
            reporting_currency: default_reporting_currency(),
            foreign_currency: default_foreign_currency(),
            reporting_timezone: default_reporting_timezone(),
            default_fx_rate: default_fx_rate(),
            providers: ProviderConfig::default(),
        }
    }
}

impl Config {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load config from a file, or return default config if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Resolve the state file path.
    ///
    /// If `state_file` is set and relative, it's resolved relative to
    /// `config_dir`. If not set, defaults to `portfolio.json` in `config_dir`.
    pub fn resolve_state_file(&self, config_dir: &Path) -> PathBuf {
        match &self.state_file {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => config_dir.join(path),
            None => config_dir.join("portfolio.json"),
        }
    }

    fn parse_timezone(&self) -> Result<Tz> {
        self.reporting_timezone
            .parse::<Tz>()
            .map_err(|err| anyhow::anyhow!(err))
            .with_context(|| format!("Invalid reporting timezone: {}", self.reporting_timezone))
    }
}

/// Loaded configuration with resolved paths and a parsed timezone.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// The resolved portfolio state file path.
    pub state_file: PathBuf,

    /// Currency all totals are reported in.
    pub reporting_currency: String,

    /// Currency the foreign holdings group is held in.
    pub foreign_currency: String,

    /// Timezone deciding which calendar day a run belongs to.
    pub reporting_timezone: Tz,

    /// FX rate assumed before the first successful fetch.
    pub default_fx_rate: Decimal,

    /// Quote provider settings.
    pub providers: ProviderConfig,
}

/// Returns the default config file path.
///
/// Resolution order:
/// 1. `./snapfolio.toml` if it exists in current directory
/// 2. `~/.local/share/snapfolio/snapfolio.toml` (XDG data directory)
pub fn default_config_path() -> PathBuf {
    let local_config = PathBuf::from("snapfolio.toml");
    if local_config.exists() {
        return local_config;
    }

    // XDG data directory fallback
    if let Some(data_dir) = dirs::data_dir() {
        return data_dir.join("snapfolio").join("snapfolio.toml");
    }

    // Final fallback to local
    local_config
}

impl ResolvedConfig {
    /// Load and resolve config from a file path.
    ///
    /// The state file is resolved relative to the config file's parent
    /// directory.
    pub fn load(config_path: &Path) -> Result<Self> {
        let config_path = config_path
            .canonicalize()
            .with_context(|| format!("Config file not found: {}", config_path.display()))?;

        let config_dir = config_path
            .parent()
            .context("Config file has no parent directory")?;

        let config = Config::load(&config_path)?;
        Self::resolve(config, config_dir)
    }

    /// Load config, creating a default if the file doesn't exist.
    ///
    /// If the config file doesn't exist, the config file's intended parent
    /// directory anchors the state file.
    pub fn load_or_default(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            return Self::load(config_path);
        }

        let config_path = if config_path.is_relative() {
            std::env::current_dir()
                .context("Failed to get current directory")?
                .join(config_path)
        } else {
            config_path.to_path_buf()
        };

        let config_dir = config_path
            .parent()
            .context("Config path has no parent directory")?;

        Self::resolve(Config::default(), config_dir)
    }

    fn resolve(config: Config, config_dir: &Path) -> Result<Self> {
        let reporting_timezone = config.parse_timezone()?;
        let state_file = config.resolve_state_file(config_dir);

        Ok(Self {
            state_file,
            reporting_currency: config.reporting_currency,
            foreign_currency: config.foreign_currency,
            reporting_timezone,
            default_fx_rate: config.default_fx_rate,
            providers: config.providers,
        })
    }
}
