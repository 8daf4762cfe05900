//! Optional user configuration
//!
//! Presentation preferences only, read from a TOML file. Fee rates are
//! compiled into [`crate::fees::FeeSchedule`] and cannot be overridden here.
//!
//! ```toml
//! default_regime = "delivery"
//! color = false
//! json = false
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::ConfigError;
use crate::fees::Regime;

/// Environment variable pointing at an explicit config file
pub const CONFIG_ENV: &str = "ETFCALC_CONFIG";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Regime used when none is given on the command line
    pub default_regime: Option<Regime>,
    /// Colorized terminal output
    pub color: bool,
    /// Emit JSON instead of tables
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_regime: None,
            color: true,
            json: false,
        }
    }
}

impl Config {
    pub fn from_toml_str(contents: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Regime to use when the caller did not pick one
    pub fn regime_or_default(&self) -> Regime {
        self.default_regime.unwrap_or(Regime::Intraday)
    }
}

/// Default config location: `<config_home>/etfcalc/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dir_spec::config_home().map(|dir| dir.join("etfcalc").join("config.toml"))
}

/// Load configuration.
///
/// An explicit path (argument, then `ETFCALC_CONFIG`) must exist. The default
/// location is optional; when absent the built-in defaults apply.
pub fn load_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    let from_env = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
    let explicit = explicit.map(Path::to_path_buf).or(from_env);

    let path = match explicit {
        Some(path) => path,
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => {
                debug!("No config file found, using defaults");
                return Ok(Config::default());
            }
        },
    };

    info!("Loading config from {:?}", path);
    let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    Config::from_toml_str(&contents, &path)
}
