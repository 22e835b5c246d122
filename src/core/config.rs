//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.barconsole/config.toml`. If missing on first run, a
//! commented-out default is generated so operators can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use crate::client::{DEFAULT_APPLIANCE_URL, DEFAULT_SYSTEM_URL};
use crate::core::screen::ScreenId;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ConsoleFileConfig {
    #[serde(default)]
    pub appliance: EndpointConfig,
    #[serde(default)]
    pub system: EndpointConfig,
    #[serde(default)]
    pub console: ConsoleConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct EndpointConfig {
    pub url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ConsoleConfig {
    pub poll_interval_ms: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub default_screen: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_SCREEN: ScreenId = ScreenId::ListRecipes;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub appliance_url: String,
    pub system_url: String,
    pub poll_interval: Duration,
    pub request_timeout: Duration,
    pub default_screen: ScreenId,
}

/// Values given on the command line. `None` means "not specified".
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub appliance_url: Option<String>,
    pub system_url: Option<String>,
    pub poll_interval_ms: Option<u64>,
    pub screen: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.barconsole/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".barconsole").join("config.toml"))
}

/// Load config from `~/.barconsole/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ConsoleFileConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<ConsoleFileConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(ConsoleFileConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<ConsoleFileConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(ConsoleFileConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: ConsoleFileConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

const DEFAULT_CONFIG_FILE: &str = r#"# Bar Console Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [appliance]
# url = "http://localhost:5555"      # Or set BARCONSOLE_APPLIANCE_URL

# [system]
# url = "http://localhost:1234"      # Or set BARCONSOLE_SYSTEM_URL

# [console]
# poll_interval_ms = 1000            # Or set BARCONSOLE_POLL_INTERVAL_MS
# request_timeout_secs = 5
# default_screen = "list_recipes"    # Where the console starts and recovers to
"#;

fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG_FILE) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &ConsoleFileConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`] with an injectable environment lookup.
pub fn resolve_with_env(
    config: &ConsoleFileConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Appliance URL: CLI → env → config → default
    let appliance_url = cli
        .appliance_url
        .clone()
        .or_else(|| env("BARCONSOLE_APPLIANCE_URL"))
        .or_else(|| config.appliance.url.clone())
        .unwrap_or_else(|| DEFAULT_APPLIANCE_URL.to_string());

    let system_url = cli
        .system_url
        .clone()
        .or_else(|| env("BARCONSOLE_SYSTEM_URL"))
        .or_else(|| config.system.url.clone())
        .unwrap_or_else(|| DEFAULT_SYSTEM_URL.to_string());

    let poll_interval_ms = cli
        .poll_interval_ms
        .or_else(|| {
            let raw = env("BARCONSOLE_POLL_INTERVAL_MS")?;
            match raw.trim().parse() {
                Ok(ms) => Some(ms),
                Err(_) => {
                    warn!("Ignoring BARCONSOLE_POLL_INTERVAL_MS={raw:?}: not a number");
                    None
                }
            }
        })
        .or(config.console.poll_interval_ms)
        .unwrap_or(DEFAULT_POLL_INTERVAL_MS)
        .max(1);

    let request_timeout_secs = config
        .console
        .request_timeout_secs
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

    let default_screen = cli
        .screen
        .as_deref()
        .or(config.console.default_screen.as_deref())
        .map(|name| {
            ScreenId::from_name(name).unwrap_or_else(|| {
                warn!("Unknown default screen '{name}', using {DEFAULT_SCREEN}");
                DEFAULT_SCREEN
            })
        })
        .unwrap_or(DEFAULT_SCREEN);

    ResolvedConfig {
        appliance_url,
        system_url,
        poll_interval: Duration::from_millis(poll_interval_ms),
        request_timeout: Duration::from_secs(request_timeout_secs),
        default_screen,
    }
}
