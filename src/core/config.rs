//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.storefront/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::Language;
use crate::catalog::DataUrls;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub paths: PathsConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub language: Option<Language>,
    pub theme: Option<String>,
    /// Where the root path `/` redirects. Empty string disables the redirect.
    pub home_path: Option<String>,
    pub origin: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DataConfig {
    pub base_url: Option<String>,
    pub header: Option<String>,
    pub home: Option<String>,
    pub products: Option<String>,
    pub categories: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PathsConfig {
    pub assets: Option<String>,
    pub img: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_THEME: &str = "maarts";
pub const DEFAULT_HOME_PATH: &str = "/home";
pub const DEFAULT_ORIGIN: &str = "http://localhost";
pub const DEFAULT_ASSETS_DIR: &str = "/assets/";
pub const DEFAULT_IMG_DIR: &str = "/assets/img/";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub language: Language,
    pub theme: String,
    pub home_path: Option<String>,
    pub origin: Url,
    pub base_url: String,
    pub data_urls: DataUrls,
    pub assets_dir: String,
    pub img_dir: String,
}

fn default_origin() -> Url {
    Url::parse(DEFAULT_ORIGIN).expect("default origin is a valid URL")
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            language: Language::default(),
            theme: DEFAULT_THEME.to_string(),
            home_path: Some(DEFAULT_HOME_PATH.to_string()),
            origin: default_origin(),
            base_url: DEFAULT_ORIGIN.to_string(),
            data_urls: DataUrls::default(),
            assets_dir: DEFAULT_ASSETS_DIR.to_string(),
            img_dir: DEFAULT_IMG_DIR.to_string(),
        }
    }
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

/// Returns the path to `~/.storefront/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".storefront").join("config.toml"))
}

/// Load config from `~/.storefront/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `StorefrontConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<StorefrontConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(StorefrontConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(StorefrontConfig::default());
    }

    load_config_from(&path)
}

/// Load config from an explicit path. A missing file is an error here.
pub fn load_config_from(path: &Path) -> Result<StorefrontConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: StorefrontConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Storefront Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# language = "de"                    # "en" or "de" (or STOREFRONT_LANG)
# theme = "maarts"
# home_path = "/home"                # "" disables the root redirect
# origin = "http://localhost"        # links to this host are routed in-app

# [data]
# base_url = "http://localhost"      # Or set STOREFRONT_BASE_URL env var
# header = "/assets/data/header.json"
# home = "/assets/data/home.json"
# products = "/assets/data/shop-products.json"
# categories = "/assets/data/shop-categories.json"

# [paths]
# assets = "/assets/"
# img = "/assets/img/"
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_language` and `cli_base_url` are from CLI flags (None = not specified).
pub fn resolve(
    config: &StorefrontConfig,
    cli_language: Option<Language>,
    cli_base_url: Option<&str>,
) -> ResolvedConfig {
    // Language: CLI → env → config → system locale → default
    let language = cli_language
        .or_else(|| {
            std::env::var("STOREFRONT_LANG")
                .ok()
                .and_then(|s| Language::parse(&s))
        })
        .or(config.general.language)
        .or_else(|| std::env::var("LANG").ok().map(|l| Language::from_locale(&l)))
        .unwrap_or_default();

    // Origin: env → config → default
    let origin_str = std::env::var("STOREFRONT_ORIGIN")
        .ok()
        .or_else(|| config.general.origin.clone())
        .unwrap_or_else(|| DEFAULT_ORIGIN.to_string());
    let origin = match Url::parse(&origin_str) {
        Ok(url) => url,
        Err(e) => {
            warn!("Invalid origin {:?} ({}), using {}", origin_str, e, DEFAULT_ORIGIN);
            default_origin()
        }
    };

    // Data base URL: CLI → env → config → origin
    let base_url = cli_base_url
        .map(|s| s.to_string())
        .or_else(|| std::env::var("STOREFRONT_BASE_URL").ok())
        .or_else(|| config.data.base_url.clone())
        .unwrap_or_else(|| origin.as_str().trim_end_matches('/').to_string());

    // Home path: env → config → default; empty disables the redirect
    let home_path = std::env::var("STOREFRONT_HOME_PATH")
        .ok()
        .or_else(|| config.general.home_path.clone())
        .unwrap_or_else(|| DEFAULT_HOME_PATH.to_string());
    let home_path = (!home_path.is_empty()).then_some(home_path);

    let defaults = DataUrls::default();
    let data_urls = DataUrls {
        header: config.data.header.clone().unwrap_or(defaults.header),
        home: config.data.home.clone().unwrap_or(defaults.home),
        products: config.data.products.clone().unwrap_or(defaults.products),
        categories: config.data.categories.clone().unwrap_or(defaults.categories),
    };

    ResolvedConfig {
        language,
        theme: config
            .general
            .theme
            .clone()
            .unwrap_or_else(|| DEFAULT_THEME.to_string()),
        home_path,
        origin,
        base_url,
        data_urls,
        assets_dir: config
            .paths
            .assets
            .clone()
            .unwrap_or_else(|| DEFAULT_ASSETS_DIR.to_string()),
        img_dir: config
            .paths
            .img
            .clone()
            .unwrap_or_else(|| DEFAULT_IMG_DIR.to_string()),
    }
}
