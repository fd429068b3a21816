//! User configuration for the bulkkot fireworks card.
//!
//! Read once at startup from `config.toml` under the platform config
//! directory. Every field has a default, so a partial file — or none at
//! all — works; a malformed file falls back to the defaults rather than
//! aborting the show.

use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::Deserialize;

/// Milliseconds between automatic rocket launches.
const DEFAULT_LAUNCH_INTERVAL_MS: u64 = 600;

/// Number of background stars.
const DEFAULT_STAR_COUNT: usize = 200;

/// Year celebrated by the banner and the greeting.
const DEFAULT_YEAR: u32 = 2026;

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Milliseconds between automatic rocket launches.
    pub launch_interval_ms: u64,
    /// Number of background stars.
    pub star_count: usize,
    /// Year shown in the banner and the greeting.
    pub year: u32,
    /// Greeting lookup settings.
    pub greeting: GreetingConfig,
}

/// Settings for the location-based greeting.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GreetingConfig {
    /// Whether to look up a location at all.
    pub enabled: bool,
    /// Latitude for the precise city-level lookup. Setting both coordinates
    /// is the explicit opt-in for the reverse-geocoding request.
    pub latitude: Option<f64>,
    /// Longitude for the precise city-level lookup.
    pub longitude: Option<f64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            launch_interval_ms: DEFAULT_LAUNCH_INTERVAL_MS,
            star_count: DEFAULT_STAR_COUNT,
            year: DEFAULT_YEAR,
            greeting: GreetingConfig::default(),
        }
    }
}

impl Default for GreetingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            latitude: None,
            longitude: None,
        }
    }
}

impl Config {
    /// Load the configuration, falling back to the defaults on any failure.
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| fs::read_to_string(path).ok())
            .and_then(|text| toml::from_str(&text).ok())
            .unwrap_or_default()
    }

    /// Platform path of the configuration file, if one can be determined.
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "bulkkot").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

impl GreetingConfig {
    /// The opted-in coordinates, when both are present.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}
