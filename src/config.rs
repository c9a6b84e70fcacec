use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::Matcher;
use crate::models::MatchingWeights;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MatchingSettings {
    /// Top up short groups with random eligible pool members
    #[serde(default = "default_fill_shortfall")]
    pub fill_shortfall: bool,
    #[serde(default = "default_group_size")]
    pub default_group_size: usize,
    /// Size of the generated pool when a request brings none
    #[serde(default = "default_synthetic_pool_size")]
    pub synthetic_pool_size: usize,
    /// Fixed seed for reproducible runs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            fill_shortfall: default_fill_shortfall(),
            default_group_size: default_group_size(),
            synthetic_pool_size: default_synthetic_pool_size(),
            seed: None,
        }
    }
}

fn default_fill_shortfall() -> bool { true }
fn default_group_size() -> usize { 4 }
fn default_synthetic_pool_size() -> usize { 500 }

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WeightsConfig {
    #[serde(default = "default_activity_weight")]
    pub activity: f64,
    #[serde(default = "default_age_weight")]
    pub age: f64,
    #[serde(default = "default_distance_weight")]
    pub distance: f64,
    #[serde(default = "default_vibe_weight")]
    pub vibe: f64,
    #[serde(default = "default_religion_weight")]
    pub religion: f64,
    #[serde(default = "default_ethnicity_weight")]
    pub ethnicity: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            activity: default_activity_weight(),
            age: default_age_weight(),
            distance: default_distance_weight(),
            vibe: default_vibe_weight(),
            religion: default_religion_weight(),
            ethnicity: default_ethnicity_weight(),
        }
    }
}

fn default_activity_weight() -> f64 { 5.0 }
fn default_age_weight() -> f64 { 1.4 }
fn default_distance_weight() -> f64 { 1.0 }
// Vibe is off unless configured
fn default_vibe_weight() -> f64 { 0.0 }
fn default_religion_weight() -> f64 { 0.6 }
fn default_ethnicity_weight() -> f64 { 1.0 }

impl From<&WeightsConfig> for MatchingWeights {
    fn from(config: &WeightsConfig) -> Self {
        MatchingWeights {
            activity: config.activity,
            age: config.age,
            distance: config.distance,
            vibe: config.vibe,
            religion: config.religion,
            ethnicity: config.ethnicity,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with COALA__)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., COALA__MATCHING__FILL_SHORTFALL -> matching.fill_shortfall
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Weights from the `scoring.weights` section
    pub fn weights(&self) -> MatchingWeights {
        MatchingWeights::from(&self.scoring.weights)
    }

    /// Matcher configured from these settings, optionally with other weights
    pub fn matcher(&self, weights: Option<MatchingWeights>) -> Matcher {
        Matcher::new(weights.unwrap_or_else(|| self.weights()))
            .with_fill_shortfall(self.matching.fill_shortfall)
    }

    /// Render the effective settings as TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("COALA")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
