//! Configuration System
//!
//! Provides hierarchical configuration loading from:
//! - config.toml (default configuration)
//! - config.local.toml (git-ignored local overrides)
//! - Environment variables (SEMLABEL_* prefix)
//!
//! ## Example
//!
//! ```toml
//! # config.toml
//! [inference]
//! integer_density_threshold = 0.9
//!
//! [csv]
//! max_rows = 10000
//! ```
//!
//! Environment variable overrides:
//! ```bash
//! SEMLABEL_INFERENCE__INTEGER_DENSITY_THRESHOLD=0.85
//! SEMLABEL_CSV__MAX_ROWS=50000
//! ```

use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

/// Top-level configuration record, threaded by reference into every
/// `infer`/`route_statement` call. Never read from a process-wide global.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub inference: InferenceConfig,
    #[serde(default)]
    pub csv: CsvIngestConfig,
    #[serde(default)]
    pub rdf: RdfIngestConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Thresholds for the C2 column-type decision tree. Every numeric literal
/// named in the decision tree is configurable here; the defaults are the
/// ones the specification states.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Minimum integer density, exclusive, for an integer column to be
    /// reclassified as an Id column.
    #[serde(default = "default_integer_density_threshold")]
    pub integer_density_threshold: f64,
    /// Minimum unique-value count, exclusive, for the same reclassification.
    #[serde(default = "default_integer_density_min_unique")]
    pub integer_density_min_unique: u64,
    /// Maximum unique/non-null ratio, exclusive, for a string column to be
    /// classified as Categories.
    #[serde(default = "default_category_ratio_threshold")]
    pub category_ratio_threshold: f64,
    /// Maximum population stddev of string lengths, exclusive, for a
    /// string column (no internal whitespace) to be classified as Id.
    #[serde(default = "default_id_length_stddev_threshold")]
    pub id_length_stddev_threshold: f64,
    /// Minimum population stddev, exclusive, for a Float column to be
    /// considered coordinate-like (Latitude/Longitude).
    #[serde(default = "default_coordinate_stddev_threshold")]
    pub coordinate_stddev_threshold: f64,
    /// Exclusive bound for latitude refinement.
    #[serde(default = "default_latitude_bound")]
    pub latitude_bound: f64,
    /// Exclusive bound for longitude refinement.
    #[serde(default = "default_longitude_bound")]
    pub longitude_bound: f64,
}

fn default_integer_density_threshold() -> f64 {
    0.9
}
fn default_integer_density_min_unique() -> u64 {
    30
}
fn default_category_ratio_threshold() -> f64 {
    0.1
}
fn default_id_length_stddev_threshold() -> f64 {
    0.5
}
fn default_coordinate_stddev_threshold() -> f64 {
    10.0
}
fn default_latitude_bound() -> f64 {
    90.0
}
fn default_longitude_bound() -> f64 {
    180.0
}

impl Default for InferenceConfig {
    fn default() -> Self {
        InferenceConfig {
            integer_density_threshold: default_integer_density_threshold(),
            integer_density_min_unique: default_integer_density_min_unique(),
            category_ratio_threshold: default_category_ratio_threshold(),
            id_length_stddev_threshold: default_id_length_stddev_threshold(),
            coordinate_stddev_threshold: default_coordinate_stddev_threshold(),
            latitude_bound: default_latitude_bound(),
            longitude_bound: default_longitude_bound(),
        }
    }
}

/// CSV ingestion configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvIngestConfig {
    /// Rows beyond this count are reservoir-sampled rather than all read.
    #[serde(default = "default_max_rows")]
    pub max_rows: usize,
}

fn default_max_rows() -> usize {
    10_000
}

impl Default for CsvIngestConfig {
    fn default() -> Self {
        CsvIngestConfig { max_rows: default_max_rows() }
    }
}

/// RDF ingestion configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RdfIngestConfig {
    /// Fraction of *data* statements routed; ontology statements
    /// (`rdf:type`, `rdfs:*`, `owl:*`) are always routed regardless.
    #[serde(default = "default_sample_portion")]
    pub sample_portion: f64,
}

fn default_sample_portion() -> f64 {
    1.0
}

impl Default for RdfIngestConfig {
    fn default() -> Self {
        RdfIngestConfig { sample_portion: default_sample_portion() }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (text, json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "text".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig { level: default_log_level(), format: default_log_format() }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            inference: InferenceConfig::default(),
            csv: CsvIngestConfig::default(),
            rdf: RdfIngestConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// Merges in order:
    /// 1. Built-in `Default::default()`
    /// 2. `config.toml` (base configuration), if present
    /// 3. `config.local.toml` (local overrides, git-ignored), if present
    /// 4. Environment variables (`SEMLABEL_*` prefix, `__` nesting)
    pub fn load() -> Result<Self, figment::Error> {
        Figment::from(figment::providers::Serialized::defaults(Config::default()))
            .merge(Toml::file("config.toml"))
            .merge(Toml::file("config.local.toml"))
            .merge(Env::prefixed("SEMLABEL_").split("__"))
            .extract()
    }

    /// Load configuration from a specific file path.
    pub fn from_file(path: &str) -> Result<Self, figment::Error> {
        Figment::from(figment::providers::Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("SEMLABEL_").split("__"))
            .extract()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.csv.max_rows, 10_000);
        assert!((config.inference.integer_density_threshold - 0.9).abs() < 1e-9);
        assert_eq!(config.inference.integer_density_min_unique, 30);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        assert!(toml_str.contains("[inference]"));
        assert!(toml_str.contains("[csv]"));
        assert!(toml_str.contains("[rdf]"));
    }
}
