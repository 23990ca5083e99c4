//! Survey-schema configuration.
//!
//! Column labels in the reference survey exports are fixed Japanese
//! headings. They are configuration, not code: this module provides a
//! serde/TOML-loadable [`SchemaConfig`] whose defaults reproduce the
//! reference labels, so schema variants can be supported without touching
//! the loaders.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("No schema config file found: {0}")]
    NotFound(String),
}

/// Column-label schema for the segment and traffic CSV inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// Field separator for both CSV inputs.
    #[serde(default = "default_separator")]
    pub separator: char,
    #[serde(default)]
    pub segment: SegmentColumns,
    #[serde(default)]
    pub traffic: TrafficColumns,
}

/// Column labels of the segment geometry CSV.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentColumns {
    #[serde(default = "default_segment_id")]
    pub segment_id: String,
    #[serde(default = "default_start_x")]
    pub start_x: String,
    #[serde(default = "default_start_y")]
    pub start_y: String,
    #[serde(default = "default_end_x")]
    pub end_x: String,
    #[serde(default = "default_end_y")]
    pub end_y: String,
}

/// Column labels and header markers of the traffic survey CSV.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrafficColumns {
    #[serde(default = "default_traffic_segment_id")]
    pub segment_id: String,
    #[serde(default = "default_direction")]
    pub direction: String,
    /// Candidate lane-count column names; the first with a non-empty value
    /// wins.
    #[serde(default = "default_lane_columns")]
    pub lanes: Vec<String>,
    /// Marker phrase identifying volume-by-hour columns.
    #[serde(default = "default_hourly_volume_marker")]
    pub hourly_volume_marker: String,
    /// Marker identifying the hour slot inside a column label.
    #[serde(default = "default_hour_slot_marker")]
    pub hour_slot_marker: String,
    /// Columns carrying this marker are derived ratios, not volumes, and
    /// are excluded from hour detection.
    #[serde(default = "default_exclude_marker")]
    pub exclude_marker: String,
}

fn default_separator() -> char {
    ','
}

fn default_segment_id() -> String {
    "区間番号".to_string()
}

fn default_start_x() -> String {
    "start_x".to_string()
}

fn default_start_y() -> String {
    "start_y".to_string()
}

fn default_end_x() -> String {
    "end_x".to_string()
}

fn default_end_y() -> String {
    "end_y".to_string()
}

fn default_traffic_segment_id() -> String {
    "交通量調査単位区間番号".to_string()
}

fn default_direction() -> String {
    "上り・下りの別".to_string()
}

fn default_lane_columns() -> Vec<String> {
    vec!["代表車線数".to_string(), "車線数".to_string()]
}

fn default_hourly_volume_marker() -> String {
    "時間帯別自動車類交通量".to_string()
}

fn default_hour_slot_marker() -> String {
    "時台".to_string()
}

fn default_exclude_marker() -> String {
    "VC".to_string()
}

impl Default for SegmentColumns {
    fn default() -> Self {
        Self {
            segment_id: default_segment_id(),
            start_x: default_start_x(),
            start_y: default_start_y(),
            end_x: default_end_x(),
            end_y: default_end_y(),
        }
    }
}

impl Default for TrafficColumns {
    fn default() -> Self {
        Self {
            segment_id: default_traffic_segment_id(),
            direction: default_direction(),
            lanes: default_lane_columns(),
            hourly_volume_marker: default_hourly_volume_marker(),
            hour_slot_marker: default_hour_slot_marker(),
            exclude_marker: default_exclude_marker(),
        }
    }
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            separator: default_separator(),
            segment: SegmentColumns::default(),
            traffic: TrafficColumns::default(),
        }
    }
}

impl SchemaConfig {
    /// Load a schema configuration from a TOML file.
    ///
    /// Every field is optional in the file; omitted fields keep the
    /// reference-data defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::ReadError(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Load a schema configuration from the default locations.
    ///
    /// Searches for `schema.toml` in the current directory, a `config/`
    /// subdirectory, and the parent directory, in that order.
    pub fn from_default_location() -> ConfigResult<Self> {
        let search_paths = [
            PathBuf::from("schema.toml"),
            PathBuf::from("config/schema.toml"),
            PathBuf::from("../schema.toml"),
        ];

        for path in &search_paths {
            if path.exists() {
                return Self::from_file(path);
            }
        }

        Err(ConfigError::NotFound(
            "no schema.toml in standard locations".to_string(),
        ))
    }
}
