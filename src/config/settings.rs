//! Settings types

use serde::{Deserialize, Serialize};

use crate::compiler::{BodyEncoding, CompileOptions};

/// Estimated number of US adults, the denominator when no region total is known
pub const TOTAL_ADULTS: u64 = 260_000_000;

/// Everything that varies between deployments
///
/// Every field has a default, so an empty file is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub source: SourceSettings,
    pub body_encoding: BodyEncoding,
    pub calibration: CalibrationSettings,
    pub total_adults: u64,
    /// Ask for the selected metro's total weight alongside the match count
    pub include_region_denominator: bool,
    /// Quiet period before a burst of edits is evaluated
    pub debounce_ms: u64,
    /// Rows returned by the data inspector preview
    pub preview_rows: usize,
    pub narrative: NarrativeSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source: SourceSettings::default(),
            body_encoding: BodyEncoding::default(),
            calibration: CalibrationSettings::default(),
            total_adults: TOTAL_ADULTS,
            include_region_denominator: true,
            debounce_ms: 250,
            preview_rows: 5,
            narrative: NarrativeSettings::default(),
        }
    }
}

impl Settings {
    pub fn compile_options(&self) -> CompileOptions {
        CompileOptions {
            body_encoding: self.body_encoding,
            include_region_denominator: self.include_region_denominator,
        }
    }
}

/// Where the population data lives
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    /// Name the data is queried under
    pub table: String,
    /// Parquet file; absent means there is no live backend
    pub path: Option<String>,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            table: "population".to_string(),
            path: None,
        }
    }
}

/// Correction for datasets whose weights were never scaled up from the sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationSettings {
    /// Average weight below which the dataset counts as under-scaled
    pub low_weight_threshold: f64,
    /// Multiplier applied to weights of an under-scaled dataset
    pub sample_scale_factor: f64,
}

impl Default for CalibrationSettings {
    fn default() -> Self {
        Self {
            low_weight_threshold: 50.0,
            sample_scale_factor: 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrativeSettings {
    /// Environment variable holding the API key
    pub api_key_env: String,
    pub model: String,
    /// Base URL; the model name and `:generateContent` are appended
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for NarrativeSettings {
    fn default() -> Self {
        Self {
            api_key_env: "API_KEY".to_string(),
            model: "gemini-3-flash-preview".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta/models".to_string(),
            timeout_secs: 20,
        }
    }
}
