//! Settings loader (verb module)
//!
//! Transforms a YAML settings file into [`Settings`].

mod error;
mod settings;

use std::path::Path;

pub use error::ConfigError;
pub use settings::{CalibrationSettings, NarrativeSettings, Settings, SourceSettings, TOTAL_ADULTS};

/// Parse settings from a YAML file
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Settings, ConfigError> {
    let path_str = path.as_ref().display().to_string();
    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io {
        path: path_str,
        source: e,
    })?;
    parse_str(&contents)
}

/// Parse settings from a YAML string
pub fn parse_str(yaml: &str) -> Result<Settings, ConfigError> {
    if yaml.trim().is_empty() {
        return Ok(Settings::default());
    }
    serde_yaml::from_str(yaml).map_err(ConfigError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::BodyEncoding;

    #[test]
    fn test_parse_empty_is_default() {
        assert_eq!(parse_str("").unwrap(), Settings::default());
    }

    #[test]
    fn test_parse_partial() {
        let settings = parse_str(
            "source:\n  path: data/population.parquet\nbody_encoding: derived_threshold\ncalibration:\n  sample_scale_factor: 50\n",
        )
        .unwrap();
        assert_eq!(settings.source.table, "population");
        assert_eq!(settings.source.path.as_deref(), Some("data/population.parquet"));
        assert_eq!(settings.body_encoding, BodyEncoding::DerivedThreshold);
        assert_eq!(settings.calibration.sample_scale_factor, 50.0);
        assert_eq!(settings.calibration.low_weight_threshold, 50.0);
        assert_eq!(settings.total_adults, 260_000_000);
    }

    #[test]
    fn test_parse_invalid_yaml() {
        assert!(matches!(parse_str("source: [valid: yaml"), Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_parse_missing_file() {
        let err = parse_file("does/not/exist.yaml").unwrap_err();
        assert!(err.to_string().contains("does/not/exist.yaml"));
    }
}
