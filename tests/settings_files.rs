//! Integration tests for settings files
//!
//! Tests that deployment variants load from YAML and reach the compiler.

mod common;

use common::load_settings;
use poolstat::compiler::{compile_incidence_sql, BodyEncoding};
use poolstat::config::{self, ConfigError};
use poolstat::filter::{BodyType, FilterEdit, FilterState, Gender};
use poolstat::plan::Source;
use poolstat::{CbsaId, Session};

#[test]
fn test_live_settings() {
    let settings = load_settings("live.yaml");

    assert_eq!(settings.source.table, "population");
    assert_eq!(settings.source.path.as_deref(), Some("data/population.parquet"));
    assert_eq!(settings.body_encoding, BodyEncoding::DerivedThreshold);
    assert_eq!(settings.debounce_ms, 150);
    assert_eq!(settings.preview_rows, 10);
    assert_eq!(settings.narrative.api_key_env, "POOLSTAT_API_KEY");
    assert_eq!(settings.narrative.timeout_secs, 10);
    // Not in the file
    assert!(settings.narrative.endpoint.starts_with("https://"));
}

#[test]
fn test_derived_encoding_reaches_compiler() {
    let settings = load_settings("live.yaml");
    let source = Source::table(settings.source.table.as_str()).unwrap();
    let mut filters = FilterState::default()
        .apply(FilterEdit::SetGender(Gender::Female))
        .unwrap();
    filters.body_types = [BodyType::Fit].into_iter().collect();

    let sql = compile_incidence_sql(&filters, &source, &settings.compile_options());

    assert!(sql.contains("(bmi <= 25 AND grip_strength >= 63.0)"));
}

#[test]
fn test_legacy_settings_drop_region_totals() {
    let settings = load_settings("legacy.yaml");
    let source = Source::table(settings.source.table.as_str()).unwrap();
    let filters = FilterState::default()
        .apply(FilterEdit::SetMetro(Some(CbsaId(35620))))
        .unwrap();

    let sql = compile_incidence_sql(&filters, &source, &settings.compile_options());

    assert!(sql.contains("FROM pums_2019"));
    assert!(sql.contains("cbsa_id = 35620"));
    assert!(!sql.contains("total_region_population"));
    assert_eq!(settings.calibration.low_weight_threshold, 0.0);
    assert_eq!(settings.calibration.sample_scale_factor, 100.0);
}

#[test]
fn test_unknown_body_encoding_is_rejected() {
    let err = config::parse_file("tests/test_data/invalid.yaml").unwrap_err();
    assert!(matches!(err, ConfigError::Yaml(_)));
}

#[tokio::test]
async fn test_offline_settings_start_simulated_session() {
    let settings = load_settings("offline.yaml");
    assert!(settings.source.path.is_none());

    let mut session = Session::start(settings).await;
    let gauge = session.refresh().await.cloned().unwrap();
    let estimate = gauge.reading().unwrap().primary;

    assert_eq!(estimate.mode, poolstat::EstimateMode::Simulated);
    let expected = (258_000_000.0 * poolstat::interpreter::simulated_probability(session.filters())).round();
    assert_eq!(estimate.population, expected as u64);
}
