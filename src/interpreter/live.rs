//! Reading the incidence query's answer

use super::estimate::{Estimate, EstimateMode};
use crate::compiler::columns::{OUT_TOTAL_REGION_POPULATION, OUT_WEIGHTED_POPULATION};
use crate::config::CalibrationSettings;
use crate::executor::Row;

/// Weight correction for datasets that were never scaled up from their sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calibration {
    /// Dataset-wide mean person weight, if it could be measured
    pub average_weight: Option<f64>,
    pub low_weight_threshold: f64,
    pub sample_scale_factor: f64,
}

impl Calibration {
    pub fn new(settings: &CalibrationSettings, average_weight: Option<f64>) -> Self {
        Self {
            // a non-positive mean says nothing about scaling
            average_weight: average_weight.filter(|w| *w > 0.0),
            low_weight_threshold: settings.low_weight_threshold,
            sample_scale_factor: settings.sample_scale_factor,
        }
    }

    /// Multiplier to apply to a summed weight
    pub fn factor(&self, weighted_population: f64) -> f64 {
        match self.average_weight {
            Some(avg) if avg < self.low_weight_threshold && weighted_population > 0.0 => {
                self.sample_scale_factor
            }
            _ => 1.0,
        }
    }
}

impl Default for Calibration {
    fn default() -> Self {
        Self::new(&CalibrationSettings::default(), None)
    }
}

/// Turn the incidence query's rows into an estimate
///
/// No rows means nobody matched. When `region_filter_active` and the query
/// returned a positive region total, the percentage is relative to that
/// region; otherwise it is relative to `total_adults`.
pub fn interpret_rows(
    rows: &[Row],
    calibration: &Calibration,
    region_filter_active: bool,
    total_adults: u64,
) -> Estimate {
    let Some(row) = rows.first() else {
        return Estimate::empty(EstimateMode::Live);
    };

    let raw = row.f64(OUT_WEIGHTED_POPULATION).unwrap_or(0.0);
    let factor = calibration.factor(raw);
    let weighted = raw * factor;

    let region_total = if region_filter_active {
        row.f64(OUT_TOTAL_REGION_POPULATION)
            .filter(|total| *total > 0.0)
            .map(|total| total * factor)
    } else {
        None
    };
    let denominator = region_total.unwrap_or(total_adults as f64);

    let percentage = if denominator > 0.0 {
        weighted / denominator * 100.0
    } else {
        0.0
    };

    Estimate {
        percentage,
        population: weighted.max(0.0).round() as u64,
        mode: EstimateMode::Live,
    }
}
