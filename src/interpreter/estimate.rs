//! Estimates and how they are presented

use serde::Serialize;
use std::fmt;

/// Where an estimate came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EstimateMode {
    /// Computed from the dataset
    Live,
    /// Approximated from fixed retention factors
    Simulated,
}

/// Share of the reference population matching a filter
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Estimate {
    /// Percent, 0 to 100
    pub percentage: f64,
    pub population: u64,
    pub mode: EstimateMode,
}

impl Estimate {
    pub fn empty(mode: EstimateMode) -> Self {
        Self { percentage: 0.0, population: 0, mode }
    }

    pub fn scarcity(&self) -> Scarcity {
        Scarcity::of(self.percentage)
    }

    /// Below 0.01%
    pub fn is_unicorn(&self) -> bool {
        self.percentage < 0.01
    }
}

impl fmt::Display for Estimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}% (~{} people)", self.percentage, format_population(self.population))?;
        if self.mode == EstimateMode::Simulated {
            write!(f, " [simulated]")?;
        }
        Ok(())
    }
}

/// Coarse rarity bands over the percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scarcity {
    Common,
    Uncommon,
    Rare,
    VeryRare,
}

impl Scarcity {
    pub fn of(percentage: f64) -> Self {
        if percentage > 5.0 {
            Scarcity::Common
        } else if percentage > 1.0 {
            Scarcity::Uncommon
        } else if percentage > 0.1 {
            Scarcity::Rare
        } else {
            Scarcity::VeryRare
        }
    }
}

/// The estimate for a filter, plus the same filter nationwide when a metro is selected
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Reading {
    pub primary: Estimate,
    pub benchmark: Option<Estimate>,
}

/// What the gauge shows after an evaluation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum GaugeState {
    Ready(Reading),
    /// A live query failed; carries the executor's message verbatim
    Failed { message: String },
}

impl GaugeState {
    pub fn reading(&self) -> Option<&Reading> {
        match self {
            GaugeState::Ready(reading) => Some(reading),
            GaugeState::Failed { .. } => None,
        }
    }
}

/// Short human form of a head count: 950, 1.2K, 35K, 1.2M, 260M
pub fn format_population(population: u64) -> String {
    const UNITS: [(f64, &str); 4] = [(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];

    let n = population as f64;
    for (i, (scale, suffix)) in UNITS.iter().enumerate() {
        if n < *scale {
            continue;
        }
        let v = n / scale;
        let text = if v < 10.0 {
            let rounded = (v * 10.0).round() / 10.0;
            if rounded >= 10.0 {
                "10".to_string()
            } else {
                trim_fraction(format!("{:.1}", rounded))
            }
        } else {
            let rounded = v.round();
            // 999.6K reads as 1M
            if rounded >= 1000.0 && i > 0 {
                return format!("1{}", UNITS[i - 1].1);
            }
            format!("{}", rounded as u64)
        };
        return format!("{}{}", text, suffix);
    }
    population.to_string()
}

fn trim_fraction(text: String) -> String {
    match text.strip_suffix(".0") {
        Some(whole) => whole.to_string(),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scarcity_bands() {
        assert_eq!(Scarcity::of(12.0), Scarcity::Common);
        assert_eq!(Scarcity::of(5.0), Scarcity::Uncommon);
        assert_eq!(Scarcity::of(1.5), Scarcity::Uncommon);
        assert_eq!(Scarcity::of(0.5), Scarcity::Rare);
        assert_eq!(Scarcity::of(0.1), Scarcity::VeryRare);
    }

    #[test]
    fn test_unicorn() {
        let e = Estimate { percentage: 0.009, population: 23_400, mode: EstimateMode::Live };
        assert!(e.is_unicorn());
        assert!(!Estimate { percentage: 0.01, ..e }.is_unicorn());
    }

    #[test]
    fn test_format_population() {
        assert_eq!(format_population(0), "0");
        assert_eq!(format_population(950), "950");
        assert_eq!(format_population(1_000), "1K");
        assert_eq!(format_population(1_234), "1.2K");
        assert_eq!(format_population(35_400), "35K");
        assert_eq!(format_population(350_000), "350K");
        assert_eq!(format_population(999_700), "1M");
        assert_eq!(format_population(1_250_000), "1.3M");
        assert_eq!(format_population(66_300), "66K");
        assert_eq!(format_population(260_000_000), "260M");
    }

    #[test]
    fn test_display_marks_simulated() {
        let e = Estimate { percentage: 0.0255, population: 66_300, mode: EstimateMode::Simulated };
        assert_eq!(e.to_string(), "0.0% (~66K people) [simulated]");
    }
}
