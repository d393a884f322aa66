//! Approximate incidence without a dataset
//!
//! Starts from certainty and multiplies in a fixed retention factor for each
//! restrictive choice. The factors are empirical and applied in a fixed
//! order so results are reproducible to the last bit.

use super::estimate::{Estimate, EstimateMode};
use crate::filter::{FilterState, Gender};

const MIN_PROBABILITY: f64 = 0.000001;

/// Probability that a random adult matches the filter
pub fn simulated_probability(filters: &FilterState) -> f64 {
    let mut p = 1.0_f64;

    // Geography
    if filters.selected_cbsa.is_some() {
        p *= 0.005;
    } else if !filters.selected_state.is_national() {
        p *= 0.02;
    }

    p *= filters.age_range.span() as f64 / 100.0;

    // Gender
    p *= 0.5;

    let income_floor = filters.income_range.low();
    if income_floor > 50 {
        p *= 0.6;
    }
    if income_floor > 100 {
        p *= 0.3;
    }
    if income_floor > 200 {
        p *= 0.1;
    }
    if income_floor > 400 {
        p *= 0.02;
    }

    let height_floor = filters.height_range.low();
    match filters.gender {
        Gender::Male => {
            if height_floor > 72 {
                p *= 0.15;
            }
            if height_floor > 74 {
                p *= 0.05;
            }
        }
        Gender::Female => {
            if height_floor > 67 {
                p *= 0.15;
            }
        }
    }

    let body_types = filters.body_types.len();
    if body_types < 3 {
        p *= 0.8;
    }
    if body_types < 2 {
        p *= 0.4;
    }

    if filters.politics.selected_count() < 4 {
        p *= 0.9;
    }
    if filters.religion.selected_count() < 4 {
        p *= 0.9;
    }

    // Dealbreakers
    if filters.exclude_people_with_kids {
        p *= 0.6;
    }
    if !filters.smoking.user {
        p *= 0.85;
    }
    if !filters.include_married {
        p *= 0.55;
    }

    p.clamp(MIN_PROBABILITY, 1.0)
}

/// Simulated estimate over `total_adults`
pub fn simulate(filters: &FilterState, total_adults: u64) -> Estimate {
    let p = simulated_probability(filters);
    Estimate {
        percentage: p * 100.0,
        population: (total_adults as f64 * p).round() as u64,
        mode: EstimateMode::Simulated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{BodyType, FilterEdit};
    use crate::geo::{CbsaId, StateSelection};

    #[test]
    fn test_metro_young_men() {
        let mut filters = FilterState::default();
        filters.selected_cbsa = Some(CbsaId(35620));

        let mut expected = 1.0_f64;
        expected *= 0.005;
        expected *= 17.0 / 100.0;
        expected *= 0.5;
        expected *= 0.6;

        let e = simulate(&filters, 260_000_000);
        assert_eq!(simulated_probability(&filters), expected);
        assert_eq!(e.population, (260_000_000.0 * expected).round() as u64);
        assert_eq!(e.population, 66_300);
        assert_eq!(e.mode, EstimateMode::Simulated);
    }

    #[test]
    fn test_state_factor() {
        let filters = FilterState::default()
            .apply(FilterEdit::SetState(StateSelection::parse("CA").unwrap()))
            .unwrap()
            .apply(FilterEdit::SetExcludePeopleWithKids(false))
            .unwrap();
        let expected = 1.0 * 0.02 * (17.0 / 100.0) * 0.5;
        assert_eq!(simulated_probability(&filters), expected);
    }

    #[test]
    fn test_income_and_height_thresholds_accumulate() {
        let filters = FilterState::default()
            .apply(FilterEdit::SetExcludePeopleWithKids(false))
            .unwrap()
            .apply(FilterEdit::SetIncomeRange(250, 500))
            .unwrap()
            .apply(FilterEdit::SetHeightRange(75, 90))
            .unwrap();
        let mut expected = 1.0_f64;
        expected *= 17.0 / 100.0;
        expected *= 0.5;
        expected *= 0.6;
        expected *= 0.3;
        expected *= 0.1;
        expected *= 0.15;
        expected *= 0.05;
        assert_eq!(simulated_probability(&filters), expected);
    }

    #[test]
    fn test_female_height_threshold() {
        let filters = FilterState::default()
            .apply(FilterEdit::SetGender(Gender::Female))
            .unwrap()
            .apply(FilterEdit::SetHeightRange(68, 78))
            .unwrap()
            .apply(FilterEdit::SetExcludePeopleWithKids(false))
            .unwrap();
        assert_eq!(simulated_probability(&filters), 0.17 * 0.5 * 0.15);
    }

    #[test]
    fn test_body_politics_and_dealbreakers() {
        let mut filters = FilterState::default();
        filters.body_types = [BodyType::Fit].into_iter().collect();
        filters.politics.apolitical = false;
        filters.religion.other = false;
        filters.smoking.user = false;
        filters.include_married = false;

        let mut expected = 1.0_f64;
        expected *= 17.0 / 100.0;
        expected *= 0.5;
        expected *= 0.8;
        expected *= 0.4;
        expected *= 0.9;
        expected *= 0.9;
        expected *= 0.6;
        expected *= 0.85;
        expected *= 0.55;
        assert_eq!(simulated_probability(&filters), expected);
    }

    #[test]
    fn test_clamped_to_floor() {
        let filters = FilterState::default().apply(FilterEdit::SetAgeRange(30, 30)).unwrap();
        assert_eq!(simulated_probability(&filters), 0.000001);
        assert_eq!(simulate(&filters, 260_000_000).population, 260);
    }
}
