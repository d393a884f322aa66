//! Metro option aggregation
//!
//! Builds the selectable metro list from live geography rows, or from the
//! curated table when no live rows exist.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::metros::CURATED_METROS;
use super::states::{CbsaId, StateSelection};

/// A raw geography row: one (metro, state) slice of the dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoRow {
    pub cbsa_id: CbsaId,
    pub cbsa_name: String,
    pub state_fips: u32,
    pub population_weight: f64,
}

/// A selectable metro option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetroOption {
    pub id: CbsaId,
    pub label: String,
    /// Aggregated population weight; `None` for curated fallback options
    pub total_population: Option<f64>,
}

/// Group raw rows by metro id, summing population weight
///
/// With a state selected, only rows whose state code matches are kept.
/// The result is sorted by population, largest first; ties keep the order in
/// which each metro was first seen.
pub fn aggregate_metro_options(rows: &[GeoRow], state: &StateSelection) -> Vec<MetroOption> {
    let target_fips = state.fips();

    let mut index: HashMap<CbsaId, usize> = HashMap::new();
    let mut options: Vec<MetroOption> = Vec::new();

    for row in rows {
        if let Some(fips) = target_fips {
            if row.state_fips != fips {
                continue;
            }
        }

        match index.get(&row.cbsa_id) {
            Some(&i) => {
                if let Some(total) = options[i].total_population.as_mut() {
                    *total += row.population_weight;
                }
            }
            None => {
                index.insert(row.cbsa_id, options.len());
                options.push(MetroOption {
                    id: row.cbsa_id,
                    label: row.cbsa_name.clone(),
                    total_population: Some(row.population_weight),
                });
            }
        }
    }

    // sort_by is stable
    options.sort_by(|a, b| {
        let pa = a.total_population.unwrap_or(0.0);
        let pb = b.total_population.unwrap_or(0.0);
        pb.total_cmp(&pa)
    });
    options
}

/// Curated metros spanning the selected state, in table order
pub fn fallback_metro_options(state: &StateSelection) -> Vec<MetroOption> {
    CURATED_METROS
        .iter()
        .filter(|m| match state {
            StateSelection::National => true,
            StateSelection::State(s) => m.states.contains(&s.abbr),
        })
        .map(|m| MetroOption {
            id: CbsaId(m.id),
            label: m.name.to_string(),
            total_population: None,
        })
        .collect()
}

/// Choose between live aggregation and the curated fallback
///
/// `live_rows` is `None` when no live backend is connected. A connected
/// backend that returned no rows yields an empty list.
pub fn metro_options(live_rows: Option<&[GeoRow]>, state: &StateSelection) -> Vec<MetroOption> {
    match live_rows {
        Some(rows) => aggregate_metro_options(rows, state),
        None => fallback_metro_options(state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: u32, name: &str, fips: u32, pop: f64) -> GeoRow {
        GeoRow {
            cbsa_id: CbsaId(id),
            cbsa_name: name.to_string(),
            state_fips: fips,
            population_weight: pop,
        }
    }

    #[test]
    fn test_duplicate_rows_are_summed() {
        let rows = vec![
            row(12420, "Austin", 48, 1000.0),
            row(12420, "Austin", 48, 250.0),
        ];
        let options = aggregate_metro_options(&rows, &StateSelection::National);
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].id, CbsaId(12420));
        assert_eq!(options[0].total_population, Some(1250.0));
    }

    #[test]
    fn test_sorted_by_population_descending() {
        let rows = vec![
            row(1, "Small", 6, 10.0),
            row(2, "Large", 6, 500.0),
            row(3, "Medium", 6, 100.0),
        ];
        let labels: Vec<String> = aggregate_metro_options(&rows, &StateSelection::National)
            .into_iter()
            .map(|o| o.label)
            .collect();
        assert_eq!(labels, vec!["Large", "Medium", "Small"]);
    }

    #[test]
    fn test_state_prefilter_drops_other_states() {
        // New York metro spans NY (36) and NJ (34)
        let rows = vec![
            row(35620, "New York", 36, 900.0),
            row(35620, "New York", 34, 300.0),
            row(37980, "Philadelphia", 34, 200.0),
        ];
        let nj = StateSelection::parse("NJ").unwrap();
        let options = aggregate_metro_options(&rows, &nj);
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].id, CbsaId(35620));
        assert_eq!(options[0].total_population, Some(300.0));
        assert_eq!(options[1].id, CbsaId(37980));
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let rows = vec![row(5, "First", 1, 10.0), row(6, "Second", 1, 10.0)];
        let options = aggregate_metro_options(&rows, &StateSelection::National);
        assert_eq!(options[0].label, "First");
        assert_eq!(options[1].label, "Second");
    }

    #[test]
    fn test_fallback_filters_by_membership() {
        let tx = StateSelection::parse("TX").unwrap();
        let options = fallback_metro_options(&tx);
        let ids: Vec<u32> = options.iter().map(|o| o.id.0).collect();
        assert_eq!(ids, vec![19100, 26420, 41700, 12420]);
        assert!(options.iter().all(|o| o.total_population.is_none()));
    }

    #[test]
    fn test_fallback_national_is_full_table() {
        assert_eq!(fallback_metro_options(&StateSelection::National).len(), CURATED_METROS.len());
    }

    #[test]
    fn test_connected_without_rows_is_empty() {
        assert!(metro_options(Some(&[]), &StateSelection::National).is_empty());
        assert!(!metro_options(None, &StateSelection::National).is_empty());
    }
}
