//! Geography (noun module)
//!
//! State and metro vocabularies, plus aggregation of metro options.

mod metros;
mod options;
mod states;

pub use metros::{find_curated_metro, CuratedMetro, CURATED_METROS};
pub use options::{aggregate_metro_options, fallback_metro_options, metro_options, GeoRow, MetroOption};
pub use states::{find_state, CbsaId, StateSelection, UsState, NATIONAL_ABBR, US_STATES};
