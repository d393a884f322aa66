//! US states and the national selection

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::filter::FilterError;

/// Abbreviation used for "no geographic restriction"
pub const NATIONAL_ABBR: &str = "US";

/// A US state or territory with its FIPS code
#[derive(Debug, PartialEq, Eq)]
pub struct UsState {
    pub abbr: &'static str,
    pub name: &'static str,
    pub fips: u32,
}

const fn state(abbr: &'static str, name: &'static str, fips: u32) -> UsState {
    UsState { abbr, name, fips }
}

/// Every selectable state, in display order
pub static US_STATES: [UsState; 51] = [
    state("AL", "Alabama", 1),
    state("AK", "Alaska", 2),
    state("AZ", "Arizona", 4),
    state("AR", "Arkansas", 5),
    state("CA", "California", 6),
    state("CO", "Colorado", 8),
    state("CT", "Connecticut", 9),
    state("DE", "Delaware", 10),
    state("DC", "District of Columbia", 11),
    state("FL", "Florida", 12),
    state("GA", "Georgia", 13),
    state("HI", "Hawaii", 15),
    state("ID", "Idaho", 16),
    state("IL", "Illinois", 17),
    state("IN", "Indiana", 18),
    state("IA", "Iowa", 19),
    state("KS", "Kansas", 20),
    state("KY", "Kentucky", 21),
    state("LA", "Louisiana", 22),
    state("ME", "Maine", 23),
    state("MD", "Maryland", 24),
    state("MA", "Massachusetts", 25),
    state("MI", "Michigan", 26),
    state("MN", "Minnesota", 27),
    state("MS", "Mississippi", 28),
    state("MO", "Missouri", 29),
    state("MT", "Montana", 30),
    state("NE", "Nebraska", 31),
    state("NV", "Nevada", 32),
    state("NH", "New Hampshire", 33),
    state("NJ", "New Jersey", 34),
    state("NM", "New Mexico", 35),
    state("NY", "New York", 36),
    state("NC", "North Carolina", 37),
    state("ND", "North Dakota", 38),
    state("OH", "Ohio", 39),
    state("OK", "Oklahoma", 40),
    state("OR", "Oregon", 41),
    state("PA", "Pennsylvania", 42),
    state("RI", "Rhode Island", 44),
    state("SC", "South Carolina", 45),
    state("SD", "South Dakota", 46),
    state("TN", "Tennessee", 47),
    state("TX", "Texas", 48),
    state("UT", "Utah", 49),
    state("VT", "Vermont", 50),
    state("VA", "Virginia", 51),
    state("WA", "Washington", 53),
    state("WV", "West Virginia", 54),
    state("WI", "Wisconsin", 55),
    state("WY", "Wyoming", 56),
];

/// Look up a state by its two-letter abbreviation (case-insensitive)
pub fn find_state(abbr: &str) -> Option<&'static UsState> {
    US_STATES.iter().find(|s| s.abbr.eq_ignore_ascii_case(abbr))
}

/// The geographic scope chosen in the state selector
///
/// Serializes as the abbreviation, with `"US"` for the national scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StateSelection {
    /// No geographic restriction
    #[default]
    National,
    State(&'static UsState),
}

impl StateSelection {
    /// Parse an abbreviation; `"US"` selects the national scope
    pub fn parse(abbr: &str) -> Result<Self, FilterError> {
        if abbr.eq_ignore_ascii_case(NATIONAL_ABBR) {
            return Ok(StateSelection::National);
        }
        find_state(abbr)
            .map(StateSelection::State)
            .ok_or_else(|| FilterError::UnknownState(abbr.to_string()))
    }

    pub fn abbr(&self) -> &'static str {
        match self {
            StateSelection::National => NATIONAL_ABBR,
            StateSelection::State(s) => s.abbr,
        }
    }

    /// FIPS code of the selected state, `None` for national
    pub fn fips(&self) -> Option<u32> {
        match self {
            StateSelection::National => None,
            StateSelection::State(s) => Some(s.fips),
        }
    }

    pub fn is_national(&self) -> bool {
        matches!(self, StateSelection::National)
    }
}

impl fmt::Display for StateSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbr())
    }
}

impl TryFrom<String> for StateSelection {
    type Error = FilterError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        StateSelection::parse(&value)
    }
}

impl From<StateSelection> for String {
    fn from(value: StateSelection) -> Self {
        value.abbr().to_string()
    }
}

/// Identifier of a metropolitan/micropolitan statistical area (CBSA)
///
/// Numeric by construction so it can be placed in a query verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CbsaId(pub u32);

impl CbsaId {
    pub fn parse(raw: &str) -> Result<Self, FilterError> {
        raw.trim()
            .parse::<u32>()
            .map(CbsaId)
            .map_err(|_| FilterError::InvalidMetro(raw.to_string()))
    }
}

impl fmt::Display for CbsaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_national() {
        assert_eq!(StateSelection::parse("US").unwrap(), StateSelection::National);
        assert_eq!(StateSelection::parse("us").unwrap(), StateSelection::National);
    }

    #[test]
    fn test_parse_state_resolves_fips() {
        let sel = StateSelection::parse("CA").unwrap();
        assert_eq!(sel.fips(), Some(6));
        assert_eq!(sel.abbr(), "CA");
        assert!(!sel.is_national());
    }

    #[test]
    fn test_parse_unknown_state() {
        assert!(StateSelection::parse("ZZ").is_err());
    }

    #[test]
    fn test_state_selection_serde() {
        let json = serde_json::to_string(&StateSelection::parse("TX").unwrap()).unwrap();
        assert_eq!(json, "\"TX\"");
        let back: StateSelection = serde_json::from_str("\"US\"").unwrap();
        assert!(back.is_national());
        assert!(serde_json::from_str::<StateSelection>("\"XX\"").is_err());
    }

    #[test]
    fn test_cbsa_parse_rejects_text() {
        assert_eq!(CbsaId::parse("35620").unwrap(), CbsaId(35620));
        assert!(CbsaId::parse("35620 OR 1=1").is_err());
    }
}
