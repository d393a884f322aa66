//! The filter state snapshot

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::bounds::{RangeSel, AGE_BOUNDS, HEIGHT_BOUNDS, INCOME_BOUNDS, RFM_BOUNDS, WAIST_BOUNDS};
use super::error::FilterError;
use super::vocab::{
    BodyType, BroadPolitics, BroadReligion, DetailedPolitics, DetailedReligion, Education, Gender,
    Habit, PhysicalFlags, Race, ViewMode,
};
use crate::geo::{CbsaId, StateSelection};

/// Default height range when looking for men (5'6" to 7'6")
pub const MALE_HEIGHT_DEFAULT: RangeSel = RangeSel::unchecked(66, 90);
/// Default height range when looking for women (4'0" to 6'6")
pub const FEMALE_HEIGHT_DEFAULT: RangeSel = RangeSel::unchecked(48, 78);
/// Default age range
pub const AGE_DEFAULT: RangeSel = RangeSel::unchecked(18, 35);

/// Everything the user has selected
///
/// A snapshot is replaced whole on every edit (see [`FilterState::apply`]);
/// edits go through [`FilterEdit`](super::FilterEdit) so cross-field
/// invariants hold, e.g. changing the state clears the metro.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterState {
    // Geo
    pub selected_state: StateSelection,
    /// When set, restricts by metro instead of by state
    #[serde(rename = "selectedCBSA")]
    pub selected_cbsa: Option<CbsaId>,

    // Demographics
    pub gender: Gender,
    #[serde(deserialize_with = "domain::age")]
    pub age_range: RangeSel,

    // Socioeconomic
    /// Annual income in thousands
    #[serde(deserialize_with = "domain::income")]
    pub income_range: RangeSel,
    pub education: Education,

    // Physical
    /// Inches
    #[serde(deserialize_with = "domain::height")]
    pub height_range: RangeSel,
    #[serde(deserialize_with = "domain::waist")]
    pub waist_range: RangeSel,
    #[serde(deserialize_with = "domain::rfm")]
    pub rfm_range: RangeSel,
    pub physical_flags: PhysicalFlags,
    pub body_types: BTreeSet<BodyType>,

    // Background and lifestyle
    pub race: Race,
    pub smoking: Habit,
    pub drinking: Habit,

    // Dealbreakers
    pub exclude_people_with_kids: bool,
    pub include_married: bool,

    // Values
    pub politics_view: ViewMode,
    pub religion_view: ViewMode,
    pub politics: BroadPolitics,
    pub religion: BroadReligion,
    pub politics_detailed: BTreeSet<DetailedPolitics>,
    pub religion_detailed: BTreeSet<DetailedReligion>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            selected_state: StateSelection::National,
            selected_cbsa: None,
            gender: Gender::Male,
            age_range: AGE_DEFAULT,
            income_range: RangeSel::full(INCOME_BOUNDS),
            education: Education::default(),
            height_range: MALE_HEIGHT_DEFAULT,
            waist_range: RangeSel::full(WAIST_BOUNDS),
            rfm_range: RangeSel::full(RFM_BOUNDS),
            physical_flags: PhysicalFlags::default(),
            body_types: BodyType::ALL.into_iter().collect(),
            race: Race::default(),
            smoking: Habit::default(),
            drinking: Habit::default(),
            exclude_people_with_kids: true,
            include_married: true,
            politics_view: ViewMode::Broad,
            religion_view: ViewMode::Broad,
            politics: BroadPolitics::default(),
            religion: BroadReligion::default(),
            politics_detailed: DetailedPolitics::ALL.into_iter().collect(),
            religion_detailed: DetailedReligion::ALL.into_iter().collect(),
        }
    }
}

impl FilterState {
    /// Check every range against its field's domain
    ///
    /// Edits already guarantee this; snapshots assembled field by field may not.
    pub fn validate(&self) -> Result<(), FilterError> {
        self.age_range.check(AGE_BOUNDS)?;
        self.income_range.check(INCOME_BOUNDS)?;
        self.height_range.check(HEIGHT_BOUNDS)?;
        self.waist_range.check(WAIST_BOUNDS)?;
        self.rfm_range.check(RFM_BOUNDS)?;
        Ok(())
    }

    pub fn metro_selected(&self) -> bool {
        self.selected_cbsa.is_some()
    }

    /// The same selection with all geographic restriction lifted
    pub fn national_benchmark(&self) -> FilterState {
        FilterState {
            selected_state: StateSelection::National,
            selected_cbsa: None,
            ..self.clone()
        }
    }

    /// Whether the "six feet, six figures, six pack" preset is in effect
    pub fn is_sixes_preset_active(&self) -> bool {
        self.gender == Gender::Male
            && self.height_range.low() >= 72
            && self.income_range.low() >= 100
            && self.physical_flags.abs
    }
}

/// Range deserializers that reject values outside the field's domain
mod domain {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    use crate::filter::bounds::{
        Bounds, RangeSel, AGE_BOUNDS, HEIGHT_BOUNDS, INCOME_BOUNDS, RFM_BOUNDS, WAIST_BOUNDS,
    };

    fn within<'de, D: Deserializer<'de>>(deserializer: D, bounds: Bounds) -> Result<RangeSel, D::Error> {
        let sel = RangeSel::deserialize(deserializer)?;
        sel.check(bounds).map_err(D::Error::custom)?;
        Ok(sel)
    }

    pub fn age<'de, D: Deserializer<'de>>(deserializer: D) -> Result<RangeSel, D::Error> {
        within(deserializer, AGE_BOUNDS)
    }

    pub fn income<'de, D: Deserializer<'de>>(deserializer: D) -> Result<RangeSel, D::Error> {
        within(deserializer, INCOME_BOUNDS)
    }

    pub fn height<'de, D: Deserializer<'de>>(deserializer: D) -> Result<RangeSel, D::Error> {
        within(deserializer, HEIGHT_BOUNDS)
    }

    pub fn waist<'de, D: Deserializer<'de>>(deserializer: D) -> Result<RangeSel, D::Error> {
        within(deserializer, WAIST_BOUNDS)
    }

    pub fn rfm<'de, D: Deserializer<'de>>(deserializer: D) -> Result<RangeSel, D::Error> {
        within(deserializer, RFM_BOUNDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = FilterState::default();
        assert!(state.selected_state.is_national());
        assert!(state.selected_cbsa.is_none());
        assert_eq!((state.age_range.low(), state.age_range.high()), (18, 35));
        assert_eq!(state.body_types.len(), 4);
        assert_eq!(state.politics_detailed.len(), 6);
        assert_eq!(state.religion_detailed.len(), 11);
        assert!(state.exclude_people_with_kids);
        assert!(state.include_married);
    }

    #[test]
    fn test_national_benchmark_lifts_geography() {
        let mut state = FilterState::default();
        state.selected_state = StateSelection::parse("NY").unwrap();
        state.selected_cbsa = Some(CbsaId(35620));
        let bench = state.national_benchmark();
        assert!(bench.selected_state.is_national());
        assert!(bench.selected_cbsa.is_none());
        assert_eq!(bench.age_range, state.age_range);
    }

    #[test]
    fn test_json_uses_camel_case() {
        let json = serde_json::to_value(FilterState::default()).unwrap();
        assert_eq!(json["selectedState"], "US");
        assert_eq!(json["ageRange"], serde_json::json!([18, 35]));
        assert!(json["selectedCBSA"].is_null());
        assert_eq!(json["politicsView"], "broad");
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let state: FilterState =
            serde_json::from_str(r#"{"gender": "Female", "selectedCBSA": 31080}"#).unwrap();
        assert_eq!(state.gender, Gender::Female);
        assert_eq!(state.selected_cbsa, Some(CbsaId(31080)));
        assert_eq!(state.age_range, AGE_DEFAULT);
    }

    #[test]
    fn test_json_rejects_out_of_domain_ranges() {
        let err = serde_json::from_str::<FilterState>(r#"{"incomeRange":[0,9223372036854775807]}"#)
            .unwrap_err();
        assert!(err.to_string().contains("income range"));

        assert!(serde_json::from_str::<FilterState>(r#"{"ageRange":[10,30]}"#).is_err());
        assert!(serde_json::from_str::<FilterState>(r#"{"heightRange":[48,78]}"#).is_ok());
    }

    #[test]
    fn test_validate_catches_direct_assignment() {
        let mut state = FilterState::default();
        assert!(state.validate().is_ok());

        state.waist_range = RangeSel::new(0, 200).unwrap();
        assert!(matches!(
            state.validate(),
            Err(FilterError::OutOfBounds { field: "waist", .. })
        ));
    }

    #[test]
    fn test_partial_nested_groups() {
        let state: FilterState = serde_json::from_str(
            r#"{"education": {"noDegree": false}, "religion": {"agnosticAtheist": false}}"#,
        )
        .unwrap();
        assert!(!state.education.no_degree);
        assert!(state.education.grad_degree);
        assert!(!state.religion.agnostic_atheist);
        assert!(state.religion.christian);
        assert_eq!(state.physical_flags, PhysicalFlags::default());
    }
}
