//! Whole-field edits applied to a filter snapshot

use std::collections::BTreeSet;

use super::bounds::{RangeSel, AGE_BOUNDS, HEIGHT_BOUNDS, INCOME_BOUNDS, RFM_BOUNDS, WAIST_BOUNDS};
use super::error::FilterError;
use super::state::{FilterState, FEMALE_HEIGHT_DEFAULT, MALE_HEIGHT_DEFAULT};
use super::vocab::{
    BodyType, BroadPolitics, BroadReligion, DetailedPolitics, DetailedReligion, Education, Gender,
    Habit, PhysicalFlags, Race, ViewMode,
};
use crate::geo::{CbsaId, StateSelection};

/// Minimum height (inches) required by the sixes preset
pub const SIXES_MIN_HEIGHT: i64 = 72;
/// Minimum income (thousands) required by the sixes preset
pub const SIXES_MIN_INCOME: i64 = 100;

/// One user interaction, expressed as a whole-field replacement
#[derive(Debug, Clone, PartialEq)]
pub enum FilterEdit {
    /// Change the state; always clears the metro
    SetState(StateSelection),
    SetMetro(Option<CbsaId>),
    /// Change gender; resets height to the gender's default range
    SetGender(Gender),
    SetAgeRange(i64, i64),
    SetIncomeRange(i64, i64),
    SetHeightRange(i64, i64),
    SetWaistRange(i64, i64),
    SetRfmRange(i64, i64),
    SetEducation(Education),
    SetPhysicalFlags(PhysicalFlags),
    SetBodyTypes(BTreeSet<BodyType>),
    /// Flip a body-type label and its categorical flag together
    ToggleBodyType(BodyType),
    SetRace(Race),
    SetSmoking(Habit),
    SetDrinking(Habit),
    SetExcludePeopleWithKids(bool),
    SetIncludeMarried(bool),
    SetPoliticsView(ViewMode),
    SetReligionView(ViewMode),
    SetPolitics(BroadPolitics),
    SetReligion(BroadReligion),
    SetPoliticsDetailed(BTreeSet<DetailedPolitics>),
    SetReligionDetailed(BTreeSet<DetailedReligion>),
    TogglePoliticsDetailed(DetailedPolitics),
    ToggleReligionDetailed(DetailedReligion),
    /// Six feet, six figures, six pack; resets everything when already active
    ApplySixesPreset,
    Reset,
}

impl FilterState {
    /// Produce the snapshot that results from one edit
    ///
    /// The receiver is left untouched. Range edits outside a field's domain or
    /// with `low > high` are rejected.
    pub fn apply(&self, edit: FilterEdit) -> Result<FilterState, FilterError> {
        let mut next = self.clone();
        match edit {
            FilterEdit::SetState(selection) => {
                next.selected_state = selection;
                next.selected_cbsa = None;
            }
            FilterEdit::SetMetro(metro) => next.selected_cbsa = metro,
            FilterEdit::SetGender(gender) => {
                next.gender = gender;
                next.height_range = match gender {
                    Gender::Male => MALE_HEIGHT_DEFAULT,
                    Gender::Female => FEMALE_HEIGHT_DEFAULT,
                };
            }
            FilterEdit::SetAgeRange(low, high) => next.age_range = RangeSel::within(low, high, AGE_BOUNDS)?,
            FilterEdit::SetIncomeRange(low, high) => {
                next.income_range = RangeSel::within(low, high, INCOME_BOUNDS)?
            }
            FilterEdit::SetHeightRange(low, high) => {
                next.height_range = RangeSel::within(low, high, HEIGHT_BOUNDS)?
            }
            FilterEdit::SetWaistRange(low, high) => {
                next.waist_range = RangeSel::within(low, high, WAIST_BOUNDS)?
            }
            FilterEdit::SetRfmRange(low, high) => next.rfm_range = RangeSel::within(low, high, RFM_BOUNDS)?,
            FilterEdit::SetEducation(education) => next.education = education,
            FilterEdit::SetPhysicalFlags(flags) => next.physical_flags = flags,
            FilterEdit::SetBodyTypes(types) => next.body_types = types,
            FilterEdit::ToggleBodyType(body_type) => {
                let flag = body_type.flag();
                let enabled = !next.physical_flags.get(flag);
                next.physical_flags.set(flag, enabled);
                if enabled {
                    next.body_types.insert(body_type);
                } else {
                    next.body_types.remove(&body_type);
                }
            }
            FilterEdit::SetRace(race) => next.race = race,
            FilterEdit::SetSmoking(habit) => next.smoking = habit,
            FilterEdit::SetDrinking(habit) => next.drinking = habit,
            FilterEdit::SetExcludePeopleWithKids(v) => next.exclude_people_with_kids = v,
            FilterEdit::SetIncludeMarried(v) => next.include_married = v,
            FilterEdit::SetPoliticsView(view) => next.politics_view = view,
            FilterEdit::SetReligionView(view) => next.religion_view = view,
            FilterEdit::SetPolitics(politics) => next.politics = politics,
            FilterEdit::SetReligion(religion) => next.religion = religion,
            FilterEdit::SetPoliticsDetailed(labels) => next.politics_detailed = labels,
            FilterEdit::SetReligionDetailed(labels) => next.religion_detailed = labels,
            FilterEdit::TogglePoliticsDetailed(label) => {
                if !next.politics_detailed.remove(&label) {
                    next.politics_detailed.insert(label);
                }
            }
            FilterEdit::ToggleReligionDetailed(label) => {
                if !next.religion_detailed.remove(&label) {
                    next.religion_detailed.insert(label);
                }
            }
            FilterEdit::ApplySixesPreset => {
                if self.is_sixes_preset_active() {
                    return Ok(FilterState::default());
                }
                next.gender = Gender::Male;
                let height_low = next.height_range.low().max(SIXES_MIN_HEIGHT);
                next.height_range =
                    RangeSel::new(height_low, next.height_range.high().max(height_low))?;
                let income_low = next.income_range.low().max(SIXES_MIN_INCOME);
                next.income_range =
                    RangeSel::new(income_low, next.income_range.high().max(income_low))?;
                next.physical_flags.abs = true;
            }
            FilterEdit::Reset => return Ok(FilterState::default()),
        }
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switching_state_clears_metro() {
        let state = FilterState::default()
            .apply(FilterEdit::SetState(StateSelection::parse("NY").unwrap()))
            .unwrap()
            .apply(FilterEdit::SetMetro(Some(CbsaId(35620))))
            .unwrap();
        assert_eq!(state.selected_cbsa, Some(CbsaId(35620)));

        let switched = state
            .apply(FilterEdit::SetState(StateSelection::parse("NJ").unwrap()))
            .unwrap();
        assert!(switched.selected_cbsa.is_none());
        assert_eq!(switched.selected_state.abbr(), "NJ");
        // the original snapshot is untouched
        assert_eq!(state.selected_cbsa, Some(CbsaId(35620)));
    }

    #[test]
    fn test_gender_resets_height() {
        let female = FilterState::default().apply(FilterEdit::SetGender(Gender::Female)).unwrap();
        assert_eq!(female.height_range, FEMALE_HEIGHT_DEFAULT);
        let male = female.apply(FilterEdit::SetGender(Gender::Male)).unwrap();
        assert_eq!(male.height_range, MALE_HEIGHT_DEFAULT);
    }

    #[test]
    fn test_range_edits_validated() {
        let state = FilterState::default();
        assert!(state.apply(FilterEdit::SetAgeRange(40, 30)).is_err());
        assert!(state.apply(FilterEdit::SetIncomeRange(0, 900)).is_err());
        let ok = state.apply(FilterEdit::SetAgeRange(25, 40)).unwrap();
        assert_eq!(ok.age_range.span(), 15);
    }

    #[test]
    fn test_toggle_body_type_keeps_flag_in_step() {
        let state = FilterState::default().apply(FilterEdit::ToggleBodyType(BodyType::Big)).unwrap();
        assert!(!state.physical_flags.obese);
        assert!(!state.body_types.contains(&BodyType::Big));

        let back = state.apply(FilterEdit::ToggleBodyType(BodyType::Big)).unwrap();
        assert!(back.physical_flags.obese);
        assert!(back.body_types.contains(&BodyType::Big));
    }

    #[test]
    fn test_toggle_detailed_labels() {
        let state = FilterState::default()
            .apply(FilterEdit::TogglePoliticsDetailed(DetailedPolitics::NotSure))
            .unwrap();
        assert!(!state.politics_detailed.contains(&DetailedPolitics::NotSure));
        let state = state
            .apply(FilterEdit::TogglePoliticsDetailed(DetailedPolitics::NotSure))
            .unwrap();
        assert!(state.politics_detailed.contains(&DetailedPolitics::NotSure));
    }

    #[test]
    fn test_sixes_preset_toggles() {
        let start = FilterState::default().apply(FilterEdit::SetGender(Gender::Female)).unwrap();
        let preset = start.apply(FilterEdit::ApplySixesPreset).unwrap();
        assert_eq!(preset.gender, Gender::Male);
        assert_eq!(preset.height_range.low(), 72);
        // female default tops out at 78, still above the raised floor
        assert_eq!(preset.height_range.high(), 78);
        assert_eq!(preset.income_range.low(), 100);
        assert!(preset.physical_flags.abs);
        assert!(preset.is_sixes_preset_active());

        let reset = preset.apply(FilterEdit::ApplySixesPreset).unwrap();
        assert_eq!(reset, FilterState::default());
    }

    #[test]
    fn test_sixes_preset_keeps_higher_bounds() {
        let state = FilterState::default()
            .apply(FilterEdit::SetIncomeRange(200, 500))
            .unwrap()
            .apply(FilterEdit::ApplySixesPreset)
            .unwrap();
        assert_eq!(state.income_range.low(), 200);
    }
}
