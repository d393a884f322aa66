//! Enumerated vocabularies of the filter state

use serde::{Deserialize, Serialize};
use std::fmt;

/// Gender of the person being looked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    /// Binary sex code used by the dataset
    pub fn sex_code(&self) -> i64 {
        match self {
            Gender::Male => 1,
            Gender::Female => 2,
        }
    }

    /// Body-type labels offered for this gender
    pub fn body_types(&self) -> [BodyType; 3] {
        match self {
            Gender::Male => [BodyType::Thin, BodyType::Fit, BodyType::Big],
            Gender::Female => [BodyType::Thin, BodyType::Fit, BodyType::Curvy],
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
        }
    }
}

/// Body-type label
///
/// Female labels are Thin/Fit/Curvy, male labels Thin/Fit/Big.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BodyType {
    Thin,
    Fit,
    Curvy,
    Big,
}

impl BodyType {
    pub const ALL: [BodyType; 4] = [BodyType::Thin, BodyType::Fit, BodyType::Curvy, BodyType::Big];

    /// The categorical flag this label toggles
    pub fn flag(&self) -> BodyFlag {
        match self {
            BodyType::Thin => BodyFlag::Thin,
            BodyType::Fit => BodyFlag::Fit,
            BodyType::Curvy => BodyFlag::Overweight,
            BodyType::Big => BodyFlag::Obese,
        }
    }
}

impl fmt::Display for BodyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BodyType::Thin => "Thin",
            BodyType::Fit => "Fit",
            BodyType::Curvy => "Curvy",
            BodyType::Big => "Big",
        };
        f.write_str(s)
    }
}

/// Body-composition category flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyFlag {
    Thin,
    Fit,
    Overweight,
    Obese,
}

/// Inclusion flags over body-composition categories, plus the "abs" requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PhysicalFlags {
    pub thin: bool,
    pub fit: bool,
    pub abs: bool,
    pub overweight: bool,
    pub obese: bool,
}

impl PhysicalFlags {
    pub fn get(&self, flag: BodyFlag) -> bool {
        match flag {
            BodyFlag::Thin => self.thin,
            BodyFlag::Fit => self.fit,
            BodyFlag::Overweight => self.overweight,
            BodyFlag::Obese => self.obese,
        }
    }

    pub fn set(&mut self, flag: BodyFlag, value: bool) {
        match flag {
            BodyFlag::Thin => self.thin = value,
            BodyFlag::Fit => self.fit = value,
            BodyFlag::Overweight => self.overweight = value,
            BodyFlag::Obese => self.obese = value,
        }
    }
}

impl Default for PhysicalFlags {
    fn default() -> Self {
        Self { thin: true, fit: true, abs: false, overweight: true, obese: true }
    }
}

/// Degree levels; all three set means no restriction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub no_degree: bool,
    pub college: bool,
    pub grad_degree: bool,
}

impl Default for Education {
    fn default() -> Self {
        Self { no_degree: true, college: true, grad_degree: true }
    }
}

/// Race/ethnicity categories; all five set means no restriction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Race {
    pub white: bool,
    pub black: bool,
    pub asian: bool,
    pub hispanic: bool,
    pub other: bool,
}

impl Default for Race {
    fn default() -> Self {
        Self { white: true, black: true, asian: true, hispanic: true, other: true }
    }
}

/// Acceptability of a habit (smoking, drinking)
///
/// Only `user` is consulted when compiling queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Habit {
    pub non_user: bool,
    pub user: bool,
}

impl Default for Habit {
    fn default() -> Self {
        Self { non_user: true, user: true }
    }
}

/// Selection granularity for politics and religion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Broad,
    Detailed,
}

/// Coarse political categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BroadPolitics {
    pub conservative: bool,
    pub moderate: bool,
    pub liberal: bool,
    pub apolitical: bool,
}

impl BroadPolitics {
    /// (selected, backend label) in query order
    pub fn labelled(&self) -> [(bool, &'static str); 4] {
        [
            (self.conservative, "Conservative"),
            (self.moderate, "Moderate"),
            (self.liberal, "Liberal"),
            (self.apolitical, "No_Ideology"),
        ]
    }

    pub fn selected_count(&self) -> usize {
        self.labelled().iter().filter(|(on, _)| *on).count()
    }
}

impl Default for BroadPolitics {
    fn default() -> Self {
        Self { conservative: true, moderate: true, liberal: true, apolitical: true }
    }
}

/// Coarse religious categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BroadReligion {
    pub christian: bool,
    pub agnostic_atheist: bool,
    pub spiritual: bool,
    pub other: bool,
}

impl BroadReligion {
    /// (selected, backend label) in query order
    pub fn labelled(&self) -> [(bool, &'static str); 4] {
        [
            (self.christian, "Christian"),
            (self.agnostic_atheist, "Secular"),
            (self.spiritual, "Spiritual"),
            (self.other, "Other_Faith"),
        ]
    }

    pub fn selected_count(&self) -> usize {
        self.labelled().iter().filter(|(on, _)| *on).count()
    }
}

impl Default for BroadReligion {
    fn default() -> Self {
        Self { christian: true, agnostic_atheist: true, spiritual: true, other: true }
    }
}

/// Fine-grained political labels, as stored in the dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DetailedPolitics {
    Conservative,
    Liberal,
    Moderate,
    #[serde(rename = "Not Sure")]
    NotSure,
    #[serde(rename = "Very Conservative")]
    VeryConservative,
    #[serde(rename = "Very Liberal")]
    VeryLiberal,
}

impl DetailedPolitics {
    pub const ALL: [DetailedPolitics; 6] = [
        DetailedPolitics::Conservative,
        DetailedPolitics::Liberal,
        DetailedPolitics::Moderate,
        DetailedPolitics::NotSure,
        DetailedPolitics::VeryConservative,
        DetailedPolitics::VeryLiberal,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DetailedPolitics::Conservative => "Conservative",
            DetailedPolitics::Liberal => "Liberal",
            DetailedPolitics::Moderate => "Moderate",
            DetailedPolitics::NotSure => "Not Sure",
            DetailedPolitics::VeryConservative => "Very Conservative",
            DetailedPolitics::VeryLiberal => "Very Liberal",
        }
    }
}

/// Fine-grained religious labels, as stored in the dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DetailedReligion {
    #[serde(rename = "Atheist_Agnostic")]
    AtheistAgnostic,
    Buddhist,
    Catholic,
    Hindu,
    Jewish,
    Mormon,
    Muslim,
    Orthodox,
    #[serde(rename = "Other_Faith")]
    OtherFaith,
    Protestant,
    #[serde(rename = "Spiritual_None")]
    SpiritualNone,
}

impl DetailedReligion {
    pub const ALL: [DetailedReligion; 11] = [
        DetailedReligion::AtheistAgnostic,
        DetailedReligion::Buddhist,
        DetailedReligion::Catholic,
        DetailedReligion::Hindu,
        DetailedReligion::Jewish,
        DetailedReligion::Mormon,
        DetailedReligion::Muslim,
        DetailedReligion::Orthodox,
        DetailedReligion::OtherFaith,
        DetailedReligion::Protestant,
        DetailedReligion::SpiritualNone,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DetailedReligion::AtheistAgnostic => "Atheist_Agnostic",
            DetailedReligion::Buddhist => "Buddhist",
            DetailedReligion::Catholic => "Catholic",
            DetailedReligion::Hindu => "Hindu",
            DetailedReligion::Jewish => "Jewish",
            DetailedReligion::Mormon => "Mormon",
            DetailedReligion::Muslim => "Muslim",
            DetailedReligion::Orthodox => "Orthodox",
            DetailedReligion::OtherFaith => "Other_Faith",
            DetailedReligion::Protestant => "Protestant",
            DetailedReligion::SpiritualNone => "Spiritual_None",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_types_per_gender() {
        assert_eq!(Gender::Female.body_types(), [BodyType::Thin, BodyType::Fit, BodyType::Curvy]);
        assert_eq!(Gender::Male.body_types(), [BodyType::Thin, BodyType::Fit, BodyType::Big]);
    }

    #[test]
    fn test_detailed_labels_match_serde_names() {
        for p in DetailedPolitics::ALL {
            assert_eq!(serde_json::to_string(&p).unwrap(), format!("\"{}\"", p.label()));
        }
        for r in DetailedReligion::ALL {
            assert_eq!(serde_json::to_string(&r).unwrap(), format!("\"{}\"", r.label()));
        }
    }

    #[test]
    fn test_broad_labels() {
        let mut politics = BroadPolitics::default();
        politics.apolitical = false;
        assert_eq!(politics.selected_count(), 3);
        assert_eq!(politics.labelled()[3], (false, "No_Ideology"));
        assert_eq!(BroadReligion::default().labelled()[1].1, "Secular");
    }

    #[test]
    fn test_nested_groups_use_camel_case() {
        let json = serde_json::to_value(Education::default()).unwrap();
        assert_eq!(json, serde_json::json!({"noDegree": true, "college": true, "gradDegree": true}));
        assert!(serde_json::to_value(BroadReligion::default()).unwrap()["agnosticAtheist"].as_bool().unwrap());

        let education: Education = serde_json::from_str(r#"{"noDegree": false}"#).unwrap();
        assert_eq!(education, Education { no_degree: false, college: true, grad_degree: true });

        let smoking: Habit = serde_json::from_str(r#"{"nonUser": false}"#).unwrap();
        assert!(!smoking.non_user && smoking.user);
    }
}
