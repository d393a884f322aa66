//! Body-composition conditions
//!
//! Two encodings exist across dataset versions: independent categorical flag
//! columns, and labels derived from BMI bands plus a grip-strength threshold.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::columns::{ABS, BMI, FIT, GRIP_STRENGTH, OBESE, OVERWEIGHT, THIN};
use crate::filter::{BodyType, Gender, PhysicalFlags};
use crate::plan::Expr;

/// Which body-composition encoding the dataset carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyEncoding {
    /// thin/fit/overweight/obese/abs boolean columns
    #[default]
    CategoricalFlags,
    /// bmi and grip_strength columns
    DerivedThreshold,
}

/// BMI ceiling of "thin" and "fit", and the grip-strength floor of "fit"
struct Thresholds {
    thin_bmi: i64,
    fit_bmi: i64,
    fit_grip: f64,
}

fn thresholds(gender: Gender) -> Thresholds {
    match gender {
        Gender::Female => Thresholds { thin_bmi: 22, fit_bmi: 25, fit_grip: 63.0 },
        Gender::Male => Thresholds { thin_bmi: 25, fit_bmi: 27, fit_grip: 100.0 },
    }
}

/// Condition selecting one body-type label for a gender
///
/// Returns `None` for a label the gender does not offer (Curvy for men, Big
/// for women).
pub fn body_type_condition(gender: Gender, body_type: BodyType) -> Option<Expr> {
    let t = thresholds(gender);
    let bmi = || Expr::col(BMI);
    let grip = || Expr::col(GRIP_STRENGTH);
    match (gender, body_type) {
        (_, BodyType::Thin) => Some(bmi().lt_eq(Expr::int(t.thin_bmi))),
        (_, BodyType::Fit) => Some(
            bmi()
                .lt_eq(Expr::int(t.fit_bmi))
                .and(grip().gt_eq(Expr::float(t.fit_grip))),
        ),
        (Gender::Female, BodyType::Curvy) | (Gender::Male, BodyType::Big) => Some(
            bmi().gt(Expr::int(t.fit_bmi)).or(bmi()
                .gt(Expr::int(t.thin_bmi))
                .and(grip().lt(Expr::float(t.fit_grip)))),
        ),
        _ => None,
    }
}

/// Derived-threshold encoding: OR of the selected labels offered for `gender`
pub(crate) fn derived_conditions(gender: Gender, selected: &BTreeSet<BodyType>) -> Vec<Expr> {
    let offered = gender.body_types();
    let chosen: Vec<BodyType> = offered.into_iter().filter(|b| selected.contains(b)).collect();
    if chosen.len() == offered.len() {
        return Vec::new();
    }
    let alternatives: Vec<Expr> = chosen
        .into_iter()
        .filter_map(|b| body_type_condition(gender, b))
        .collect();
    match alternatives.len() {
        0 => vec![Expr::never()],
        1 => alternatives,
        _ => vec![Expr::Or(alternatives)],
    }
}

/// Categorical-flag encoding: unset flags are excluded, `abs` is required when set
pub(crate) fn flag_conditions(flags: &PhysicalFlags) -> Vec<Expr> {
    let categories = [
        (flags.thin, THIN),
        (flags.fit, FIT),
        (flags.overweight, OVERWEIGHT),
        (flags.obese, OBESE),
    ];

    let mut conditions = Vec::new();
    if categories.iter().all(|(on, _)| !on) {
        conditions.push(Expr::never());
    } else {
        for (on, column) in categories {
            if !on {
                conditions.push(Expr::col(column).eq(Expr::bool(false)));
            }
        }
    }

    if flags.abs {
        conditions.push(Expr::col(ABS).eq(Expr::bool(true)));
    }
    conditions
}
