//! The incidence query: how many people match a filter state

use tracing::debug;

use super::body::{derived_conditions, flag_conditions, BodyEncoding};
use super::columns::*;
use crate::emitter::emit_sql;
use crate::filter::{
    FilterState, RangeSel, ViewMode, HEIGHT_BOUNDS, INCOME_BOUNDS, RFM_BOUNDS, WAIST_BOUNDS,
};
use crate::geo::CbsaId;
use crate::plan::{Expr, SelectItem, SelectQuery, Source, SqlType};

/// Switches between dataset variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    pub body_encoding: BodyEncoding,
    /// Add the selected metro's total weight as a third output column
    pub include_region_denominator: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            body_encoding: BodyEncoding::CategoricalFlags,
            include_region_denominator: true,
        }
    }
}

/// Compile a filter state into the incidence query
///
/// Outputs `count`, `weighted_population` and, when a metro is selected and
/// the option is on, `total_region_population`. Never fails: every state the
/// filter model can hold has a translation.
pub fn compile_incidence_query(
    filters: &FilterState,
    source: &Source,
    options: &CompileOptions,
) -> SelectQuery {
    let mut query = SelectQuery::new(source.clone())
        .select(SelectItem::aliased(
            Expr::count_all().cast(SqlType::Double),
            OUT_COUNT,
        ))
        .select(SelectItem::aliased(
            Expr::sum(Expr::col(PWGTP)).cast(SqlType::Double),
            OUT_WEIGHTED_POPULATION,
        ));

    if options.include_region_denominator {
        if let Some(cbsa) = filters.selected_cbsa {
            query = query.select(SelectItem::aliased(
                Expr::subquery(region_total_query(source, cbsa)),
                OUT_TOTAL_REGION_POPULATION,
            ));
        }
    }

    query.predicates = conditions(filters, options.body_encoding);
    query
}

/// Compile and emit in one step
pub fn compile_incidence_sql(
    filters: &FilterState,
    source: &Source,
    options: &CompileOptions,
) -> String {
    let sql = emit_sql(&compile_incidence_query(filters, source, options));
    debug!(sql = %sql, "Compiled incidence query");
    sql
}

fn region_total_query(source: &Source, cbsa: CbsaId) -> SelectQuery {
    SelectQuery::new(source.clone())
        .select(SelectItem::new(Expr::sum(Expr::col(PWGTP)).cast(SqlType::Double)))
        .filter(Expr::col(CBSA_ID).eq(Expr::int(i64::from(cbsa.0))))
}

/// The AND-combined WHERE conditions, in rule order
fn conditions(filters: &FilterState, body_encoding: BodyEncoding) -> Vec<Expr> {
    let mut conds = Vec::new();

    // Geography: metro wins over state
    if let Some(cbsa) = filters.selected_cbsa {
        conds.push(Expr::col(CBSA_ID).eq(Expr::int(i64::from(cbsa.0))));
    } else if let Some(fips) = filters.selected_state.fips() {
        conds.push(Expr::col(STATE).eq(Expr::int(i64::from(fips))));
    }

    // Demographics
    conds.push(Expr::col(SEX).eq(Expr::int(filters.gender.sex_code())));
    conds.push(range(AGE, filters.age_range, 1));
    if !filters.include_married {
        conds.push(Expr::col(MARRIED).not_eq(Expr::int(1)));
    }

    // Income is stored in dollars, selected in thousands
    let income = range(REAL_INCOME, filters.income_range, 1000);
    if filters.income_range.low() == INCOME_BOUNDS.min {
        conds.push(income.or(Expr::col(REAL_INCOME).is_null()));
    } else {
        conds.push(income);
    }

    let education = &filters.education;
    let levels = [(education.no_degree, 1), (education.college, 2), (education.grad_degree, 3)];
    conds.extend(coded_subset(EDUC, &levels));

    // Physical
    let height = range(HEIGHT_INCHES, filters.height_range, 1);
    if filters.height_range.spans(HEIGHT_BOUNDS) {
        conds.push(height.or(Expr::col(HEIGHT_INCHES).is_null()));
    } else {
        conds.push(height);
    }

    match body_encoding {
        BodyEncoding::CategoricalFlags => conds.extend(flag_conditions(&filters.physical_flags)),
        BodyEncoding::DerivedThreshold => {
            conds.extend(derived_conditions(filters.gender, &filters.body_types))
        }
    }

    if filters.waist_range.is_strict_subset_of(WAIST_BOUNDS) {
        conds.push(range(WAIST_CIRCUMFERENCE, filters.waist_range, 1));
    }
    if filters.rfm_range.is_strict_subset_of(RFM_BOUNDS) {
        conds.push(range(RFM, filters.rfm_range, 1));
    }

    // Background
    let race = &filters.race;
    let races = [
        (race.white, 1),
        (race.black, 2),
        (race.asian, 3),
        (race.hispanic, 4),
        (race.other, 5),
    ];
    conds.extend(coded_subset(RACE_MAPPED, &races));

    // Habits: only the "user acceptable" flag is consulted
    if !filters.smoking.user {
        conds.push(Expr::col(IS_SMOKER).eq(Expr::int(0)));
    }
    if !filters.drinking.user {
        conds.push(Expr::col(DRINKS_PER_DAY).eq(Expr::int(0)));
    }

    if filters.exclude_people_with_kids {
        conds.push(Expr::col(HAS_KIDS).eq(Expr::int(0)));
    }

    // Values
    match filters.politics_view {
        ViewMode::Broad => conds.extend(labelled_subset(POLITICS_BROAD, &filters.politics.labelled())),
        ViewMode::Detailed => conds.push(Expr::col(POLITICS_DETAILED).in_list(
            filters.politics_detailed.iter().map(|p| Expr::string(p.label())).collect(),
        )),
    }
    match filters.religion_view {
        ViewMode::Broad => conds.extend(labelled_subset(RELIGION_BROAD, &filters.religion.labelled())),
        ViewMode::Detailed => conds.push(Expr::col(RELIGION_DETAILED).in_list(
            filters.religion_detailed.iter().map(|r| Expr::string(r.label())).collect(),
        )),
    }

    conds
}

fn range(column: &str, sel: RangeSel, scale: i64) -> Expr {
    Expr::col(column).between(
        Expr::int(sel.low().saturating_mul(scale)),
        Expr::int(sel.high().saturating_mul(scale)),
    )
}

/// Nothing when every option is selected, otherwise an IN over the chosen codes
fn coded_subset(column: &str, options: &[(bool, i64)]) -> Option<Expr> {
    if options.iter().all(|(on, _)| *on) {
        return None;
    }
    let codes = options.iter().filter(|(on, _)| *on).map(|(_, code)| Expr::int(*code)).collect();
    Some(Expr::col(column).in_list(codes))
}

fn labelled_subset(column: &str, options: &[(bool, &'static str)]) -> Option<Expr> {
    if options.iter().all(|(on, _)| *on) {
        return None;
    }
    let labels = options.iter().filter(|(on, _)| *on).map(|(_, label)| Expr::string(*label)).collect();
    Some(Expr::col(column).in_list(labels))
}
