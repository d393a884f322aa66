//! Queries describing the dataset rather than a filter

use super::columns::*;
use crate::plan::{Column, Expr, SelectItem, SelectQuery, SortDirection, Source, SqlType};

/// Metro id, name, state code and summed weight, heaviest first
pub fn compile_geo_rows_query(source: &Source) -> SelectQuery {
    SelectQuery::new(source.clone())
        .select(SelectItem::new(Expr::col(CBSA_ID)))
        .select(SelectItem::new(Expr::col(CBSA_NAME)))
        .select(SelectItem::aliased(Expr::col(STATE), OUT_STATE_FIPS))
        .select(SelectItem::aliased(
            Expr::sum(Expr::col(PWGTP)).cast(SqlType::Double),
            OUT_POP,
        ))
        .filter(Expr::col(CBSA_ID).is_not_null())
        .group_by(Column::new(CBSA_ID))
        .group_by(Column::new(CBSA_NAME))
        .group_by(Column::new(STATE))
        .order_by(OUT_POP, SortDirection::Descending)
}

/// Mean person weight over the whole dataset
pub fn compile_average_weight_query(source: &Source) -> SelectQuery {
    SelectQuery::new(source.clone()).select(SelectItem::aliased(
        Expr::sum(Expr::col(PWGTP)).divide(Expr::count_all()),
        OUT_AVG_WEIGHT,
    ))
}

/// First `limit` raw rows
pub fn compile_preview_query(source: &Source, limit: usize) -> SelectQuery {
    SelectQuery::new(source.clone()).limit(limit)
}

/// Cheapest query that proves the source is readable
pub fn compile_probe_query(source: &Source) -> SelectQuery {
    SelectQuery::new(source.clone()).select(SelectItem::aliased(Expr::count_all(), OUT_ROWS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::emit_sql;

    fn source() -> Source {
        Source::table("population").unwrap()
    }

    #[test]
    fn test_geo_rows_query() {
        let sql = emit_sql(&compile_geo_rows_query(&source()));
        assert_eq!(
            sql,
            "SELECT\n  cbsa_id,\n  cbsa_name,\n  state AS \"state_fips\",\n  CAST(SUM(\"PWGTP\") AS DOUBLE) AS \"pop\"\nFROM population\nWHERE\n  cbsa_id IS NOT NULL\nGROUP BY cbsa_id, cbsa_name, state\nORDER BY pop DESC"
        );
    }

    #[test]
    fn test_average_weight_query() {
        let sql = emit_sql(&compile_average_weight_query(&source()));
        assert!(sql.contains("(CAST(SUM(\"PWGTP\") AS DOUBLE) / CAST(COUNT(*) AS DOUBLE)) AS \"avg_weight\""));
    }

    #[test]
    fn test_preview_and_probe() {
        assert_eq!(emit_sql(&compile_preview_query(&source(), 10)), "SELECT *\nFROM population\nLIMIT 10");
        assert_eq!(
            emit_sql(&compile_probe_query(&source())),
            "SELECT\n  COUNT(*) AS \"rows\"\nFROM population"
        );
    }
}
