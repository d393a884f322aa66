//! The executor boundary

use futures::future::{BoxFuture, FutureExt};

use super::error::ExecError;
use super::row::{ColumnInfo, Row};
use crate::compiler::columns::{CBSA_ID, CBSA_NAME, OUT_AVG_WEIGHT, OUT_POP, OUT_STATE_FIPS};
use crate::compiler::{compile_average_weight_query, compile_geo_rows_query, compile_preview_query};
use crate::emitter::emit_sql;
use crate::geo::{CbsaId, GeoRow};
use crate::plan::Source;

/// Something that can run SQL against the population dataset
///
/// Only `execute`, `schema` and `source` are required; the rest are built
/// from the metadata queries and may be overridden by backends that know a
/// cheaper way.
pub trait QueryExecutor: Send + Sync {
    /// The relation every query reads from
    fn source(&self) -> &Source;

    fn execute<'a>(&'a self, sql: &'a str) -> BoxFuture<'a, Result<Vec<Row>, ExecError>>;

    fn schema(&self) -> BoxFuture<'_, Result<Vec<ColumnInfo>, ExecError>>;

    fn preview(&self, limit: usize) -> BoxFuture<'_, Result<Vec<Row>, ExecError>> {
        async move {
            let sql = emit_sql(&compile_preview_query(self.source(), limit));
            self.execute(&sql).await
        }
        .boxed()
    }

    fn distinct_geo_rows(&self) -> BoxFuture<'_, Result<Vec<GeoRow>, ExecError>> {
        async move {
            let sql = emit_sql(&compile_geo_rows_query(self.source()));
            let rows = self.execute(&sql).await?;
            rows.iter().map(decode_geo_row).collect()
        }
        .boxed()
    }

    /// Mean person weight; `None` for an empty dataset
    fn average_weight(&self) -> BoxFuture<'_, Result<Option<f64>, ExecError>> {
        async move {
            let sql = emit_sql(&compile_average_weight_query(self.source()));
            let rows = self.execute(&sql).await?;
            Ok(rows.first().and_then(|row| row.f64(OUT_AVG_WEIGHT)))
        }
        .boxed()
    }

    /// Release the connection; queries after this fail
    fn close(&self) -> BoxFuture<'_, Result<(), ExecError>> {
        async { Ok(()) }.boxed()
    }
}

fn decode_geo_row(row: &Row) -> Result<GeoRow, ExecError> {
    let cbsa = row
        .get(CBSA_ID)
        .and_then(|v| v.as_i64())
        .and_then(|id| u32::try_from(id).ok())
        .ok_or_else(|| ExecError::Decode(format!("{} is not a metro id in {:?}", CBSA_ID, row)))?;
    let state_fips = row
        .get(OUT_STATE_FIPS)
        .and_then(|v| v.as_i64())
        .and_then(|fips| u32::try_from(fips).ok())
        .ok_or_else(|| ExecError::Decode(format!("{} is not a state code in {:?}", OUT_STATE_FIPS, row)))?;
    let cbsa_name = row
        .get(CBSA_NAME)
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    Ok(GeoRow {
        cbsa_id: CbsaId(cbsa),
        cbsa_name,
        state_fips,
        population_weight: row.f64(OUT_POP).unwrap_or(0.0),
    })
}
