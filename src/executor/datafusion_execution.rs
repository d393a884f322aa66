//! DataFusion-backed executor
//!
//! The dataset is registered once as a table in a SessionContext that lives
//! as long as the executor; every query is planned and run against it.

use datafusion::arrow::array::{Array, ArrayRef, AsArray};
use datafusion::arrow::compute::cast;
use datafusion::arrow::datatypes::{DataType, Float64Type, Int64Type};
use datafusion::arrow::record_batch::RecordBatch;
use datafusion::arrow::util::display::array_value_to_string;
use datafusion::error::DataFusionError;
use datafusion::prelude::*;
use futures::future::{BoxFuture, FutureExt};
use tracing::{debug, info};

use super::error::ExecError;
use super::query_executor::QueryExecutor;
use super::row::{ColumnInfo, Row, Value};
use crate::compiler::compile_probe_query;
use crate::config::SourceSettings;
use crate::emitter::emit_sql;
use crate::plan::Source;

pub struct DataFusionExecutor {
    ctx: SessionContext,
    source: Source,
}

impl DataFusionExecutor {
    /// Register the configured parquet file and check that it can be read
    pub async fn connect(settings: &SourceSettings) -> Result<Self, ExecError> {
        let path = settings
            .path
            .as_deref()
            .ok_or_else(|| ExecError::Connectivity("no data source path configured".to_string()))?;
        let source = Source::table(settings.table.as_str())
            .map_err(|e| ExecError::Connectivity(e.to_string()))?;

        let ctx = SessionContext::new();
        ctx.register_parquet(source.name(), path, ParquetReadOptions::default())
            .await
            .map_err(|e| ExecError::Connectivity(format!("{}: {}", path, e)))?;

        let executor = Self { ctx, source };
        executor.probe().await?;
        info!(table = executor.source.name(), path, "Connected to data source");
        Ok(executor)
    }

    /// Wrap a context where `table` is already registered
    pub async fn from_context(ctx: SessionContext, table: &str) -> Result<Self, ExecError> {
        let source = Source::table(table).map_err(|e| ExecError::Connectivity(e.to_string()))?;
        let executor = Self { ctx, source };
        executor.probe().await?;
        Ok(executor)
    }

    async fn probe(&self) -> Result<(), ExecError> {
        let sql = emit_sql(&compile_probe_query(&self.source));
        self.run(&sql).await.map(|_| ()).map_err(|e| match e {
            ExecError::Query(msg) => ExecError::Connectivity(msg),
            other => other,
        })
    }

    async fn run(&self, sql: &str) -> Result<Vec<Row>, ExecError> {
        debug!(sql = %sql, "Executing");
        let batches = self
            .ctx
            .sql(sql)
            .await
            .map_err(query_error)?
            .collect()
            .await
            .map_err(query_error)?;
        batches_to_rows(&batches)
    }
}

impl QueryExecutor for DataFusionExecutor {
    fn source(&self) -> &Source {
        &self.source
    }

    fn execute<'a>(&'a self, sql: &'a str) -> BoxFuture<'a, Result<Vec<Row>, ExecError>> {
        self.run(sql).boxed()
    }

    fn schema(&self) -> BoxFuture<'_, Result<Vec<ColumnInfo>, ExecError>> {
        async move {
            let df = self.ctx.table(self.source.name()).await.map_err(query_error)?;
            Ok(df
                .schema()
                .fields()
                .iter()
                .map(|f| ColumnInfo {
                    name: f.name().clone(),
                    data_type: f.data_type().to_string(),
                })
                .collect())
        }
        .boxed()
    }

    fn close(&self) -> BoxFuture<'_, Result<(), ExecError>> {
        async move {
            self.ctx
                .deregister_table(self.source.name())
                .map_err(query_error)?;
            info!(table = self.source.name(), "Closed data source");
            Ok(())
        }
        .boxed()
    }
}

fn query_error(e: DataFusionError) -> ExecError {
    ExecError::Query(e.to_string())
}

fn batches_to_rows(batches: &[RecordBatch]) -> Result<Vec<Row>, ExecError> {
    let mut rows = Vec::new();
    for batch in batches {
        let schema = batch.schema();
        let columns = batch
            .columns()
            .iter()
            .map(column_values)
            .collect::<Result<Vec<_>, _>>()?;
        for i in 0..batch.num_rows() {
            let mut row = Row::new();
            for (field, values) in schema.fields().iter().zip(&columns) {
                row.push(field.name().clone(), values[i].clone());
            }
            rows.push(row);
        }
    }
    Ok(rows)
}

/// Read one Arrow column into plain values
///
/// Integers widen to i64, floats and decimals to f64; anything without a
/// natural plain form is rendered as text.
fn column_values(array: &ArrayRef) -> Result<Vec<Value>, ExecError> {
    let len = array.len();
    let data_type = array.data_type();
    let values = match data_type {
        DataType::Null => vec![Value::Null; len],
        DataType::Boolean => {
            let a = array.as_boolean();
            (0..len)
                .map(|i| if a.is_null(i) { Value::Null } else { Value::Bool(a.value(i)) })
                .collect()
        }
        dt if dt.is_integer() => {
            let widened = cast(array, &DataType::Int64).map_err(|e| decode_error(dt, e))?;
            let a = widened.as_primitive::<Int64Type>();
            (0..len)
                .map(|i| if a.is_null(i) { Value::Null } else { Value::Int(a.value(i)) })
                .collect()
        }
        dt if dt.is_floating() || matches!(dt, DataType::Decimal128(..) | DataType::Decimal256(..)) => {
            let widened = cast(array, &DataType::Float64).map_err(|e| decode_error(dt, e))?;
            let a = widened.as_primitive::<Float64Type>();
            (0..len)
                .map(|i| if a.is_null(i) { Value::Null } else { Value::Float(a.value(i)) })
                .collect()
        }
        DataType::Utf8 | DataType::LargeUtf8 | DataType::Utf8View => {
            let text = cast(array, &DataType::Utf8).map_err(|e| decode_error(data_type, e))?;
            let a = text.as_string::<i32>();
            (0..len)
                .map(|i| if a.is_null(i) { Value::Null } else { Value::Text(a.value(i).to_string()) })
                .collect()
        }
        _ => (0..len)
            .map(|i| {
                if array.is_null(i) {
                    Ok(Value::Null)
                } else {
                    array_value_to_string(array.as_ref(), i)
                        .map(Value::Text)
                        .map_err(|e| decode_error(data_type, e))
                }
            })
            .collect::<Result<Vec<_>, _>>()?,
    };
    Ok(values)
}

fn decode_error(data_type: &DataType, e: impl std::fmt::Display) -> ExecError {
    ExecError::Decode(format!("cannot read {} column: {}", data_type, e))
}
