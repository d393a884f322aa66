//! Shared test utilities for integration tests

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use datafusion::arrow::array::{ArrayRef, BooleanArray, Float64Array, Int64Array, StringArray};
use datafusion::arrow::record_batch::RecordBatch;
use datafusion::prelude::SessionContext;
use futures::future::{BoxFuture, FutureExt};

use poolstat::config::{self, Settings};
use poolstat::executor::{ColumnInfo, DataFusionExecutor, ExecError, QueryExecutor, Row, Value};
use poolstat::plan::Source;

pub const TABLE: &str = "population";
pub const NEW_YORK: u32 = 35620;
pub const CHICAGO: u32 = 16980;

/// Load a settings fixture from the tests/test_data directory
pub fn load_settings(name: &str) -> Settings {
    let path = format!("tests/test_data/{}", name);
    config::parse_file(&path).unwrap_or_else(|e| panic!("Failed to load test data {}: {}", name, e))
}

// =============================================================================
// In-memory population table
// =============================================================================

/// Eight people across two metros and two unmetropolitan states
///
/// Weights sum to 195 over 8 rows, so the mean weight (24.375) is below the
/// default scaling threshold. The weight column keeps the dataset's
/// upper-case `PWGTP` spelling.
///
/// Under the default filter (men 18-35, heights 66-90, no kids) rows 1, 2
/// and 8 match, for a summed weight of 55.
pub fn population_batch() -> RecordBatch {
    let ny = Some("New York-Newark-Jersey City, NY-NJ");
    let chi = Some("Chicago-Naperville-Elgin, IL-IN-WI");

    let int = |values: Vec<i64>| -> ArrayRef { Arc::new(Int64Array::from(values)) };
    let opt_int = |values: Vec<Option<i64>>| -> ArrayRef { Arc::new(Int64Array::from(values)) };
    let flag = |values: Vec<bool>| -> ArrayRef { Arc::new(BooleanArray::from(values)) };
    let text = |values: Vec<Option<&str>>| -> ArrayRef { Arc::new(StringArray::from(values)) };

    let columns: Vec<(&str, ArrayRef)> = vec![
        (
            "cbsa_id",
            opt_int(vec![
                Some(NEW_YORK as i64),
                Some(NEW_YORK as i64),
                Some(CHICAGO as i64),
                Some(CHICAGO as i64),
                None,
                Some(NEW_YORK as i64),
                None,
                Some(CHICAGO as i64),
            ]),
        ),
        ("cbsa_name", text(vec![ny, ny, chi, chi, None, ny, None, chi])),
        ("state", int(vec![36, 34, 17, 17, 48, 36, 6, 17])),
        (
            "PWGTP",
            Arc::new(Float64Array::from(vec![10.0, 20.0, 30.0, 40.0, 50.0, 5.0, 15.0, 25.0])),
        ),
        ("sex", int(vec![1, 1, 1, 2, 1, 1, 1, 1])),
        ("age", int(vec![25, 30, 40, 28, 22, 33, 19, 35])),
        ("married", int(vec![0, 0, 0, 0, 0, 0, 0, 1])),
        (
            "real_income",
            opt_int(vec![
                Some(80_000),
                None,
                Some(90_000),
                Some(70_000),
                Some(20_000),
                Some(150_000),
                Some(600_000),
                Some(0),
            ]),
        ),
        ("educ", int(vec![2, 1, 3, 2, 1, 2, 1, 3])),
        (
            "height_inches",
            opt_int(vec![Some(70), Some(74), Some(72), Some(64), None, Some(73), Some(68), Some(66)]),
        ),
        ("thin", flag(vec![false, false, false, true, true, false, true, false])),
        ("fit", flag(vec![true, true, false, false, false, true, false, false])),
        ("overweight", flag(vec![false, false, true, false, false, false, false, true])),
        ("obese", flag(vec![false, false, false, false, false, false, false, false])),
        ("abs", flag(vec![true, false, false, false, false, true, false, false])),
        ("race_mapped", int(vec![1, 2, 1, 3, 4, 1, 5, 2])),
        ("is_smoker", int(vec![0, 1, 0, 0, 0, 0, 1, 0])),
        ("drinks_per_day", int(vec![0, 2, 1, 0, 0, 1, 0, 0])),
        ("has_kids", int(vec![0, 0, 0, 0, 0, 1, 0, 0])),
        (
            "politics_broad",
            text(vec![
                Some("Liberal"),
                Some("Moderate"),
                Some("Conservative"),
                Some("Liberal"),
                Some("No_Ideology"),
                Some("Conservative"),
                Some("Moderate"),
                Some("Conservative"),
            ]),
        ),
        (
            "religion_broad",
            text(vec![
                Some("Secular"),
                Some("Christian"),
                Some("Christian"),
                Some("Spiritual"),
                Some("Other_Faith"),
                Some("Christian"),
                Some("Secular"),
                Some("Christian"),
            ]),
        ),
    ];

    RecordBatch::try_from_iter(columns).expect("population batch")
}

/// A context with the population table registered
pub fn population_context() -> SessionContext {
    let ctx = SessionContext::new();
    ctx.register_batch(TABLE, population_batch()).expect("register population");
    ctx
}

/// A DataFusion executor over the in-memory population table
pub async fn population_executor() -> Arc<DataFusionExecutor> {
    let executor = DataFusionExecutor::from_context(population_context(), TABLE)
        .await
        .expect("connect to in-memory population");
    Arc::new(executor)
}

// =============================================================================
// Scripted executor
// =============================================================================

/// One scripted answer to an incidence query
#[derive(Clone)]
pub struct Step {
    pub delay: Duration,
    pub result: Result<Vec<Row>, ExecError>,
}

impl Step {
    pub fn weighted(weighted_population: f64, delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            result: Ok(vec![incidence_row(weighted_population)]),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Err(ExecError::Query(message.to_string())),
        }
    }
}

pub fn incidence_row(weighted_population: f64) -> Row {
    Row::new()
        .with("count", Value::Float(1.0))
        .with("weighted_population", Value::Float(weighted_population))
}

/// Answers incidence queries from a script, in order, repeating the last step
///
/// Metadata queries report an average weight of 100 (no scaling) and no
/// metros. Every executed SQL string is recorded.
pub struct ScriptedExecutor {
    source: Source,
    steps: Vec<Step>,
    next: AtomicUsize,
    pub executed: Mutex<Vec<String>>,
    pub closed: Mutex<bool>,
}

impl ScriptedExecutor {
    pub fn new(steps: Vec<Step>) -> Arc<Self> {
        assert!(!steps.is_empty());
        Arc::new(Self {
            source: Source::table(TABLE).unwrap(),
            steps,
            next: AtomicUsize::new(0),
            executed: Mutex::new(Vec::new()),
            closed: Mutex::new(false),
        })
    }

    pub fn executed_count(&self) -> usize {
        self.executed.lock().unwrap().len()
    }
}

impl QueryExecutor for ScriptedExecutor {
    fn source(&self) -> &Source {
        &self.source
    }

    fn execute<'a>(&'a self, sql: &'a str) -> BoxFuture<'a, Result<Vec<Row>, ExecError>> {
        async move {
            self.executed.lock().unwrap().push(sql.to_string());
            let i = self.next.fetch_add(1, Ordering::SeqCst).min(self.steps.len() - 1);
            let step = self.steps[i].clone();
            if !step.delay.is_zero() {
                tokio::time::sleep(step.delay).await;
            }
            step.result
        }
        .boxed()
    }

    fn schema(&self) -> BoxFuture<'_, Result<Vec<ColumnInfo>, ExecError>> {
        async { Ok(vec![ColumnInfo { name: "PWGTP".into(), data_type: "Float64".into() }]) }.boxed()
    }

    fn distinct_geo_rows(&self) -> BoxFuture<'_, Result<Vec<poolstat::GeoRow>, ExecError>> {
        async { Ok(Vec::new()) }.boxed()
    }

    fn average_weight(&self) -> BoxFuture<'_, Result<Option<f64>, ExecError>> {
        async { Ok(Some(100.0)) }.boxed()
    }

    fn close(&self) -> BoxFuture<'_, Result<(), ExecError>> {
        async move {
            *self.closed.lock().unwrap() = true;
            Ok(())
        }
        .boxed()
    }
}
