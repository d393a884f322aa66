//! Evaluating a filter state, live or simulated

use futures::future::try_join;
use std::sync::Arc;
use tracing::warn;

use super::estimate::{Estimate, EstimateMode, GaugeState, Reading};
use super::live::{interpret_rows, Calibration};
use super::simulate::simulate;
use crate::compiler::{compile_incidence_sql, CompileOptions};
use crate::config::TOTAL_ADULTS;
use crate::executor::{ExecError, QueryExecutor};
use crate::filter::FilterState;

/// How estimates are produced
#[derive(Clone)]
pub enum Backend {
    Live {
        executor: Arc<dyn QueryExecutor>,
        calibration: Calibration,
    },
    Simulated,
}

/// Turns filter states into gauge readings
///
/// The backend is fixed at construction: a live interpreter reports query
/// failures, it never switches to simulation.
#[derive(Clone)]
pub struct Interpreter {
    backend: Backend,
    options: CompileOptions,
    total_adults: u64,
}

impl Interpreter {
    pub fn live(
        executor: Arc<dyn QueryExecutor>,
        calibration: Calibration,
        options: CompileOptions,
        total_adults: u64,
    ) -> Self {
        Self {
            backend: Backend::Live { executor, calibration },
            options,
            total_adults,
        }
    }

    pub fn simulated(total_adults: u64) -> Self {
        Self {
            backend: Backend::Simulated,
            options: CompileOptions::default(),
            total_adults,
        }
    }

    pub fn mode(&self) -> EstimateMode {
        match self.backend {
            Backend::Live { .. } => EstimateMode::Live,
            Backend::Simulated => EstimateMode::Simulated,
        }
    }

    pub fn backend(&self) -> &Backend {
        &self.backend
    }

    /// The SQL a live backend would run; `None` when simulating
    pub fn incidence_sql(&self, filters: &FilterState) -> Option<String> {
        match &self.backend {
            Backend::Live { executor, .. } => {
                Some(compile_incidence_sql(filters, executor.source(), &self.options))
            }
            Backend::Simulated => None,
        }
    }

    /// Estimate a single filter state
    pub async fn estimate(&self, filters: &FilterState) -> Result<Estimate, ExecError> {
        match &self.backend {
            Backend::Live { executor, calibration } => {
                let sql = compile_incidence_sql(filters, executor.source(), &self.options);
                let rows = executor.execute(&sql).await?;
                Ok(interpret_rows(
                    &rows,
                    calibration,
                    filters.metro_selected(),
                    self.total_adults,
                ))
            }
            Backend::Simulated => Ok(simulate(filters, self.total_adults)),
        }
    }

    /// Estimate the filter state and, with a metro selected, its national benchmark
    pub async fn evaluate(&self, filters: &FilterState) -> GaugeState {
        let result = if filters.metro_selected() {
            let national = filters.national_benchmark();
            try_join(self.estimate(filters), self.estimate(&national))
                .await
                .map(|(primary, benchmark)| Reading {
                    primary,
                    benchmark: Some(benchmark),
                })
        } else {
            self.estimate(filters).await.map(|primary| Reading {
                primary,
                benchmark: None,
            })
        };

        match result {
            Ok(reading) => GaugeState::Ready(reading),
            Err(e) => {
                warn!(error = %e, "Evaluation failed");
                GaugeState::Failed {
                    message: e.to_string(),
                }
            }
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::simulated(TOTAL_ADULTS)
    }
}
