//! The session: one filter state, one backend, one displayed reading

use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::ticket::{fingerprint, Ticket};
use crate::config::Settings;
use crate::executor::{ColumnInfo, DataFusionExecutor, ExecError, QueryExecutor, Row};
use crate::filter::{FilterEdit, FilterError, FilterState};
use crate::geo::{metro_options, GeoRow, MetroOption};
use crate::interpreter::{Calibration, EstimateMode, GaugeState, Interpreter};

/// Schema and first rows of the data source
#[derive(Debug, Clone, Serialize)]
pub struct Inspection {
    pub schema: Vec<ColumnInfo>,
    pub preview: Vec<Row>,
}

#[derive(Debug, Clone)]
struct Displayed {
    fingerprint: blake3::Hash,
    gauge: GaugeState,
}

pub struct Session {
    settings: Settings,
    filters: FilterState,
    executor: Option<Arc<dyn QueryExecutor>>,
    interpreter: Interpreter,
    geo_rows: Option<Vec<GeoRow>>,
    banner: Option<String>,
    generation: u64,
    displayed: Option<Displayed>,
}

impl Session {
    /// Connect to the configured source, or fall back to simulation
    ///
    /// Never fails: a source that cannot be reached leaves a banner and a
    /// simulated session.
    pub async fn start(settings: Settings) -> Session {
        if settings.source.path.is_none() {
            info!("No data source configured, using simulation");
            return Self::simulated(settings, None);
        }

        match DataFusionExecutor::connect(&settings.source).await {
            Ok(executor) => Self::with_executor(settings, Arc::new(executor)).await,
            Err(e) => {
                warn!(error = %e, "Data source unavailable, using simulation");
                let banner = format!("Live data unavailable ({}). Showing simulated estimates.", e);
                Self::simulated(settings, Some(banner))
            }
        }
    }

    /// Start a live session on an already connected executor
    pub async fn with_executor(settings: Settings, executor: Arc<dyn QueryExecutor>) -> Session {
        let average_weight = match executor.average_weight().await {
            Ok(avg) => avg,
            Err(e) => {
                warn!(error = %e, "Could not measure average weight, no sample scaling");
                None
            }
        };
        let geo_rows = match executor.distinct_geo_rows().await {
            Ok(rows) => Some(rows),
            Err(e) => {
                warn!(error = %e, "Could not load metro list, using curated metros");
                None
            }
        };
        debug!(?average_weight, metros = geo_rows.as_ref().map(Vec::len), "Session metadata loaded");

        let interpreter = Interpreter::live(
            executor.clone(),
            Calibration::new(&settings.calibration, average_weight),
            settings.compile_options(),
            settings.total_adults,
        );
        Session {
            filters: FilterState::default(),
            executor: Some(executor),
            interpreter,
            geo_rows,
            banner: None,
            generation: 0,
            displayed: None,
            settings,
        }
    }

    fn simulated(settings: Settings, banner: Option<String>) -> Session {
        Session {
            filters: FilterState::default(),
            executor: None,
            interpreter: Interpreter::simulated(settings.total_adults),
            geo_rows: None,
            banner,
            generation: 0,
            displayed: None,
            settings,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn interpreter(&self) -> &Interpreter {
        &self.interpreter
    }

    pub fn mode(&self) -> EstimateMode {
        self.interpreter.mode()
    }

    /// Persistent connectivity notice, if startup fell back to simulation
    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub(crate) fn debounce(&self) -> Duration {
        Duration::from_millis(self.settings.debounce_ms)
    }

    /// Replace the filter state; a rejected edit leaves it untouched
    pub fn edit(&mut self, edit: FilterEdit) -> Result<&FilterState, FilterError> {
        self.filters = self.filters.apply(edit)?;
        Ok(&self.filters)
    }

    /// Replace the whole snapshot, e.g. with one restored from JSON
    ///
    /// A snapshot with a range outside its domain is rejected.
    pub fn set_filters(&mut self, filters: FilterState) -> Result<&FilterState, FilterError> {
        filters.validate()?;
        self.filters = filters;
        Ok(&self.filters)
    }

    /// Issue a request for the current filter state
    pub fn issue(&mut self) -> Ticket {
        self.generation += 1;
        let sql = self.interpreter.incidence_sql(&self.filters);
        Ticket {
            generation: self.generation,
            fingerprint: fingerprint(sql.as_deref(), &self.filters),
            filters: self.filters.clone(),
        }
    }

    /// Whether the displayed reading already answers this ticket
    pub fn is_current(&self, ticket: &Ticket) -> bool {
        matches!(
            &self.displayed,
            Some(Displayed { fingerprint: shown, gauge: GaugeState::Ready(_) }) if *shown == ticket.fingerprint
        )
    }

    /// Deliver a result; returns false when a newer ticket has been issued
    pub fn complete(&mut self, ticket: &Ticket, gauge: GaugeState) -> bool {
        if ticket.generation != self.generation {
            debug!(
                generation = ticket.generation,
                latest = self.generation,
                "Discarding stale result"
            );
            return false;
        }
        self.displayed = Some(Displayed {
            fingerprint: ticket.fingerprint,
            gauge,
        });
        true
    }

    /// The reading on display
    pub fn gauge(&self) -> Option<&GaugeState> {
        self.displayed.as_ref().map(|d| &d.gauge)
    }

    /// Evaluate the current filter state unless the display already shows it
    pub async fn refresh(&mut self) -> Option<&GaugeState> {
        let ticket = self.issue();
        if self.is_current(&ticket) {
            debug!(generation = ticket.generation, "Query unchanged, keeping reading");
        } else {
            let gauge = self.interpreter.evaluate(&ticket.filters).await;
            self.complete(&ticket, gauge);
        }
        self.gauge()
    }

    /// Metro choices for the selected state
    pub fn metro_options(&self) -> Vec<MetroOption> {
        metro_options(self.geo_rows.as_deref(), &self.filters.selected_state)
    }

    /// Schema and preview rows; `None` when there is no live source
    pub async fn inspect(&self) -> Result<Option<Inspection>, ExecError> {
        let Some(executor) = &self.executor else {
            return Ok(None);
        };
        let schema = executor.schema().await?;
        let preview = executor.preview(self.settings.preview_rows).await?;
        Ok(Some(Inspection { schema, preview }))
    }

    /// Release the data source
    pub async fn shutdown(self) -> Result<(), ExecError> {
        if let Some(executor) = &self.executor {
            executor.close().await?;
            info!("Data source closed");
        }
        Ok(())
    }
}
