//! poolstat - Estimate how many people match a set of partner preferences
//!
//! This library provides:
//! - Filter state types with enforced invariants (FilterState, FilterEdit)
//! - Filter compilation to a SQL aggregation over a person-level dataset
//! - Query execution against DataFusion
//! - Result interpretation, with a simulation model when no data is available
//! - Metro option aggregation for the geography picker
//! - A session that debounces edits and discards stale results
//!
//! # Architecture
//!
//! **Noun modules** (data structures):
//! - `filter/` - user selections (FilterState, RangeSel, vocabularies)
//! - `geo/` - states, curated metros, metro options
//! - `plan/` - query plan types (SelectQuery, Expr, Column)
//!
//! **Verb modules** (transformations):
//! - `compiler/` - FilterState → SelectQuery
//! - `emitter/` - SelectQuery → SQL text
//! - `executor/` - SQL → rows
//! - `interpreter/` - rows (or the simulation model) → Estimate
//! - `session/` - edits → displayed readings
//! - `narrative/` - FilterState → commentary
//! - `config/` - YAML → Settings
//!
//! # Example
//!
//! ```ignore
//! use poolstat::{compile_incidence_sql, CompileOptions, FilterEdit, FilterState, Source};
//!
//! let filters = FilterState::default().apply(FilterEdit::SetAgeRange(25, 40))?;
//! let source = Source::table("population")?;
//! let sql = compile_incidence_sql(&filters, &source, &CompileOptions::default());
//! ```

pub mod filter;
pub mod geo;
pub mod plan;
pub mod compiler;
pub mod emitter;
pub mod executor;
pub mod interpreter;
pub mod session;
pub mod narrative;
pub mod config;

// Re-export commonly used types
pub use filter::{FilterEdit, FilterError, FilterState, RangeSel};
pub use geo::{CbsaId, GeoRow, MetroOption, StateSelection};
pub use plan::{Expr, SelectQuery, Source};
pub use compiler::{compile_incidence_query, compile_incidence_sql, BodyEncoding, CompileOptions};
pub use emitter::{emit_sql, EmitError};
pub use executor::{DataFusionExecutor, ExecError, QueryExecutor, Row, Value};
pub use interpreter::{Estimate, EstimateMode, GaugeState, Interpreter};
pub use session::{Session, Ticket};
pub use narrative::{narrate, HttpNarrator, NarrativeError, NarrativeSource};
pub use config::{ConfigError, Settings};
