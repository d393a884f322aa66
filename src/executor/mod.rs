//! Query execution (verb module)
//!
//! The boundary between compiled SQL and whatever answers it. Backends
//! implement [`QueryExecutor`]; results come back as plain [`Row`]s.

mod datafusion_execution;
mod error;
mod query_executor;
mod row;

pub use datafusion_execution::DataFusionExecutor;
pub use error::ExecError;
pub use query_executor::QueryExecutor;
pub use row::{ColumnInfo, Row, Value};
