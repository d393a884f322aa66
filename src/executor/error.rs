//! Executor errors

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecError {
    /// The data source could not be reached or set up
    #[error("Connection failed: {0}")]
    Connectivity(String),
    /// The source rejected or failed to run a query
    #[error("Query failed: {0}")]
    Query(String),
    /// Rows came back in a shape the caller cannot read
    #[error("Unexpected result shape: {0}")]
    Decode(String),
}
