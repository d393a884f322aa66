//! Emitter errors

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmitError {
    /// A name that cannot be written into SQL unquoted
    #[error("Invalid identifier: {0:?}")]
    InvalidIdentifier(String),
}
