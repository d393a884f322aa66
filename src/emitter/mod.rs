//! SQL emitter (verb module)
//!
//! Transforms a SelectQuery into SQL text.

mod error;
mod sql;

pub use error::EmitError;
pub use sql::{emit_expr, emit_inline, emit_predicate, emit_sql, is_plain_identifier, quote_identifier};
