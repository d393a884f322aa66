//! Query plan types (noun module)
//!
//! A small relational vocabulary: one SELECT over one source, with scalar,
//! aggregate and subquery expressions. Built by the compiler, rendered by the
//! emitter.

mod expr;
mod query;

pub use expr::{AggregateExpr, Aggregation, BinaryOperator, Column, Expr, Literal, SqlType};
pub use query::{SelectItem, SelectQuery, SortDirection, SortKey, Source};
