//! Filter-to-query compiler (verb module)
//!
//! Translates a FilterState into the incidence SelectQuery, and builds the
//! metadata queries the executor uses to describe the dataset.

mod body;
pub mod columns;
mod incidence;
mod metadata;

pub use body::{body_type_condition, BodyEncoding};
pub use incidence::{compile_incidence_query, compile_incidence_sql, CompileOptions};
pub use metadata::{
    compile_average_weight_query, compile_geo_rows_query, compile_preview_query, compile_probe_query,
};
