//! HTTP handlers for the table reads and the query pass-through.

pub mod query;
pub mod tables;
pub use query::*;
pub use tables::*;
