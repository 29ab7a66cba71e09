//! Services between handlers and the row source.

mod query;
mod tables;
pub use query::{QueryService, SELECT_ONLY};
pub use tables::TableService;
