//! select-gateway: read-only HTTP access to PostgreSQL tables and SELECT queries.

pub mod config;
pub mod error;
pub mod handlers;
pub mod openapi;
pub mod response;
pub mod routes;
pub mod row;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{GatewayConfig, IdType, TableConfig, TableRegistry, TableSpec};
pub use error::{AppError, ConfigError};
pub use response::QueryResponse;
pub use routes::gateway_routes;
pub use row::Row;
pub use service::{QueryService, TableService};
pub use state::AppState;
pub use store::{connect_pool, PgRowSource, RowSource};
