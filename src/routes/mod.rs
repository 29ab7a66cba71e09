//! Route assembly.

mod common;
mod docs;
mod query;
mod tables;

pub use common::common_routes;
pub use docs::docs_routes;
pub use query::query_routes;
pub use tables::table_routes;

use crate::config::ServerConfig;
use crate::error::AppError;
use crate::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

async fn not_found() -> AppError {
    AppError::NotFound("Not Found".into())
}

/// The whole gateway: service routes, query, docs, table reads, plus body limit and request tracing.
pub fn gateway_routes(state: AppState, server: &ServerConfig) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(query_routes(state.clone()))
        .merge(docs_routes(&state.tables))
        .merge(table_routes(state))
        .fallback(not_found)
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(server.max_body_bytes))
        .layer(TraceLayer::new_for_http())
}
