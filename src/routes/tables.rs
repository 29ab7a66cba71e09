//! Table routes. Parameterized paths; handlers resolve the table from the registry.

use crate::handlers::tables::{list, read};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn table_routes(state: AppState) -> Router {
    Router::new()
        .route("/:table", get(list))
        .route("/:table/:id", get(read))
        .with_state(state)
}
