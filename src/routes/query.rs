use crate::handlers::query::run_query;
use crate::state::AppState;
use axum::{routing::post, Router};

pub fn query_routes(state: AppState) -> Router {
    Router::new().route("/query", post(run_query)).with_state(state)
}
